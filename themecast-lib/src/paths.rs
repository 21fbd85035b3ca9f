//! Lexical path arithmetic for asset naming and the SASS prelude.
//!
//! Nothing here touches the filesystem; paths are compared purely by
//! their components, the way a bundler compares module identifiers.

use std::path::{Component, Path, PathBuf};

/// Computes `to` relative to the directory `from`.
///
/// Both paths are taken at face value; `.` components are ignored and no
/// symlink or working-directory resolution happens. When the paths share
/// no prefix the result climbs out of `from` entirely.
pub(crate) fn relative(from: &Path, to: &Path) -> PathBuf {
    let from: Vec<Component> = from
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    let to: Vec<Component> = to
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();
    let mut out = PathBuf::new();
    for _ in common..from.len() {
        out.push("..");
    }
    for component in &to[common..] {
        out.push(component.as_os_str());
    }
    out
}

/// Joins path components with forward slashes regardless of platform,
/// the shape module import specifiers use.
pub(crate) fn to_module_path(path: &Path) -> String {
    let mut out = String::new();
    for component in path.components() {
        let part = match component {
            Component::ParentDir => "..",
            Component::CurDir => continue,
            other => match other.as_os_str().to_str() {
                Some(part) => part,
                None => continue,
            },
        };
        if !out.is_empty() {
            out.push('/');
        }
        out.push_str(part);
    }
    out
}
