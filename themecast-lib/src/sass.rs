//! SASS theme prelude.
//!
//! Builds the `@use` prelude that wires a stylesheet into the
//! `ungic-sass-theme` module before compilation: loads the named theme
//! file, overlays caller overrides onto its variables and appends the
//! `render-vars()` include after the stylesheet body. Pure string
//! formatting; nothing is read from disk.

use std::path::{Path, PathBuf};

use crate::paths;
use crate::theme::options::SourceContext;

/// Configuration for the SASS prelude.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SassThemeOptions {
    /// Theme file name under `themes_path`, without the `.scss` extension.
    pub theme_name: String,
    /// Directory holding the theme files, relative to the project root.
    pub themes_path: PathBuf,
    /// Variable overrides merged over the theme file's variables, emitted
    /// as a SASS map in insertion order. Values are raw SASS expressions.
    pub theme_options: Vec<(String, String)>,
    /// Namespace the theme module is imported under; `*` flattens it.
    pub include_as: String,
}

impl Default for SassThemeOptions {
    fn default() -> Self {
        SassThemeOptions {
            theme_name: "default".to_string(),
            themes_path: PathBuf::from("app/themes"),
            theme_options: Vec::new(),
            include_as: "*".to_string(),
        }
    }
}

/// Wraps `content` in the theme prelude for the given source file.
///
/// The theme file is imported by its path relative to the source file's
/// directory, with forward slashes on every platform.
pub fn sass_theme_prelude(
    options: &SassThemeOptions,
    source: &SourceContext,
    content: &str,
) -> String {
    let theme_file = options
        .themes_path
        .join(format!("{}.scss", options.theme_name));
    let relative_source = source.relative_path();
    let source_dir = relative_source.parent().unwrap_or_else(|| Path::new(""));
    let import = paths::to_module_path(&paths::relative(source_dir, &theme_file));
    let pairs: Vec<String> = options
        .theme_options
        .iter()
        .map(|(key, value)| format!("{key}: {value}"))
        .collect();
    let overrides = format!("({})", pairs.join(","));
    format!(
        "@use \"sass:meta\";\n\
         @use \"sass:map\";\n\
         @use \"{import}\" as ungic-theme-config;\n\
         $ungic-theme-config: meta.module-variables(ungic-theme-config);\n\
         $ungic-theme-config: map.merge($ungic-theme-config, {overrides});\n\
         @use \"ungic-sass-theme\" as {include_as} with (\n\
         \x20 $theme: $ungic-theme-config\n\
         );\n\
         {content}\n\
         @include render-vars();\n",
        include_as = options.include_as,
    )
}
