//! Error types for theme extraction.

use thiserror::Error;

/// Errors produced while configuring or running a theme extraction.
///
/// The configuration errors (`EmptySelectorValue`, `UnsupportedTokenKind`)
/// are raised before any document is touched; a failed transform never
/// leaves a half-rewritten stylesheet behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The configured theme token value was empty or blank.
    #[error("selector.value cannot be empty")]
    EmptySelectorValue,

    /// A token kind string did not name one of the supported kinds.
    #[error("`{kind}` is not a supported theme token kind; use one of: attribute, class, id, tag")]
    UnsupportedTokenKind { kind: String },

    /// The stylesheet text could not be tokenized into rules.
    #[error("CSS parse error at line {line}, column {column}: {message}")]
    Parse {
        line: u32,
        column: u32,
        message: String,
    },

    /// File extraction was requested without a source path to name the asset after.
    #[error("file extraction requires a source context naming the input stylesheet")]
    MissingSource,
}
