//! # themecast
//!
//! Rewrites CSS so that every color-bearing declaration is scoped under a
//! configurable theme token. Declarations are routed out of their rules,
//! grouped by rewritten selector (per `@media` prelude where applicable)
//! and either reinserted at the end of the document, emitted as a named
//! side asset, or handed to a callback.
//!
//! ```
//! use themecast_lib::{Options, ThemeExtractor};
//!
//! let extractor = ThemeExtractor::new(Options::default())?;
//! let output = extractor.process("html { color: teal; }", None)?;
//! assert!(output.css.contains(".theme"));
//! # Ok::<(), themecast_lib::Error>(())
//! ```
//!
//! The pipeline lives in three layers: the [`css`] module parses and
//! reprints documents, the [`selector`] module models selectors precisely
//! enough to rewrite them, and the [`theme`] module routes declarations
//! and emits the grouped result. [`ThemeExtractor`] ties them together.

pub mod color;
pub mod css;
pub mod error;
mod paths;
pub mod sass;
pub mod selector;
pub mod theme;
pub mod theme_extract;

pub use error::Error;
pub use sass::{sass_theme_prelude, SassThemeOptions};
pub use theme::emit::{ThemeAsset, DEFAULT_FILE_TEMPLATE};
pub use theme::options::{ExtractMode, Options, SelectorOptions, SourceContext, TokenKind};
pub use theme_extract::{ExtractedTheme, ThemeExtractor, TransformOutput};
