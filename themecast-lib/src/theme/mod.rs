//! The theme extraction passes: options, selector rewriting, declaration
//! routing and emission.

pub mod emit;
pub mod groups;
pub mod options;
pub mod rewrite;
pub mod router;

pub use emit::{asset_file_name, reinsert_groups, serialize_groups, ThemeAsset};
pub use groups::{MediaGroup, RuleGroup, ThemeGroups};
pub use options::{ExtractMode, Options, SelectorOptions, SourceContext, TokenKind};
pub use rewrite::SelectorRewriter;
pub use router::route;
