//! CSS document model: parsing, the owned node tree and printing.

pub mod ast;
pub mod parse;
pub mod serialize;

pub use ast::{AtRule, Comment, Declaration, Node, Rule, Stylesheet};
pub use parse::parse_stylesheet;
pub use serialize::to_css;
