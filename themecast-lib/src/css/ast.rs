//! Owned stylesheet tree.
//!
//! The parser produces this tree and the router mutates it in place, so
//! every node owns its text. Rule selectors and declaration values are kept
//! as raw source slices; the selector module re-parses them only where a
//! rewrite actually happens.

/// A parsed stylesheet: the ordered list of top-level nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stylesheet {
    pub nodes: Vec<Node>,
}

/// One node in a stylesheet or rule body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Rule(Rule),
    AtRule(AtRule),
    Declaration(Declaration),
    Comment(Comment),
}

/// A qualified rule: a selector plus a block of child nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Raw selector text, trimmed but otherwise as written.
    pub selector: String,
    pub nodes: Vec<Node>,
}

/// An at-rule such as `@media`, `@supports` or `@import`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtRule {
    /// Name without the `@`, as written (`media`, `supports`, ...).
    pub name: String,
    /// Prelude text between the name and the block or semicolon, trimmed.
    pub params: String,
    /// Block contents, or `None` for statement at-rules like `@import`.
    pub nodes: Option<Vec<Node>>,
}

/// A `property: value` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    /// Raw value text, including any `!important` suffix.
    pub value: String,
}

/// A comment, stored without the `/*` and `*/` delimiters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub text: String,
}

impl Stylesheet {
    pub fn new() -> Self {
        Stylesheet { nodes: Vec::new() }
    }
}

impl Node {
    pub fn is_comment(&self) -> bool {
        matches!(self, Node::Comment(_))
    }
}

impl Rule {
    pub fn new(selector: impl Into<String>) -> Self {
        Rule {
            selector: selector.into(),
            nodes: Vec::new(),
        }
    }
}

impl AtRule {
    /// True for the at-rule names whose block holds ordinary rules.
    pub fn is_media(&self) -> bool {
        self.name.eq_ignore_ascii_case("media")
    }
}

impl Declaration {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Declaration {
            property: property.into(),
            value: value.into(),
        }
    }
}
