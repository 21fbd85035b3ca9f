//! Selector model.
//!
//! Selectors are held as flat part lists: simple tokens (tag, class, id,
//! attribute, pseudo) interleaved with combinators. The model is tolerant
//! rather than validating; anything the tokenizer does not recognize is
//! kept as an opaque tag-like part so that no selector ever fails to
//! round-trip.

pub mod parse;

pub use parse::parse_selector_list;

/// A combinator between two compound selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    Descendant,
    Child,
    NextSibling,
    SubsequentSibling,
}

impl Combinator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Combinator::Descendant => " ",
            Combinator::Child => ">",
            Combinator::NextSibling => "+",
            Combinator::SubsequentSibling => "~",
        }
    }
}

/// One token of a complex selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorPart {
    /// A type selector, or any run of text the tokenizer has no better
    /// name for (`svg|rect`, `50%`, `&`).
    Tag(String),
    /// `.name`, stored without the dot.
    Class(String),
    /// `#name`, stored without the hash.
    Id(String),
    /// `[...]`, stored without the brackets.
    Attribute(String),
    /// `:hover`, `::before` or `:not(...)`, stored with colons and argument.
    Pseudo(String),
    /// `*`
    Universal,
    Combinator(Combinator),
}

impl SelectorPart {
    pub fn is_combinator(&self) -> bool {
        matches!(self, SelectorPart::Combinator(_))
    }
}

impl std::fmt::Display for SelectorPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectorPart::Tag(name) => f.write_str(name),
            SelectorPart::Class(name) => write!(f, ".{name}"),
            SelectorPart::Id(name) => write!(f, "#{name}"),
            SelectorPart::Attribute(inner) => write!(f, "[{inner}]"),
            SelectorPart::Pseudo(text) => f.write_str(text),
            SelectorPart::Universal => f.write_str("*"),
            SelectorPart::Combinator(c) => f.write_str(c.as_str()),
        }
    }
}

/// One comma-separated member of a selector list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComplexSelector {
    pub parts: Vec<SelectorPart>,
}

impl ComplexSelector {
    /// Collapses runs of adjacent combinators and drops combinators left
    /// dangling at either end.
    ///
    /// Runs appear when a token is deleted from the middle of a selector;
    /// the surviving combinator is the first non-descendant one of the
    /// run, so `a > html b` with `html` removed stays `a > b`.
    pub fn normalize(&mut self) {
        let mut collapsed: Vec<SelectorPart> = Vec::with_capacity(self.parts.len());
        for part in self.parts.drain(..) {
            match part {
                SelectorPart::Combinator(next) => match collapsed.last_mut() {
                    Some(SelectorPart::Combinator(prev)) => {
                        if *prev == Combinator::Descendant && next != Combinator::Descendant {
                            *prev = next;
                        }
                    }
                    _ => collapsed.push(SelectorPart::Combinator(next)),
                },
                other => collapsed.push(other),
            }
        }
        while matches!(collapsed.first(), Some(part) if part.is_combinator()) {
            collapsed.remove(0);
        }
        while matches!(collapsed.last(), Some(part) if part.is_combinator()) {
            collapsed.pop();
        }
        self.parts = collapsed;
    }

    /// Prints the selector in its minified form: descendant combinators as
    /// a single space, all other combinators unspaced.
    pub fn to_css(&self) -> String {
        let mut out = String::new();
        for part in &self.parts {
            out.push_str(&part.to_string());
        }
        out
    }
}

/// A full (possibly comma-separated) selector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorList {
    pub selectors: Vec<ComplexSelector>,
}

impl SelectorList {
    pub fn to_css(&self) -> String {
        let parts: Vec<String> = self.selectors.iter().map(ComplexSelector::to_css).collect();
        parts.join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(name: &str) -> SelectorPart {
        SelectorPart::Tag(name.to_string())
    }

    #[test]
    fn collapse_prefers_the_explicit_combinator() {
        let mut sel = ComplexSelector {
            parts: vec![
                tag("a"),
                SelectorPart::Combinator(Combinator::Child),
                SelectorPart::Combinator(Combinator::Descendant),
                tag("b"),
            ],
        };
        sel.normalize();
        assert_eq!(sel.to_css(), "a>b");
    }

    #[test]
    fn collapse_keeps_a_lone_descendant() {
        let mut sel = ComplexSelector {
            parts: vec![
                tag("a"),
                SelectorPart::Combinator(Combinator::Descendant),
                SelectorPart::Combinator(Combinator::Descendant),
                tag("b"),
            ],
        };
        sel.normalize();
        assert_eq!(sel.to_css(), "a b");
    }

    #[test]
    fn dangling_combinators_are_trimmed() {
        let mut sel = ComplexSelector {
            parts: vec![
                SelectorPart::Combinator(Combinator::Descendant),
                tag("a"),
                SelectorPart::Combinator(Combinator::Child),
            ],
        };
        sel.normalize();
        assert_eq!(sel.to_css(), "a");
    }
}
