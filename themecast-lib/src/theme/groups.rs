//! Ordered routing groups.
//!
//! Routed declarations accumulate here keyed by rewritten selector, split
//! into the document-root bucket and one bucket per `@media` prelude.
//! Backed by plain vectors with linear find: group counts stay small (one
//! entry per distinct rewritten selector) and first-seen order is part of
//! the contract.

use crate::css::ast::Declaration;

/// Declarations grouped under one rewritten selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleGroup {
    pub selector: String,
    pub declarations: Vec<Declaration>,
}

/// Rule groups collected under one `@media` prelude.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaGroup {
    pub params: String,
    pub rules: Vec<RuleGroup>,
}

/// Everything routed out of one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeGroups {
    pub root: Vec<RuleGroup>,
    pub media: Vec<MediaGroup>,
}

impl ThemeGroups {
    pub fn new() -> Self {
        ThemeGroups::default()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty() && self.media.is_empty()
    }

    /// Total routed declarations across all groups.
    pub fn declaration_count(&self) -> usize {
        let root: usize = self.root.iter().map(|group| group.declarations.len()).sum();
        let media: usize = self
            .media
            .iter()
            .flat_map(|media| &media.rules)
            .map(|group| group.declarations.len())
            .sum();
        root + media
    }

    /// The root-level group for `selector`, created on first use.
    pub fn root_entry(&mut self, selector: &str) -> &mut RuleGroup {
        entry(&mut self.root, selector)
    }

    /// The group for `selector` under the given media prelude, created on
    /// first use. Distinct preludes never merge, even when equivalent.
    pub fn media_entry(&mut self, params: &str, selector: &str) -> &mut RuleGroup {
        let index = match self.media.iter().position(|media| media.params == params) {
            Some(index) => index,
            None => {
                self.media.push(MediaGroup {
                    params: params.to_string(),
                    rules: Vec::new(),
                });
                self.media.len() - 1
            }
        };
        entry(&mut self.media[index].rules, selector)
    }
}

fn entry<'a>(groups: &'a mut Vec<RuleGroup>, selector: &str) -> &'a mut RuleGroup {
    let index = match groups.iter().position(|group| group.selector == selector) {
        Some(index) => index,
        None => {
            groups.push(RuleGroup {
                selector: selector.to_string(),
                declarations: Vec::new(),
            });
            groups.len() - 1
        }
    };
    &mut groups[index]
}
