//! Selector rewriting.
//!
//! Every routed rule gets its selector rewritten to carry the theme
//! token: replaceable tokens (`html`, `:root` by default) are swapped for
//! it in place, and selectors without one get the token prepended as an
//! ancestor or compounded onto the head, per configuration.

use cssparser::serialize_identifier;
use log::trace;

use crate::selector::{parse_selector_list, Combinator, ComplexSelector, SelectorPart};
use crate::theme::options::{SelectorOptions, TokenKind};

/// Rewrites rule selectors to carry the theme token.
///
/// Built once per extraction; `rewrite` is pure and callable any number
/// of times.
#[derive(Debug, Clone)]
pub struct SelectorRewriter {
    theme_part: SelectorPart,
    replace: Vec<String>,
    before: bool,
}

impl SelectorRewriter {
    pub fn new(options: &SelectorOptions) -> Self {
        let theme_part = match options.kind {
            TokenKind::Class => SelectorPart::Class(escape_identifier(&options.value)),
            TokenKind::Id => SelectorPart::Id(escape_identifier(&options.value)),
            TokenKind::Tag => SelectorPart::Tag(options.value.clone()),
            // The attribute expression is taken verbatim; escaping it
            // would mangle operators like `=` and quoted values.
            TokenKind::Attribute => SelectorPart::Attribute(options.value.clone()),
        };
        SelectorRewriter {
            theme_part,
            replace: options.replace.iter().map(|t| t.to_lowercase()).collect(),
            before: options.before,
        }
    }

    /// Returns `selector` scoped under the theme token, in minified form.
    ///
    /// Selectors of the list that come out identical are emitted once, so
    /// `html, :root` with both tokens replaceable collapses to a single
    /// theme token.
    pub fn rewrite(&self, selector: &str) -> String {
        let list = parse_selector_list(selector);
        let mut seen: Vec<String> = Vec::new();
        for mut complex in list.selectors {
            self.rewrite_complex(&mut complex);
            complex.normalize();
            let css = complex.to_css();
            if !seen.contains(&css) {
                seen.push(css);
            }
        }
        let rewritten = seen.join(",");
        trace!("selector {selector:?} rewritten to {rewritten:?}");
        rewritten
    }

    fn rewrite_complex(&self, complex: &mut ComplexSelector) {
        let mut replaced = false;
        let mut index = 0;
        while index < complex.parts.len() {
            if complex.parts[index].is_combinator() {
                index += 1;
                continue;
            }
            if self.matches_replace(&complex.parts[index]) {
                if replaced {
                    // Later occurrences just disappear; normalize() cleans
                    // up the combinators they leave behind.
                    complex.parts.remove(index);
                    continue;
                }
                complex.parts[index] = self.theme_part.clone();
                replaced = true;
            }
            index += 1;
        }
        if !replaced {
            if self.before {
                complex
                    .parts
                    .insert(0, SelectorPart::Combinator(Combinator::Descendant));
                complex.parts.insert(0, self.theme_part.clone());
            } else {
                // Compound onto the head token, after it.
                let at = 1.min(complex.parts.len());
                complex.parts.insert(at, self.theme_part.clone());
            }
        }
    }

    fn matches_replace(&self, part: &SelectorPart) -> bool {
        let text = part.to_string().to_lowercase();
        self.replace.iter().any(|token| *token == text)
    }
}

fn escape_identifier(value: &str) -> String {
    let mut escaped = String::new();
    // Writing into a String cannot fail.
    let _ = serialize_identifier(value, &mut escaped);
    escaped
}
