//! Theme emission.
//!
//! The routed groups leave the pipeline one of three ways: reinserted at
//! the end of the document, serialized into a compact blob for a named
//! side asset, or handed to a caller's callback. The blob format is one
//! line per group, `selector {prop: value;...}`, media groups wrapped in
//! their `@media` prelude, root groups first.

use std::path::Component;

use log::debug;

use crate::css::ast::{AtRule, Node, Rule, Stylesheet};
use crate::theme::groups::{RuleGroup, ThemeGroups};
use crate::theme::options::SourceContext;

/// Default asset name template for file-mode extraction.
pub const DEFAULT_FILE_TEMPLATE: &str = "[name]-theme-[suffix].css";

/// A theme stylesheet emitted as a named side asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeAsset {
    /// Asset file name: template with `[name]` and `[suffix]`
    /// substituted, lowercased.
    pub file: String,
    /// Blob-serialized theme rules.
    pub content: String,
}

/// Serializes the groups into the compact blob form.
pub fn serialize_groups(groups: &ThemeGroups) -> String {
    let mut content = String::new();
    for group in &groups.root {
        push_rule(&mut content, group);
    }
    for media in &groups.media {
        let mut inner = String::new();
        for group in &media.rules {
            push_rule(&mut inner, group);
        }
        content.push_str(&format!("@media {} {{{}}}", media.params, inner));
    }
    content
}

fn push_rule(out: &mut String, group: &RuleGroup) {
    let mut body = String::new();
    for decl in &group.declarations {
        body.push_str(&format!("{}: {};", decl.property, decl.value));
    }
    out.push_str(&format!("{} {{{}}}", group.selector, body));
}

/// Appends the grouped rules back onto the document: root groups first,
/// then one `@media` block per params bucket, all in first-seen order.
pub fn reinsert_groups(stylesheet: &mut Stylesheet, groups: ThemeGroups) {
    debug!(
        "reinserting {} theme declarations at the end of the document",
        groups.declaration_count()
    );
    for group in groups.root {
        stylesheet.nodes.push(Node::Rule(group_to_rule(group)));
    }
    for media in groups.media {
        let rules = media
            .rules
            .into_iter()
            .map(|group| Node::Rule(group_to_rule(group)))
            .collect();
        stylesheet.nodes.push(Node::AtRule(AtRule {
            name: "media".to_string(),
            params: media.params,
            nodes: Some(rules),
        }));
    }
}

fn group_to_rule(group: RuleGroup) -> Rule {
    Rule {
        selector: group.selector,
        nodes: group
            .declarations
            .into_iter()
            .map(Node::Declaration)
            .collect(),
    }
}

/// Builds the asset file name for file-mode extraction.
///
/// `[name]` becomes the source path relative to the configured root with
/// directory separators folded into `-` and the extension dropped;
/// `[suffix]` becomes the theme token value. Placeholders match
/// case-insensitively and the finished name is lowercased.
pub fn asset_file_name(template: Option<&str>, source: &SourceContext, suffix: &str) -> String {
    let relative = source.relative_path();
    let stem = relative
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut segments: Vec<String> = Vec::new();
    if let Some(parent) = relative.parent() {
        for component in parent.components() {
            if let Component::Normal(part) = component {
                segments.push(part.to_string_lossy().into_owned());
            }
        }
    }
    segments.push(stem);
    let name = segments.join("-");
    let template = template.unwrap_or(DEFAULT_FILE_TEMPLATE);
    let filled = replace_ignore_case(template, "[name]", &name);
    replace_ignore_case(&filled, "[suffix]", suffix).to_lowercase()
}

/// Replaces every occurrence of an ASCII `needle`, matching
/// case-insensitively while leaving the rest of the text untouched.
fn replace_ignore_case(haystack: &str, needle: &str, replacement: &str) -> String {
    let bytes = haystack.as_bytes();
    let pattern = needle.as_bytes();
    let mut out = String::with_capacity(haystack.len());
    let mut i = 0;
    while i < bytes.len() {
        if i + pattern.len() <= bytes.len() && bytes[i..i + pattern.len()].eq_ignore_ascii_case(pattern)
        {
            out.push_str(replacement);
            i += pattern.len();
        } else {
            let mut j = i + 1;
            while j < bytes.len() && (bytes[j] & 0b1100_0000) == 0b1000_0000 {
                j += 1;
            }
            out.push_str(&haystack[i..j]);
            i = j;
        }
    }
    out
}
