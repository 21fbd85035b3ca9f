//! Declaration routing.
//!
//! One pass over the document in source order. Every color-bearing
//! declaration whose rule sits at the document root or directly inside an
//! `@media` block is copied into its theme group under the rewritten
//! selector. Unless `save_props` is set the original declaration is then
//! detached, and rules or `@media` blocks emptied by the detachment are
//! dropped with it. Rules in any other at-rule context (`@keyframes`,
//! `@font-face`, rules directly under `@supports`) are left untouched.

use log::{debug, trace};

use crate::color;
use crate::css::ast::{Node, Rule, Stylesheet};
use crate::theme::groups::ThemeGroups;
use crate::theme::rewrite::SelectorRewriter;

/// The container a rule's declarations are classified by.
enum RuleContext {
    Root,
    Media(String),
    /// Any other at-rule body; no routing happens here.
    Other,
}

/// Routes the document's color declarations into groups, mutating the
/// stylesheet in place.
pub fn route(
    stylesheet: &mut Stylesheet,
    rewriter: &SelectorRewriter,
    save_props: bool,
) -> ThemeGroups {
    let mut groups = ThemeGroups::new();
    route_nodes(
        &mut stylesheet.nodes,
        &RuleContext::Root,
        rewriter,
        save_props,
        &mut groups,
    );
    debug!(
        "routed {} declarations into {} root and {} media groups",
        groups.declaration_count(),
        groups.root.len(),
        groups.media.len()
    );
    groups
}

/// Routes every rule among `nodes`, returning how many declarations were
/// detached from this subtree.
///
/// Emptiness pruning is tied to detachment: a rule or `@media` block that
/// was already empty in the input is not this pass's to remove.
fn route_nodes(
    nodes: &mut Vec<Node>,
    context: &RuleContext,
    rewriter: &SelectorRewriter,
    save_props: bool,
    groups: &mut ThemeGroups,
) -> usize {
    let mut detached = 0;
    nodes.retain_mut(|node| match node {
        Node::Rule(rule) => {
            let removed = route_rule(rule, context, rewriter, save_props, groups);
            detached += removed;
            !(removed > 0 && rule.nodes.iter().all(Node::is_comment))
        }
        Node::AtRule(at) => {
            let is_media = at.is_media();
            let inner = if is_media {
                RuleContext::Media(at.params.clone())
            } else {
                RuleContext::Other
            };
            let Some(children) = at.nodes.as_mut() else {
                return true;
            };
            let removed = route_nodes(children, &inner, rewriter, save_props, groups);
            detached += removed;
            // An @media emptied by routing goes away with its rules.
            !(is_media && removed > 0 && children.iter().all(Node::is_comment))
        }
        _ => true,
    });
    detached
}

/// Routes one rule's direct declarations, returning how many were
/// detached. Nested rules in its body belong to neither context and are
/// not descended into.
fn route_rule(
    rule: &mut Rule,
    context: &RuleContext,
    rewriter: &SelectorRewriter,
    save_props: bool,
    groups: &mut ThemeGroups,
) -> usize {
    let media_params = match context {
        RuleContext::Root => None,
        RuleContext::Media(params) => Some(params.as_str()),
        RuleContext::Other => return 0,
    };
    let mut rewritten: Option<String> = None;
    for node in &rule.nodes {
        let Node::Declaration(decl) = node else {
            continue;
        };
        if !color::contains_color(&decl.value) {
            continue;
        }
        // The selector is rewritten once per rule, on the first hit.
        let key = rewritten.get_or_insert_with(|| rewriter.rewrite(&rule.selector));
        trace!(
            "routing {}: {} out of {:?}",
            decl.property,
            decl.value,
            rule.selector
        );
        let group = match media_params {
            None => groups.root_entry(key),
            Some(params) => groups.media_entry(params, key),
        };
        group.declarations.push(decl.clone());
    }
    if rewritten.is_none() || save_props {
        return 0;
    }
    let before = rule.nodes.len();
    rule.nodes.retain(|node| match node {
        Node::Declaration(decl) => !color::contains_color(&decl.value),
        _ => true,
    });
    before - rule.nodes.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::ast::Declaration;
    use crate::css::parse_stylesheet;
    use crate::theme::options::SelectorOptions;
    use pretty_assertions::assert_eq;

    fn route_css(css: &str, save_props: bool) -> (Stylesheet, ThemeGroups) {
        let mut sheet = parse_stylesheet(css).unwrap();
        let rewriter = SelectorRewriter::new(&SelectorOptions::default());
        let groups = route(&mut sheet, &rewriter, save_props);
        (sheet, groups)
    }

    #[test]
    fn routes_root_rules_and_keeps_the_rest() {
        let (sheet, groups) = route_css(".card { color: red; padding: 4px }", false);
        assert_eq!(groups.root.len(), 1);
        assert_eq!(groups.root[0].selector, ".theme .card");
        assert_eq!(
            groups.root[0].declarations,
            vec![Declaration::new("color", "red")]
        );
        // The rule survives with its non-color declaration.
        let Node::Rule(rule) = &sheet.nodes[0] else {
            panic!("expected a rule");
        };
        assert_eq!(rule.nodes, vec![Node::Declaration(Declaration::new("padding", "4px"))]);
    }

    #[test]
    fn rules_emptied_by_routing_are_dropped() {
        let (sheet, groups) = route_css(".card { color: red }", false);
        assert_eq!(groups.root.len(), 1);
        assert!(sheet.nodes.is_empty());
    }

    #[test]
    fn comment_only_remainders_are_dropped_too() {
        let (sheet, _) = route_css(".card { /* brand */ color: red }", false);
        assert!(sheet.nodes.is_empty());
    }

    #[test]
    fn media_rules_group_under_their_params() {
        let css = "@media (min-width: 600px) { .card { color: red } .card { background: blue } }";
        let (sheet, groups) = route_css(css, false);
        assert!(groups.root.is_empty());
        assert_eq!(groups.media.len(), 1);
        let media = &groups.media[0];
        assert_eq!(media.params, "(min-width: 600px)");
        assert_eq!(media.rules.len(), 1);
        assert_eq!(media.rules[0].selector, ".theme .card");
        assert_eq!(media.rules[0].declarations.len(), 2);
        // Both rules emptied, so the whole @media went away.
        assert!(sheet.nodes.is_empty());
    }

    #[test]
    fn media_block_with_untouched_rules_survives() {
        let css = "@media print { .card { color: red; margin: 0 } }";
        let (sheet, _) = route_css(css, false);
        let Node::AtRule(at) = &sheet.nodes[0] else {
            panic!("expected @media");
        };
        let children = at.nodes.as_ref().unwrap();
        assert_eq!(children.len(), 1);
    }

    #[test]
    fn keyframes_are_skipped() {
        let css = "@keyframes pulse { from { color: red } to { color: blue } }";
        let (sheet, groups) = route_css(css, false);
        assert!(groups.is_empty());
        let Node::AtRule(at) = &sheet.nodes[0] else {
            panic!("expected @keyframes");
        };
        assert_eq!(at.nodes.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn rules_directly_under_supports_are_skipped() {
        let css = "@supports (display: grid) { .card { color: red } }";
        let (sheet, groups) = route_css(css, false);
        assert!(groups.is_empty());
        assert_eq!(sheet.nodes.len(), 1);
    }

    #[test]
    fn media_nested_in_supports_routes() {
        let css = "@supports (display: grid) { @media screen { .card { color: red } } }";
        let (_, groups) = route_css(css, false);
        assert_eq!(groups.media.len(), 1);
        assert_eq!(groups.media[0].params, "screen");
    }

    #[test]
    fn save_props_copies_without_detaching() {
        let (sheet, groups) = route_css(".card { color: red }", true);
        assert_eq!(groups.declaration_count(), 1);
        let Node::Rule(rule) = &sheet.nodes[0] else {
            panic!("expected a rule");
        };
        assert_eq!(rule.nodes.len(), 1);
    }

    #[test]
    fn preexisting_empty_blocks_are_not_pruned() {
        let (sheet, groups) = route_css("@media screen {}\n.empty {}", false);
        assert!(groups.is_empty());
        assert_eq!(sheet.nodes.len(), 2);
    }

    #[test]
    fn same_selector_across_root_rules_merges_into_one_group() {
        let css = ".card { color: red }\n.card { background: blue }";
        let (_, groups) = route_css(css, false);
        assert_eq!(groups.root.len(), 1);
        assert_eq!(groups.root[0].declarations.len(), 2);
    }

    #[test]
    fn html_and_root_selectors_share_a_group() {
        let css = "html { color: red }\n:root { background: blue }";
        let (_, groups) = route_css(css, false);
        assert_eq!(groups.root.len(), 1);
        assert_eq!(groups.root[0].selector, ".theme");
    }
}
