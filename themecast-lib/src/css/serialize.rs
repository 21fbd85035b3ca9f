//! Stylesheet printing.
//!
//! Reprints a node tree as indented CSS, one declaration per line. The
//! printer is deliberately simple: selectors, params and values are
//! emitted exactly as stored, so whatever the parser captured comes back
//! out unmodified.

use crate::css::ast::{AtRule, Comment, Declaration, Node, Rule, Stylesheet};

const INDENT: &str = "    ";

/// Prints a stylesheet.
pub fn to_css(stylesheet: &Stylesheet) -> String {
    let mut out = String::new();
    write_nodes(&mut out, &stylesheet.nodes, 0);
    out
}

fn write_nodes(out: &mut String, nodes: &[Node], depth: usize) {
    for node in nodes {
        match node {
            Node::Rule(rule) => write_rule(out, rule, depth),
            Node::AtRule(at) => write_at_rule(out, at, depth),
            Node::Declaration(decl) => write_declaration(out, decl, depth),
            Node::Comment(comment) => write_comment(out, comment, depth),
        }
    }
}

fn write_rule(out: &mut String, rule: &Rule, depth: usize) {
    push_indent(out, depth);
    out.push_str(&rule.selector);
    out.push_str(" {\n");
    write_nodes(out, &rule.nodes, depth + 1);
    push_indent(out, depth);
    out.push_str("}\n");
}

fn write_at_rule(out: &mut String, at: &AtRule, depth: usize) {
    push_indent(out, depth);
    out.push('@');
    out.push_str(&at.name);
    if !at.params.is_empty() {
        out.push(' ');
        out.push_str(&at.params);
    }
    match &at.nodes {
        Some(nodes) => {
            out.push_str(" {\n");
            write_nodes(out, nodes, depth + 1);
            push_indent(out, depth);
            out.push_str("}\n");
        }
        None => out.push_str(";\n"),
    }
}

fn write_declaration(out: &mut String, decl: &Declaration, depth: usize) {
    push_indent(out, depth);
    out.push_str(&format!("{}: {};\n", decl.property, decl.value));
}

fn write_comment(out: &mut String, comment: &Comment, depth: usize) {
    push_indent(out, depth);
    out.push_str(&format!("/*{}*/\n", comment.text));
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

impl std::fmt::Display for Stylesheet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&to_css(self))
    }
}
