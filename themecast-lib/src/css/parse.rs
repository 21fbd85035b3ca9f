//! Stylesheet parsing.
//!
//! Token-level recursive descent over `cssparser`. Selector preludes,
//! at-rule params and declaration values are captured as raw source slices
//! so the rest of the pipeline can reprint untouched rules byte-for-byte
//! faithful to the input, comments included.

use cssparser::{
    Delimiter, Delimiters, ParseError, ParseErrorKind, Parser, ParserInput, Token,
};

use crate::css::ast::{AtRule, Comment, Declaration, Node, Rule, Stylesheet};
use crate::error::Error;

/// Internal error detail attached to `cssparser` parse errors.
#[derive(Debug, Clone)]
enum SyntaxError {
    Expected(&'static str),
    Unexpected(String),
}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyntaxError::Expected(what) => write!(f, "expected {what}"),
            SyntaxError::Unexpected(what) => write!(f, "unexpected {what}"),
        }
    }
}

type Result<'i, T> = std::result::Result<T, ParseError<'i, SyntaxError>>;

/// Parses a stylesheet into an owned node tree.
///
/// # Arguments
///
/// * `css` - Full stylesheet text.
///
/// Malformed input fails with a one-based line and column pointing at the
/// offending construct; nothing is silently dropped or repaired.
pub fn parse_stylesheet(css: &str) -> std::result::Result<Stylesheet, Error> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    match parse_node_list(&mut parser, true) {
        Ok(nodes) => Ok(Stylesheet { nodes }),
        Err(err) => {
            let message = match &err.kind {
                ParseErrorKind::Custom(detail) => detail.to_string(),
                ParseErrorKind::Basic(basic) => format!("{basic:?}"),
            };
            Err(Error::Parse {
                // cssparser counts lines from zero.
                line: err.location.line + 1,
                column: err.location.column,
                message,
            })
        }
    }
}

/// Consumes component values up to, but not including, any of the `stop`
/// delimiters or the end of the current block.
///
/// Block and function tokens crossed on the way are consumed as whole
/// units, so a `;` inside `url()` or a `{` inside a string never counts
/// as a stop. The consumed region stays addressable through
/// `Parser::slice_from`.
fn consume_component_values<'i, 't>(input: &mut Parser<'i, 't>, stop: Delimiters) {
    let _: std::result::Result<(), ParseError<()>> = input.parse_until_before(stop, |values| {
        while values.next_including_whitespace_and_comments().is_ok() {}
        Ok(())
    });
}

/// Parses nodes until the current block (or the input) is exhausted.
///
/// Handles every context: the document root, rule bodies and at-rule
/// bodies all hold the same node kinds, only the dispatch between rules
/// and declarations differs.
fn parse_node_list<'i, 't>(input: &mut Parser<'i, 't>, top_level: bool) -> Result<'i, Vec<Node>> {
    let mut nodes = Vec::new();
    loop {
        let start = input.state();
        let token = match input.next_including_whitespace_and_comments() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };
        match token {
            Token::WhiteSpace(_) => {}
            Token::Comment(text) => nodes.push(Node::Comment(Comment {
                text: text.to_string(),
            })),
            // HTML comment wrappers from the age of <style> hiding.
            Token::CDO | Token::CDC if top_level => {}
            Token::Semicolon => {}
            Token::AtKeyword(name) => {
                let name = name.as_ref().to_string();
                nodes.push(parse_at_rule(input, name)?);
            }
            _ => {
                input.reset(&start);
                nodes.push(parse_rule_or_declaration(input, top_level)?);
            }
        }
    }
    Ok(nodes)
}

/// Parses an at-rule after its `@name` token has been consumed.
fn parse_at_rule<'i, 't>(input: &mut Parser<'i, 't>, name: String) -> Result<'i, Node> {
    let prelude_start = input.position();
    consume_component_values(
        input,
        Delimiter::Semicolon | Delimiter::CurlyBracketBlock,
    );
    let params = input.slice_from(prelude_start).trim().to_string();
    let nodes = match input.next_including_whitespace_and_comments() {
        Ok(&Token::CurlyBracketBlock) => {
            Some(input.parse_nested_block(|block| parse_node_list(block, false))?)
        }
        // A `;` or the end of input closes a statement at-rule.
        _ => None,
    };
    Ok(Node::AtRule(AtRule {
        name,
        params,
        nodes,
    }))
}

/// Dispatches between a qualified rule and a declaration.
///
/// Scans ahead for the next `{`, `;` or end of input: a `{` first means a
/// rule, anything else a declaration.
fn parse_rule_or_declaration<'i, 't>(
    input: &mut Parser<'i, 't>,
    top_level: bool,
) -> Result<'i, Node> {
    let start = input.state();
    consume_component_values(
        input,
        Delimiter::Semicolon | Delimiter::CurlyBracketBlock,
    );
    let found_block = matches!(
        input.next_including_whitespace_and_comments(),
        Ok(&Token::CurlyBracketBlock)
    );
    input.reset(&start);
    if found_block {
        parse_qualified_rule(input)
    } else if top_level {
        Err(input.new_custom_error(SyntaxError::Expected("a rule")))
    } else {
        parse_declaration(input)
    }
}

fn parse_qualified_rule<'i, 't>(input: &mut Parser<'i, 't>) -> Result<'i, Node> {
    let selector_start = input.position();
    consume_component_values(input, Delimiter::CurlyBracketBlock);
    let selector = input.slice_from(selector_start).trim().to_string();
    match input.next_including_whitespace_and_comments() {
        Ok(&Token::CurlyBracketBlock) => {}
        _ => return Err(input.new_custom_error(SyntaxError::Expected("`{` after a selector"))),
    }
    if selector.is_empty() {
        return Err(input.new_custom_error(SyntaxError::Expected("a selector before `{`")));
    }
    let nodes = input.parse_nested_block(|block| parse_node_list(block, false))?;
    Ok(Node::Rule(Rule { selector, nodes }))
}

fn parse_declaration<'i, 't>(input: &mut Parser<'i, 't>) -> Result<'i, Node> {
    let token = input.next()?.clone();
    let property = match token {
        Token::Ident(name) => name.as_ref().to_string(),
        other => {
            return Err(input.new_custom_error(SyntaxError::Unexpected(format!(
                "{} where a property name was expected",
                describe(&other)
            ))))
        }
    };
    input.expect_colon()?;
    input.skip_whitespace();
    let value_start = input.position();
    consume_component_values(input, Delimiter::Semicolon);
    let value = input.slice_from(value_start).trim().to_string();
    // Consume the terminating `;`, if the declaration has one.
    let _ = input.next();
    Ok(Node::Declaration(Declaration { property, value }))
}

fn describe(token: &Token) -> String {
    match token {
        Token::Ident(name) => format!("identifier `{name}`"),
        Token::AtKeyword(name) => format!("`@{name}`"),
        Token::Hash(name) | Token::IDHash(name) => format!("`#{name}`"),
        Token::QuotedString(_) => "string".to_string(),
        Token::Delim(c) => format!("`{c}`"),
        Token::Colon => "`:`".to_string(),
        Token::Semicolon => "`;`".to_string(),
        Token::Comma => "`,`".to_string(),
        Token::CurlyBracketBlock => "`{`".to_string(),
        Token::CloseCurlyBracket => "`}`".to_string(),
        other => format!("{other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(css: &str) -> Stylesheet {
        parse_stylesheet(css).unwrap()
    }

    // Test that a plain rule keeps its selector and declarations verbatim.
    #[test]
    fn parses_rule_with_declarations() {
        let sheet = parse("a { color: red; text-decoration: none }");
        assert_eq!(sheet.nodes.len(), 1);
        let Node::Rule(rule) = &sheet.nodes[0] else {
            panic!("expected a rule");
        };
        assert_eq!(rule.selector, "a");
        assert_eq!(
            rule.nodes,
            vec![
                Node::Declaration(Declaration::new("color", "red")),
                Node::Declaration(Declaration::new("text-decoration", "none")),
            ]
        );
    }

    // Test that comments survive at the root and inside rule bodies.
    #[test]
    fn keeps_comments() {
        let sheet = parse("/* head */ a { /* body */ color: red; }");
        assert_eq!(
            sheet.nodes[0],
            Node::Comment(Comment {
                text: " head ".to_string()
            })
        );
        let Node::Rule(rule) = &sheet.nodes[1] else {
            panic!("expected a rule");
        };
        assert_eq!(
            rule.nodes[0],
            Node::Comment(Comment {
                text: " body ".to_string()
            })
        );
    }

    #[test]
    fn parses_media_with_nested_rules() {
        let sheet = parse("@media (min-width: 600px) { a { color: red } }");
        let Node::AtRule(at) = &sheet.nodes[0] else {
            panic!("expected an at-rule");
        };
        assert_eq!(at.name, "media");
        assert_eq!(at.params, "(min-width: 600px)");
        let nodes = at.nodes.as_ref().unwrap();
        assert!(matches!(&nodes[0], Node::Rule(rule) if rule.selector == "a"));
    }

    #[test]
    fn parses_statement_at_rule() {
        let sheet = parse("@import url(\"base.css\");\na { color: red }");
        let Node::AtRule(at) = &sheet.nodes[0] else {
            panic!("expected an at-rule");
        };
        assert_eq!(at.name, "import");
        assert_eq!(at.params, "url(\"base.css\")");
        assert!(at.nodes.is_none());
    }

    #[test]
    fn parses_nested_at_rules() {
        let sheet = parse("@supports (display: grid) { @media screen { a { color: red } } }");
        let Node::AtRule(supports) = &sheet.nodes[0] else {
            panic!("expected @supports");
        };
        assert_eq!(supports.params, "(display: grid)");
        let inner = supports.nodes.as_ref().unwrap();
        let Node::AtRule(media) = &inner[0] else {
            panic!("expected @media");
        };
        assert_eq!(media.name, "media");
        assert_eq!(media.params, "screen");
    }

    // Test that selectors with attribute blocks and pseudo functions are
    // captured whole.
    #[test]
    fn captures_selector_with_blocks() {
        let sheet = parse("a[data-x=\"{\"]:not(.b, .c) { color: red }");
        let Node::Rule(rule) = &sheet.nodes[0] else {
            panic!("expected a rule");
        };
        assert_eq!(rule.selector, "a[data-x=\"{\"]:not(.b, .c)");
    }

    // Test that braces hidden inside strings and url() do not end a value early.
    #[test]
    fn value_tokens_with_braces_stay_in_the_value() {
        let sheet = parse("a { content: \"{\"; background: url(img.png) no-repeat }");
        let Node::Rule(rule) = &sheet.nodes[0] else {
            panic!("expected a rule");
        };
        assert_eq!(
            rule.nodes,
            vec![
                Node::Declaration(Declaration::new("content", "\"{\"")),
                Node::Declaration(Declaration::new("background", "url(img.png) no-repeat")),
            ]
        );
    }

    #[test]
    fn function_values_are_captured_whole() {
        let sheet = parse("a { color: rgb(255, 0, 0); width: calc(100% - 2px) }");
        let Node::Rule(rule) = &sheet.nodes[0] else {
            panic!("expected a rule");
        };
        assert_eq!(
            rule.nodes,
            vec![
                Node::Declaration(Declaration::new("color", "rgb(255, 0, 0)")),
                Node::Declaration(Declaration::new("width", "calc(100% - 2px)")),
            ]
        );
    }

    #[test]
    fn keeps_important_in_the_value() {
        let sheet = parse("a { color: red !important; }");
        let Node::Rule(rule) = &sheet.nodes[0] else {
            panic!("expected a rule");
        };
        assert_eq!(
            rule.nodes[0],
            Node::Declaration(Declaration::new("color", "red !important"))
        );
    }

    #[test]
    fn skips_html_comment_wrappers_at_top_level() {
        let sheet = parse("<!-- a { color: red } -->");
        assert_eq!(sheet.nodes.len(), 1);
        assert!(matches!(&sheet.nodes[0], Node::Rule(_)));
    }

    #[test]
    fn multi_line_selector_is_trimmed() {
        let sheet = parse(".a,\n.b {\n  color: red;\n}");
        let Node::Rule(rule) = &sheet.nodes[0] else {
            panic!("expected a rule");
        };
        assert_eq!(rule.selector, ".a,\n.b");
    }

    #[test]
    fn reports_location_of_bad_declaration() {
        let err = parse_stylesheet("a {\n  color red;\n}").unwrap_err();
        let Error::Parse { line, .. } = err else {
            panic!("expected a parse error, got {err:?}");
        };
        assert_eq!(line, 2);
    }

    #[test]
    fn rejects_top_level_declaration() {
        let err = parse_stylesheet("color: red;").unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn tolerates_stray_semicolons() {
        let sheet = parse("a { ; color: red;; }");
        let Node::Rule(rule) = &sheet.nodes[0] else {
            panic!("expected a rule");
        };
        assert_eq!(rule.nodes.len(), 1);
    }
}
