//! Selector tokenization.
//!
//! A small hand-rolled scanner, not a validator: its job is to split a
//! selector into parts precisely enough to find and replace whole tokens.
//! Commas inside attribute brackets and pseudo arguments are protected,
//! escapes are carried through verbatim, and unknown syntax degrades to
//! opaque tag parts instead of failing.

use std::iter::Peekable;
use std::str::Chars;

use crate::selector::{Combinator, ComplexSelector, SelectorList, SelectorPart};

/// Splits a selector into its comma-separated complex selectors.
pub fn parse_selector_list(input: &str) -> SelectorList {
    let mut selectors = Vec::new();
    let mut current = ComplexSelector::default();
    let mut pending_ws = false;
    let mut chars = input.chars().peekable();
    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
                if !current.parts.is_empty() {
                    pending_ws = true;
                }
            }
            ',' => {
                chars.next();
                pending_ws = false;
                flush(&mut selectors, &mut current);
            }
            '>' => {
                chars.next();
                pending_ws = false;
                current.parts.push(SelectorPart::Combinator(Combinator::Child));
            }
            '+' => {
                chars.next();
                pending_ws = false;
                current
                    .parts
                    .push(SelectorPart::Combinator(Combinator::NextSibling));
            }
            '~' => {
                chars.next();
                pending_ws = false;
                current
                    .parts
                    .push(SelectorPart::Combinator(Combinator::SubsequentSibling));
            }
            _ => {
                if pending_ws {
                    pending_ws = false;
                    if matches!(current.parts.last(), Some(part) if !part.is_combinator()) {
                        current
                            .parts
                            .push(SelectorPart::Combinator(Combinator::Descendant));
                    }
                }
                let part = match c {
                    '.' => {
                        chars.next();
                        SelectorPart::Class(consume_name(&mut chars))
                    }
                    '#' => {
                        chars.next();
                        SelectorPart::Id(consume_name(&mut chars))
                    }
                    '*' => {
                        chars.next();
                        SelectorPart::Universal
                    }
                    '[' => {
                        chars.next();
                        SelectorPart::Attribute(consume_bracketed(&mut chars))
                    }
                    ':' => SelectorPart::Pseudo(consume_pseudo(&mut chars)),
                    _ => {
                        let name = consume_name(&mut chars);
                        if name.is_empty() {
                            // Unrecognized character; step over it so the
                            // scan always advances.
                            chars.next();
                            continue;
                        }
                        SelectorPart::Tag(name)
                    }
                };
                current.parts.push(part);
            }
        }
    }
    flush(&mut selectors, &mut current);
    SelectorList { selectors }
}

fn flush(selectors: &mut Vec<ComplexSelector>, current: &mut ComplexSelector) {
    if !current.parts.is_empty() {
        selectors.push(std::mem::take(current));
    }
}

/// Reads a run of name characters: everything up to the next structural
/// character. Backslash escapes carry the following character through.
fn consume_name(chars: &mut Peekable<Chars>) -> String {
    let mut name = String::new();
    while let Some(&c) = chars.peek() {
        match c {
            '.' | '#' | '[' | ']' | ':' | ',' | '>' | '+' | '~' | '*' | '(' | ')' => break,
            c if c.is_whitespace() => break,
            '\\' => {
                chars.next();
                name.push('\\');
                if let Some(escaped) = chars.next() {
                    name.push(escaped);
                }
            }
            _ => {
                chars.next();
                name.push(c);
            }
        }
    }
    name
}

/// Reads the inside of `[...]`, the opening bracket already consumed.
/// Quoted strings and nested brackets are carried through raw.
fn consume_bracketed(chars: &mut Peekable<Chars>) -> String {
    let mut inner = String::new();
    let mut depth = 1usize;
    while let Some(c) = chars.next() {
        match c {
            '[' => {
                depth += 1;
                inner.push(c);
            }
            ']' => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
                inner.push(c);
            }
            '"' | '\'' => {
                inner.push(c);
                consume_quoted(chars, &mut inner, c);
            }
            '\\' => {
                inner.push(c);
                if let Some(escaped) = chars.next() {
                    inner.push(escaped);
                }
            }
            _ => inner.push(c),
        }
    }
    inner
}

/// Reads a pseudo-class or pseudo-element, colons included, along with a
/// balanced parenthesized argument if one follows.
fn consume_pseudo(chars: &mut Peekable<Chars>) -> String {
    let mut text = String::new();
    while text.len() < 2 && chars.peek() == Some(&':') {
        chars.next();
        text.push(':');
    }
    text.push_str(&consume_name(chars));
    if chars.peek() == Some(&'(') {
        chars.next();
        text.push('(');
        let mut depth = 1usize;
        while let Some(c) = chars.next() {
            match c {
                '(' => {
                    depth += 1;
                    text.push(c);
                }
                ')' => {
                    depth -= 1;
                    text.push(c);
                    if depth == 0 {
                        break;
                    }
                }
                '"' | '\'' => {
                    text.push(c);
                    consume_quoted(chars, &mut text, c);
                }
                '\\' => {
                    text.push(c);
                    if let Some(escaped) = chars.next() {
                        text.push(escaped);
                    }
                }
                _ => text.push(c),
            }
        }
    }
    text
}

/// Copies a quoted string, opening quote already written, through its
/// closing quote.
fn consume_quoted(chars: &mut Peekable<Chars>, out: &mut String, quote: char) {
    while let Some(c) = chars.next() {
        out.push(c);
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else if c == quote {
            break;
        }
    }
}
