//! Color detection in declaration values.
//!
//! The router needs a yes/no answer, not a parsed color, so detection is
//! a token scan: hex hashes, color function names and named-color idents
//! anywhere in the value count, including inside gradients and `var()`
//! fallbacks. Strings and `url()` bodies are single tokens and can never
//! produce a false positive.

use cssparser::{ParseError, Parser, ParserInput, Token};

/// The CSS named colors, with `transparent` and `currentcolor`.
const NAMED_COLORS: &[&str] = &[
    "aliceblue",
    "antiquewhite",
    "aqua",
    "aquamarine",
    "azure",
    "beige",
    "bisque",
    "black",
    "blanchedalmond",
    "blue",
    "blueviolet",
    "brown",
    "burlywood",
    "cadetblue",
    "chartreuse",
    "chocolate",
    "coral",
    "cornflowerblue",
    "cornsilk",
    "crimson",
    "currentcolor",
    "cyan",
    "darkblue",
    "darkcyan",
    "darkgoldenrod",
    "darkgray",
    "darkgreen",
    "darkgrey",
    "darkkhaki",
    "darkmagenta",
    "darkolivegreen",
    "darkorange",
    "darkorchid",
    "darkred",
    "darksalmon",
    "darkseagreen",
    "darkslateblue",
    "darkslategray",
    "darkslategrey",
    "darkturquoise",
    "darkviolet",
    "deeppink",
    "deepskyblue",
    "dimgray",
    "dimgrey",
    "dodgerblue",
    "firebrick",
    "floralwhite",
    "forestgreen",
    "fuchsia",
    "gainsboro",
    "ghostwhite",
    "gold",
    "goldenrod",
    "gray",
    "green",
    "greenyellow",
    "grey",
    "honeydew",
    "hotpink",
    "indianred",
    "indigo",
    "ivory",
    "khaki",
    "lavender",
    "lavenderblush",
    "lawngreen",
    "lemonchiffon",
    "lightblue",
    "lightcoral",
    "lightcyan",
    "lightgoldenrodyellow",
    "lightgray",
    "lightgreen",
    "lightgrey",
    "lightpink",
    "lightsalmon",
    "lightseagreen",
    "lightskyblue",
    "lightslategray",
    "lightslategrey",
    "lightsteelblue",
    "lightyellow",
    "lime",
    "limegreen",
    "linen",
    "magenta",
    "maroon",
    "mediumaquamarine",
    "mediumblue",
    "mediumorchid",
    "mediumpurple",
    "mediumseagreen",
    "mediumslateblue",
    "mediumspringgreen",
    "mediumturquoise",
    "mediumvioletred",
    "midnightblue",
    "mintcream",
    "mistyrose",
    "moccasin",
    "navajowhite",
    "navy",
    "oldlace",
    "olive",
    "olivedrab",
    "orange",
    "orangered",
    "orchid",
    "palegoldenrod",
    "palegreen",
    "paleturquoise",
    "palevioletred",
    "papayawhip",
    "peachpuff",
    "peru",
    "pink",
    "plum",
    "powderblue",
    "purple",
    "rebeccapurple",
    "red",
    "rosybrown",
    "royalblue",
    "saddlebrown",
    "salmon",
    "sandybrown",
    "seagreen",
    "seashell",
    "sienna",
    "silver",
    "skyblue",
    "slateblue",
    "slategray",
    "slategrey",
    "snow",
    "springgreen",
    "steelblue",
    "tan",
    "teal",
    "thistle",
    "tomato",
    "transparent",
    "turquoise",
    "violet",
    "wheat",
    "white",
    "whitesmoke",
    "yellow",
    "yellowgreen",
];

/// Function names whose presence alone marks a value as color-bearing.
const COLOR_FUNCTIONS: &[&str] = &[
    "rgb",
    "rgba",
    "hsl",
    "hsla",
    "hwb",
    "lab",
    "lch",
    "oklab",
    "oklch",
    "color",
    "color-mix",
    "light-dark",
];

/// True when a declaration value carries at least one color token.
pub fn contains_color(value: &str) -> bool {
    let mut input = ParserInput::new(value);
    let mut parser = Parser::new(&mut input);
    scan(&mut parser)
}

fn scan<'i, 't>(input: &mut Parser<'i, 't>) -> bool {
    loop {
        let token = match input.next() {
            Ok(token) => token.clone(),
            Err(_) => return false,
        };
        match token {
            Token::Hash(digits) | Token::IDHash(digits) => {
                if is_hex_color(digits.as_ref()) {
                    return true;
                }
            }
            Token::Ident(name) => {
                if is_named_color(name.as_ref()) {
                    return true;
                }
            }
            Token::Function(name) => {
                if is_color_function(name.as_ref()) {
                    return true;
                }
                // Gradients and var() fallbacks hold colors in their
                // arguments.
                if scan_block(input) {
                    return true;
                }
            }
            Token::ParenthesisBlock | Token::SquareBracketBlock | Token::CurlyBracketBlock => {
                if scan_block(input) {
                    return true;
                }
            }
            _ => {}
        }
    }
}

fn scan_block<'i, 't>(input: &mut Parser<'i, 't>) -> bool {
    let nested: Result<bool, ParseError<()>> = input.parse_nested_block(|block| Ok(scan(block)));
    nested.unwrap_or(false)
}

fn is_hex_color(digits: &str) -> bool {
    matches!(digits.len(), 3 | 4 | 6 | 8) && digits.bytes().all(|b| b.is_ascii_hexdigit())
}

fn is_named_color(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    NAMED_COLORS.contains(&lower.as_str())
}

fn is_color_function(name: &str) -> bool {
    COLOR_FUNCTIONS
        .iter()
        .any(|function| name.eq_ignore_ascii_case(function))
}
