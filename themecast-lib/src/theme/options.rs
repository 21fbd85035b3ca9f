//! Extraction options.
//!
//! The whole configuration surface round-trips through serde, so a JSON
//! config file and programmatic construction produce identical behavior.
//! Field names follow the JSON camelCase convention (`saveProps`,
//! `fileName`).

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::paths;

/// How the theme token is written into a selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// `[value]`, the value taken verbatim as the attribute expression.
    Attribute,
    /// `.value`
    #[default]
    Class,
    /// `#value`
    Id,
    /// `value`
    Tag,
}

impl FromStr for TokenKind {
    type Err = Error;

    /// Parses a kind name, case-insensitively. `classname` is accepted as
    /// an alias for `class`.
    fn from_str(s: &str) -> Result<Self, Error> {
        match s.to_ascii_lowercase().as_str() {
            "attribute" => Ok(TokenKind::Attribute),
            "class" | "classname" => Ok(TokenKind::Class),
            "id" => Ok(TokenKind::Id),
            "tag" => Ok(TokenKind::Tag),
            _ => Err(Error::UnsupportedTokenKind {
                kind: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Attribute => "attribute",
            TokenKind::Class => "class",
            TokenKind::Id => "id",
            TokenKind::Tag => "tag",
        };
        f.write_str(name)
    }
}

/// Where and how the theme token lands in each rewritten selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorOptions {
    /// With no replace-token match: prepend the token as an ancestor
    /// (`true`) or compound it onto the selector head (`false`).
    pub before: bool,
    pub kind: TokenKind,
    /// Theme token value; must not be blank.
    pub value: String,
    /// Selector tokens replaced by the theme token, compared against
    /// their serialized text, case-insensitively.
    pub replace: Vec<String>,
}

impl Default for SelectorOptions {
    fn default() -> Self {
        SelectorOptions {
            before: true,
            kind: TokenKind::Class,
            value: "theme".to_string(),
            replace: vec!["html".to_string(), ":root".to_string()],
        }
    }
}

/// What happens to the routed declarations once the document is rewritten.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractMode {
    /// Reinsert the grouped theme rules at the end of the document.
    #[default]
    Off,
    /// Emit the grouped rules as a named side asset.
    #[serde(rename_all = "camelCase")]
    File {
        /// Asset name template; `[name]` and `[suffix]` are substituted
        /// case-insensitively.
        #[serde(default)]
        file_name: Option<String>,
    },
}

/// Top-level extraction options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    pub extract: ExtractMode,
    /// Keep routed declarations in the source document as well.
    pub save_props: bool,
    pub selector: SelectorOptions,
}

/// Identifies the stylesheet being processed; file-mode extraction names
/// its asset after this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceContext {
    /// Path of the stylesheet as the build knows it.
    pub path: PathBuf,
    /// Project root that asset names are computed relative to.
    pub root: Option<PathBuf>,
}

impl SourceContext {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SourceContext {
            path: path.into(),
            root: None,
        }
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// The source path relative to the configured root, or as given when
    /// no root is set.
    pub(crate) fn relative_path(&self) -> PathBuf {
        match &self.root {
            Some(root) => paths::relative(root, &self.path),
            None => self.path.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_the_documented_surface() {
        let options = Options::default();
        assert_eq!(options.extract, ExtractMode::Off);
        assert!(!options.save_props);
        assert!(options.selector.before);
        assert_eq!(options.selector.kind, TokenKind::Class);
        assert_eq!(options.selector.value, "theme");
        assert_eq!(options.selector.replace, vec!["html", ":root"]);
    }

    #[test]
    fn empty_json_object_is_the_default() {
        let options: Options = serde_json::from_str("{}").unwrap();
        assert_eq!(options, Options::default());
    }

    #[test]
    fn full_config_round_trips() {
        let json = r#"{
            "extract": { "file": { "fileName": "[name].[suffix].css" } },
            "saveProps": true,
            "selector": {
                "before": false,
                "kind": "attribute",
                "value": "data-theme=\"dark\"",
                "replace": [":root"]
            }
        }"#;
        let options: Options = serde_json::from_str(json).unwrap();
        assert_eq!(
            options.extract,
            ExtractMode::File {
                file_name: Some("[name].[suffix].css".to_string())
            }
        );
        assert!(options.save_props);
        assert!(!options.selector.before);
        assert_eq!(options.selector.kind, TokenKind::Attribute);
    }

    #[test]
    fn file_mode_with_no_template_parses() {
        let options: Options = serde_json::from_str(r#"{ "extract": { "file": {} } }"#).unwrap();
        assert_eq!(options.extract, ExtractMode::File { file_name: None });
    }

    #[test]
    fn kind_parses_case_insensitively_with_alias() {
        assert_eq!("Tag".parse::<TokenKind>().unwrap(), TokenKind::Tag);
        assert_eq!("className".parse::<TokenKind>().unwrap(), TokenKind::Class);
    }

    #[test]
    fn unknown_kind_is_reported_by_name() {
        let err = "element".parse::<TokenKind>().unwrap_err();
        assert_eq!(
            err,
            Error::UnsupportedTokenKind {
                kind: "element".to_string()
            }
        );
    }

    // Test that the serde-side rejection also names the supported kinds.
    #[test]
    fn unknown_kind_in_json_is_rejected() {
        let err = serde_json::from_str::<Options>(r#"{ "selector": { "kind": "element" } }"#)
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("element"), "got: {message}");
        assert!(message.contains("attribute"), "got: {message}");
    }
}
