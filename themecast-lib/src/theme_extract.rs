//! The extraction pipeline, end to end: parse, route, emit.

use log::debug;

use crate::css;
use crate::error::Error;
use crate::theme::emit::{self, ThemeAsset};
use crate::theme::options::{ExtractMode, Options, SourceContext};
use crate::theme::rewrite::SelectorRewriter;
use crate::theme::router;

/// A configured theme extraction.
///
/// Holds no per-document state; one extractor can process any number of
/// stylesheets.
#[derive(Debug, Clone)]
pub struct ThemeExtractor {
    options: Options,
    rewriter: SelectorRewriter,
}

/// The result of processing one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOutput {
    /// The rewritten document.
    pub css: String,
    /// The extracted side asset. Always present in file mode, even when
    /// nothing was routed; always absent otherwise.
    pub asset: Option<ThemeAsset>,
}

/// The payload handed to a `process_with` callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedTheme {
    /// Blob-serialized theme rules.
    pub content: String,
    /// The source context the caller supplied, passed back through.
    pub source: Option<SourceContext>,
}

impl ThemeExtractor {
    /// Validates the options and builds the extractor.
    ///
    /// Fails with [`Error::EmptySelectorValue`] when the theme token value
    /// is blank; nothing is ever processed with an unusable token.
    pub fn new(options: Options) -> Result<Self, Error> {
        if options.selector.value.trim().is_empty() {
            return Err(Error::EmptySelectorValue);
        }
        let rewriter = SelectorRewriter::new(&options.selector);
        Ok(ThemeExtractor { options, rewriter })
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Transforms one document.
    ///
    /// With extraction off, the routed theme rules are reinserted at the
    /// end of the document and no asset is produced. In file mode they
    /// are serialized into [`TransformOutput::asset`] instead, named
    /// after `source`, which must then be provided.
    pub fn process(
        &self,
        css_text: &str,
        source: Option<&SourceContext>,
    ) -> Result<TransformOutput, Error> {
        let mut stylesheet = css::parse_stylesheet(css_text)?;
        let groups = router::route(&mut stylesheet, &self.rewriter, self.options.save_props);
        let asset = match &self.options.extract {
            ExtractMode::Off => {
                emit::reinsert_groups(&mut stylesheet, groups);
                None
            }
            ExtractMode::File { file_name } => {
                let source = source.ok_or(Error::MissingSource)?;
                let content = emit::serialize_groups(&groups);
                let file = emit::asset_file_name(
                    file_name.as_deref(),
                    source,
                    &self.options.selector.value,
                );
                debug!("extracted theme asset {} ({} bytes)", file, content.len());
                Some(ThemeAsset { file, content })
            }
        };
        Ok(TransformOutput {
            css: css::to_css(&stylesheet),
            asset,
        })
    }

    /// Transforms one document, handing the extracted theme to `callback`
    /// instead of emitting it, and returns the rewritten document.
    ///
    /// The callback always runs exactly once, after all routing is done,
    /// and receives the same blob a file asset would carry.
    pub fn process_with<F>(
        &self,
        css_text: &str,
        source: Option<&SourceContext>,
        mut callback: F,
    ) -> Result<String, Error>
    where
        F: FnMut(ExtractedTheme),
    {
        let mut stylesheet = css::parse_stylesheet(css_text)?;
        let groups = router::route(&mut stylesheet, &self.rewriter, self.options.save_props);
        callback(ExtractedTheme {
            content: emit::serialize_groups(&groups),
            source: source.cloned(),
        });
        Ok(css::to_css(&stylesheet))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::options::SelectorOptions;

    #[test]
    fn blank_selector_value_is_rejected_up_front() {
        let options = Options {
            selector: SelectorOptions {
                value: "   ".to_string(),
                ..SelectorOptions::default()
            },
            ..Options::default()
        };
        assert_eq!(
            ThemeExtractor::new(options).unwrap_err(),
            Error::EmptySelectorValue
        );
    }

    #[test]
    fn file_mode_without_a_source_fails() {
        let options = Options {
            extract: ExtractMode::File { file_name: None },
            ..Options::default()
        };
        let extractor = ThemeExtractor::new(options).unwrap();
        assert_eq!(
            extractor.process("a { color: red }", None).unwrap_err(),
            Error::MissingSource
        );
    }

    #[test]
    fn off_mode_produces_no_asset() {
        let extractor = ThemeExtractor::new(Options::default()).unwrap();
        let output = extractor.process("a { color: red }", None).unwrap();
        assert!(output.asset.is_none());
        assert!(output.css.contains(".theme a"));
    }
}
