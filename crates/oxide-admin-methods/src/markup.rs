//! Markup stripping for truncated text columns.

use html2text::render::TrivialDecorator;

use crate::error::{Result, UnitError};

/// Converts markup to plain text.
pub trait MarkupStripper: Send + Sync {
    /// Returns the plain-text reading of `markup`.
    fn strip(&self, markup: &str) -> Result<String>;
}

impl<F> MarkupStripper for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn strip(&self, markup: &str) -> Result<String> {
        Ok(self(markup))
    }
}

/// Default stripper backed by an HTML parser.
///
/// Text is decoded as a browser would read it: entities become characters and
/// a `<` that does not open a tag stays literal text. Inline elements get no
/// decoration. Block elements keep their line structure. Lines are wrapped at
/// `width` columns, so the default is wide enough for any list column.
#[derive(Debug, Clone, Copy)]
pub struct HtmlToText {
    width: usize,
}

impl HtmlToText {
    /// Creates a stripper wrapping lines at `width` columns.
    pub fn new(width: usize) -> Self {
        Self { width }
    }
}

impl Default for HtmlToText {
    fn default() -> Self {
        Self::new(4096)
    }
}

impl MarkupStripper for HtmlToText {
    fn strip(&self, markup: &str) -> Result<String> {
        let text = html2text::from_read_with_decorator(
            markup.as_bytes(),
            self.width,
            TrivialDecorator::new(),
        )
        .map_err(|e| UnitError::Markup(e.to_string()))?;

        Ok(text
            .lines()
            .map(str::trim_end)
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string())
    }
}
