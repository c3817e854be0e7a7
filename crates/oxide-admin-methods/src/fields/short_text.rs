//! Truncated text column.

use std::sync::Arc;

use crate::error::Result;
use crate::identity::bind;
use crate::markup::{HtmlToText, MarkupStripper};
use crate::unit::DisplayUnit;
use crate::value::Value;

use super::fetch;

/// Builder for a column showing at most `length` characters of a text field.
#[derive(Clone)]
pub struct ShortText {
    field: String,
    length: usize,
    suffix: String,
    strip_markup: bool,
    stripper: Arc<dyn MarkupStripper>,
    name: String,
    label: String,
}

impl ShortText {
    /// Creates a builder with length 200 and suffix `...`.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            length: 200,
            suffix: "...".to_string(),
            strip_markup: false,
            stripper: Arc::new(HtmlToText::default()),
            name: String::new(),
            label: String::new(),
        }
    }

    /// Maximum number of characters kept.
    #[must_use]
    pub fn length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    /// Text appended when truncating.
    #[must_use]
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Converts markup to plain text before measuring.
    #[must_use]
    pub fn strip_markup(mut self, strip: bool) -> Self {
        self.strip_markup = strip;
        self
    }

    /// Replaces the default [`HtmlToText`] stripper.
    #[must_use]
    pub fn stripper(mut self, stripper: impl MarkupStripper + 'static) -> Self {
        self.stripper = Arc::new(stripper);
        self
    }

    /// Sets the identity. Defaults to the field name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the header label. Defaults to the identity.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Builds the display unit.
    pub fn build(self) -> Result<DisplayUnit> {
        let binding = bind(&self.name, &self.label, &self.field, None)?;
        let Self {
            field,
            length,
            suffix,
            strip_markup,
            stripper,
            ..
        } = self;

        Ok(DisplayUnit::new(binding, &[], move |record| {
            let mut text = fetch(record, &field)?.to_string();
            if strip_markup {
                text = stripper.strip(&text)?;
            }
            Ok(Value::Text(truncate(&text, length, &suffix)))
        }))
    }
}

/// Keeps the first `length` characters and appends `suffix` if anything was cut.
pub(crate) fn truncate(text: &str, length: usize, suffix: &str) -> String {
    match text.char_indices().nth(length) {
        Some((cut, _)) => format!("{}{suffix}", &text[..cut]),
        None => text.to_string(),
    }
}
