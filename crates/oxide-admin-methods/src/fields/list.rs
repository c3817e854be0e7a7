//! Joined relation items.

use crate::error::{Result, UnitError};
use crate::identity::bind;
use crate::unit::DisplayUnit;
use crate::value::Value;

use super::fetch;

/// Builder for a column listing a relation's items as one string.
///
/// With `item_attribute` set, each item contributes that attribute instead of
/// its string form. Method-backed items are invoked first. When a method is
/// flagged as markup, or an item already is markup, the output for that
/// record is returned as [`Value::Markup`]. If methods disagree, the last
/// method-backed item decides.
#[derive(Debug, Clone)]
pub struct List {
    relation: String,
    separator: String,
    item_attribute: Option<String>,
    limit: Option<usize>,
    name: String,
    label: String,
}

impl List {
    /// Creates a builder with separator `", "` and no limit.
    pub fn new(relation: impl Into<String>) -> Self {
        Self {
            relation: relation.into(),
            separator: ", ".to_string(),
            item_attribute: None,
            limit: None,
            name: String::new(),
            label: String::new(),
        }
    }

    /// Text placed between items.
    #[must_use]
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Attribute read on every item.
    #[must_use]
    pub fn item_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.item_attribute = Some(attribute.into());
        self
    }

    /// Maximum number of items shown, in relation order.
    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the identity. Defaults to the relation name.
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
        let binding = bind(&self.name, &self.label, &self.relation, None)?;
        let Self {
            relation,
            separator,
            item_attribute,
            limit,
            ..
        } = self;

        Ok(DisplayUnit::new(binding, &[], move |record| {
            let related = fetch(record, &relation)?;
            let items = related
                .as_relation()
                .ok_or_else(|| UnitError::UnexpectedValue {
                    field: relation.clone(),
                    expected: "a relation",
                })?
                .list(limit)?;

            let mut markup = false;
            let mut parts = Vec::with_capacity(items.len());
            for item in items {
                let value = match item_attribute.as_deref() {
                    Some(attribute) => item
                        .as_object()
                        .and_then(|obj| obj.get(attribute))
                        .ok_or_else(|| {
                            UnitError::missing(attribute, format!("{relation}.{attribute}"))
                        })?,
                    None => item,
                };
                let value = match value {
                    Value::Callable(method) => {
                        markup = method.renders_markup();
                        method.invoke()?
                    }
                    other => other,
                };
                markup |= value.is_markup();
                parts.push(value.to_string());
            }

            let joined = parts.join(&separator);
            Ok(if markup {
                Value::Markup(joined)
            } else {
                Value::Text(joined)
            })
        }))
    }
}
