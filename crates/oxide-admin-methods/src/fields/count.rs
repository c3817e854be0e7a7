//! Relation cardinality column.

use crate::error::{Result, UnitError};
use crate::identity::bind;
use crate::unit::DisplayUnit;
use crate::value::Value;

use super::fetch;

/// Builder for a column showing how many items a relation holds.
///
/// The template is picked by cardinality: zero uses `format_none`, one uses
/// `format`, more uses `format_plural`. Both fall back to `format`. Every
/// `{}` or `{0}` in the chosen template is replaced by the count.
#[derive(Debug, Clone)]
pub struct Count {
    field: String,
    format: String,
    format_plural: Option<String>,
    format_none: Option<String>,
    name: String,
    label: String,
}

impl Count {
    /// Creates a builder with format `{}`.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            format: "{}".to_string(),
            format_plural: None,
            format_none: None,
            name: String::new(),
            label: String::new(),
        }
    }

    /// Template for exactly one item, and the default for the others.
    #[must_use]
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    /// Template for more than one item.
    #[must_use]
    pub fn format_plural(mut self, format: impl Into<String>) -> Self {
        self.format_plural = Some(format.into());
        self
    }

    /// Template for zero items.
    #[must_use]
    pub fn format_none(mut self, format: impl Into<String>) -> Self {
        self.format_none = Some(format.into());
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
            format,
            format_plural,
            format_none,
            ..
        } = self;
        let plural = format_plural.unwrap_or_else(|| format.clone());
        let none = format_none.unwrap_or_else(|| format.clone());

        Ok(DisplayUnit::new(binding, &[], move |record| {
            let related = fetch(record, &field)?;
            let relation = related.as_relation().ok_or_else(|| UnitError::UnexpectedValue {
                field: field.clone(),
                expected: "a relation",
            })?;
            let n = relation.count()?;
            let template = match n {
                0 => &none,
                1 => &format,
                _ => &plural,
            };
            Ok(Value::Text(apply_count(template, n)))
        }))
    }
}

fn apply_count(template: &str, n: usize) -> String {
    let n = n.to_string();
    template.replace("{0}", &n).replace("{}", &n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::MapRecord;

    fn post_with_comments(n: usize) -> MapRecord {
        let comments: Vec<Value> = (0..n).map(|i| Value::from(format!("c{i}"))).collect();
        MapRecord::new("post").with("comments", comments)
    }

    #[test]
    fn test_three_way_format() {
        let unit = Count::new("comments")
            .format("{} item")
            .format_plural("{} items")
            .format_none("none")
            .build()
            .unwrap();

        assert_eq!(unit.call(&post_with_comments(0)).unwrap(), Value::from("none"));
        assert_eq!(unit.call(&post_with_comments(1)).unwrap(), Value::from("1 item"));
        assert_eq!(unit.call(&post_with_comments(5)).unwrap(), Value::from("5 items"));
    }

    #[test]
    fn test_defaults_fall_back_to_format() {
        let unit = Count::new("comments").build().unwrap();
        assert_eq!(unit.call(&post_with_comments(0)).unwrap(), Value::from("0"));
        assert_eq!(unit.call(&post_with_comments(4)).unwrap(), Value::from("4"));

        let unit = Count::new("comments").format("{0} comment(s)").build().unwrap();
        assert_eq!(
            unit.call(&post_with_comments(2)).unwrap(),
            Value::from("2 comment(s)")
        );
    }

    #[test]
    fn test_non_relation_field() {
        let unit = Count::new("title").build().unwrap();
        let record = MapRecord::new("post").with("title", "Hello");
        let err = unit.call(&record).unwrap_err();
        assert!(matches!(err, UnitError::UnexpectedValue { .. }));
    }

    #[test]
    fn test_relation_method() {
        let unit = Count::new("tags").build().unwrap();
        let record = MapRecord::new("post")
            .with_method("tags", || Ok(Value::from(vec![Value::from("a"), Value::from("b")])));
        assert_eq!(unit.call(&record).unwrap(), Value::from("2"));
    }
}
