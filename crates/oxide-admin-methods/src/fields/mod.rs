//! List and detail display units.
//!
//! Each entry point returns a builder; `build()` validates the identity and
//! returns a [`DisplayUnit`](crate::unit::DisplayUnit).

mod attribute;
mod count;
mod list;
mod short_text;

pub use attribute::Attribute;
pub use count::Count;
pub use list::List;
pub use short_text::ShortText;

use crate::error::{Result, UnitError};
use crate::record::Record;
use crate::value::Value;

/// Truncated text column for `field`.
pub fn short_text(field: impl Into<String>) -> ShortText {
    ShortText::new(field)
}

/// Cardinality column for the relation `field`.
pub fn count(field: impl Into<String>) -> Count {
    Count::new(field)
}

/// Joined item list for the relation `relation`.
pub fn list(relation: impl Into<String>) -> List {
    List::new(relation)
}

/// Nested lookup along a dotted path such as `author.profile.name`.
pub fn attribute(path: impl Into<String>) -> Attribute {
    Attribute::new(path)
}

/// Reads `field` from the record, invoking it if it is a method.
pub(crate) fn fetch(record: &dyn Record, field: &str) -> Result<Value> {
    record
        .get(field)
        .ok_or_else(|| UnitError::missing(field, field))?
        .resolve()
}

/// Walks `segments` from the record, invoking callables along the way.
pub(crate) fn walk(record: &dyn Record, segments: &[String], path: &str) -> Result<Value> {
    let mut current: Option<Value> = None;
    for segment in segments {
        let next = match &current {
            None => record.get(segment),
            Some(value) => value.as_object().and_then(|obj| obj.get(segment)),
        };
        let next = next.ok_or_else(|| UnitError::missing(segment, path))?;
        current = Some(next.resolve()?);
    }
    current.ok_or_else(|| UnitError::ImproperlyConfigured(format!("empty attribute path {path:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::MapRecord;

    #[test]
    fn test_fetch_invokes_methods() {
        let record = MapRecord::new("r").with_method("total", || Ok(Value::from(3)));
        assert_eq!(fetch(&record, "total").unwrap(), Value::Int(3));
        assert!(fetch(&record, "nope").is_err());
    }

    #[test]
    fn test_walk_stops_at_non_objects() {
        let record = MapRecord::new("r").with("title", "Hello");
        let segments = vec!["title".to_string(), "len".to_string()];
        let err = walk(&record, &segments, "title.len").unwrap_err();
        assert!(
            matches!(err, UnitError::AttributeResolution { ref segment, .. } if segment == "len")
        );
    }
}
