//! Nested attribute lookup.

use crate::error::{Result, UnitError};
use crate::identity::{bind, path_identity};
use crate::unit::DisplayUnit;

use super::walk;

/// Builder for a column that follows a dotted path from the record.
///
/// Each segment is looked up on the running value; methods are invoked with no
/// arguments and the walk continues from their result. The path is split once
/// at build time and walked afresh for every record.
#[derive(Debug, Clone)]
pub struct Attribute {
    path: String,
    name: String,
    label: String,
}

impl Attribute {
    /// Creates a builder for `path`.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: String::new(),
            label: String::new(),
        }
    }

    /// Sets the identity. Defaults to the path with `.` replaced by `__`.
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
        let segments: Vec<String> = self.path.split('.').map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(UnitError::ImproperlyConfigured(format!(
                "attribute path {:?} has an empty segment",
                self.path
            )));
        }

        let binding = bind(&self.name, &self.label, &path_identity(&self.path), None)?;
        let path = self.path;
        Ok(DisplayUnit::new(binding, &[], move |record| {
            walk(record, &segments, &path)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::MapRecord;
    use crate::value::Value;

    fn post() -> MapRecord {
        let profile = MapRecord::new("profile").with("city", "Ghent");
        let author = MapRecord::new("Alice")
            .with("name", "Alice")
            .with("profile", Value::object(profile));
        MapRecord::new("post").with("author", Value::object(author))
    }

    #[test]
    fn test_nested_lookup() {
        let unit = Attribute::new("author.profile.city").build().unwrap();
        assert_eq!(unit.identity().as_str(), "author__profile__city");
        assert_eq!(unit.call(&post()).unwrap(), Value::from("Ghent"));
    }

    #[test]
    fn test_callable_segment() {
        let b = Value::object(MapRecord::new("b").with("c", 42));
        let a = MapRecord::new("a").with_method("b", move || Ok(b.clone()));
        let record = MapRecord::new("r").with("a", Value::object(a));

        let unit = Attribute::new("a.b.c").build().unwrap();
        assert_eq!(unit.call(&record).unwrap(), Value::Int(42));
    }

    #[test]
    fn test_broken_path_names_segment() {
        let record = MapRecord::new("r").with("a", Value::object(MapRecord::new("a")));
        let unit = Attribute::new("a.b.c").build().unwrap();
        match unit.call(&record).unwrap_err() {
            UnitError::AttributeResolution { segment, path } => {
                assert_eq!(segment, "b");
                assert_eq!(path, "a.b.c");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_single_segment() {
        let unit = Attribute::new("author").label("Author").build().unwrap();
        assert_eq!(unit.label(), "Author");
        assert_eq!(unit.call(&post()).unwrap().to_string(), "Alice");
    }

    #[test]
    fn test_empty_segment_rejected() {
        assert!(matches!(
            Attribute::new("a..b").build(),
            Err(UnitError::ImproperlyConfigured(_))
        ));
        assert!(Attribute::new("").build().is_err());
    }

    #[test]
    fn test_non_ascii_path_needs_explicit_name() {
        assert!(matches!(
            Attribute::new("auteur.prénom").build(),
            Err(UnitError::InvalidIdentity { .. })
        ));
        assert!(Attribute::new("auteur.prénom").name("author_first_name").build().is_ok());
    }
}
