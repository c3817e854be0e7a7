//! Record store collaborators.
//!
//! Units never know the concrete model type they run against. A host exposes
//! its models through [`Record`], and multi-valued relations through
//! [`Relation`]. [`MapRecord`] and [`VecRelation`] are mapping-table
//! implementations for hosts without reflection, and for tests.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::{Result, UnitError};
use crate::value::{Callable, Value};

/// A model instance with dynamically named attributes.
pub trait Record: Send + Sync {
    /// Returns the attribute, or `None` if the record has no such attribute.
    fn get(&self, name: &str) -> Option<Value>;

    /// Assigns an attribute in memory.
    fn set(&mut self, name: &str, _value: Value) -> Result<()> {
        Err(UnitError::ReadOnly(name.to_string()))
    }

    /// Persists the record.
    fn save(&mut self) -> Result<()>;

    /// Default string conversion, used when no attribute is requested.
    fn display(&self) -> String;
}

impl<T: Record + ?Sized> Record for Box<T> {
    fn get(&self, name: &str) -> Option<Value> {
        (**self).get(name)
    }

    fn set(&mut self, name: &str, value: Value) -> Result<()> {
        (**self).set(name, value)
    }

    fn save(&mut self) -> Result<()> {
        (**self).save()
    }

    fn display(&self) -> String {
        (**self).display()
    }
}

/// A multi-valued relation such as a reverse foreign key.
pub trait Relation: Send + Sync {
    /// Number of related items.
    fn count(&self) -> Result<usize>;

    /// Related items in relation order. Items are produced lazily.
    fn items(&self) -> Box<dyn Iterator<Item = Result<Value>> + '_>;

    /// Collects at most `limit` items. Items past the limit are never pulled.
    fn list(&self, limit: Option<usize>) -> Result<Vec<Value>> {
        match limit {
            Some(n) => self.items().take(n).collect(),
            None => self.items().collect(),
        }
    }
}

/// A record backed by an attribute map.
#[derive(Debug, Clone, Default)]
pub struct MapRecord {
    display: String,
    attrs: BTreeMap<String, Value>,
    saves: usize,
}

impl MapRecord {
    /// Creates an empty record with the given string representation.
    pub fn new(display: impl Into<String>) -> Self {
        Self {
            display: display.into(),
            attrs: BTreeMap::new(),
            saves: 0,
        }
    }

    /// Adds an attribute.
    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.attrs.insert(name.to_string(), value.into());
        self
    }

    /// Adds a zero-argument method.
    #[must_use]
    pub fn with_method<F>(self, name: &str, f: F) -> Self
    where
        F: Fn() -> Result<Value> + Send + Sync + 'static,
    {
        self.with(name, Callable::new(f))
    }

    /// Builds a record from a JSON object.
    ///
    /// Nested objects become related records and arrays become relations.
    /// A nested object's string form is its `__str__` member if present.
    pub fn from_json(display: impl Into<String>, json: serde_json::Value) -> Result<Self> {
        let serde_json::Value::Object(map) = json else {
            return Err(UnitError::UnexpectedValue {
                field: "<root>".to_string(),
                expected: "a JSON object",
            });
        };
        let mut record = Self::new(display);
        for (name, value) in map {
            record.attrs.insert(name, json_to_value(value));
        }
        Ok(record)
    }

    /// Number of times the record has been saved.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl Record for MapRecord {
    fn get(&self, name: &str) -> Option<Value> {
        self.attrs.get(name).cloned()
    }

    fn set(&mut self, name: &str, value: Value) -> Result<()> {
        self.attrs.insert(name.to_string(), value);
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        self.saves += 1;
        Ok(())
    }

    fn display(&self) -> String {
        self.display.clone()
    }
}

fn json_to_value(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => n
            .as_i64()
            .map(Value::Int)
            .or_else(|| n.as_f64().map(Value::Float))
            .unwrap_or(Value::Null),
        serde_json::Value::String(s) => Value::Text(s),
        serde_json::Value::Array(items) => {
            Value::relation(VecRelation::new(items.into_iter().map(json_to_value).collect()))
        }
        serde_json::Value::Object(map) => {
            let display = map
                .get("__str__")
                .and_then(serde_json::Value::as_str)
                .unwrap_or_default()
                .to_string();
            let mut record = MapRecord::new(display);
            for (name, value) in map {
                record.attrs.insert(name, json_to_value(value));
            }
            Value::object(record)
        }
    }
}

/// An in-memory relation.
#[derive(Debug, Clone, Default)]
pub struct VecRelation {
    items: Vec<Value>,
}

impl VecRelation {
    /// Creates a relation over the given items.
    pub fn new(items: Vec<Value>) -> Self {
        Self { items }
    }
}

impl Relation for VecRelation {
    fn count(&self) -> Result<usize> {
        Ok(self.items.len())
    }

    fn items(&self) -> Box<dyn Iterator<Item = Result<Value>> + '_> {
        Box::new(self.items.iter().cloned().map(Ok))
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Relation(Arc::new(VecRelation::new(items)))
    }
}
