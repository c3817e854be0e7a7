//! Dynamic values read from records.

use std::fmt;
use std::sync::Arc;

use tracing::warn;

use crate::error::Result;
use crate::record::{Record, Relation};

/// A value resolved from a record attribute.
#[derive(Clone)]
pub enum Value {
    /// Absent value.
    Null,
    /// Boolean.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// Plain text, escaped by the host before display.
    Text(String),
    /// Pre-rendered markup, passed through unescaped.
    Markup(String),
    /// A related record.
    Object(Arc<dyn Record>),
    /// A multi-valued relation.
    Relation(Arc<dyn Relation>),
    /// A zero-argument method.
    Callable(Callable),
}

impl Value {
    /// Wraps a record.
    pub fn object(record: impl Record + 'static) -> Self {
        Self::Object(Arc::new(record))
    }

    /// Wraps a relation.
    pub fn relation(relation: impl Relation + 'static) -> Self {
        Self::Relation(Arc::new(relation))
    }

    /// Wraps a zero-argument function.
    pub fn callable<F>(f: F) -> Self
    where
        F: Fn() -> Result<Value> + Send + Sync + 'static,
    {
        Self::Callable(Callable::new(f))
    }

    /// Returns whether the value must be invoked before use.
    pub fn is_callable(&self) -> bool {
        matches!(self, Self::Callable(_))
    }

    /// Invokes a callable, returning any other value unchanged.
    pub fn resolve(self) -> Result<Value> {
        match self {
            Self::Callable(c) => c.invoke(),
            other => Ok(other),
        }
    }

    /// Boolean reading of the value.
    pub fn truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Int(i) => *i != 0,
            Self::Float(f) => *f != 0.0,
            Self::Text(s) | Self::Markup(s) => !s.is_empty(),
            Self::Object(_) | Self::Relation(_) | Self::Callable(_) => true,
        }
    }

    /// Returns the related record, if this is one.
    pub fn as_object(&self) -> Option<&dyn Record> {
        match self {
            Self::Object(r) => Some(r.as_ref()),
            _ => None,
        }
    }

    /// Returns the relation, if this is one.
    pub fn as_relation(&self) -> Option<&dyn Relation> {
        match self {
            Self::Relation(r) => Some(r.as_ref()),
            _ => None,
        }
    }

    /// Returns whether the value is pre-rendered markup.
    pub fn is_markup(&self) -> bool {
        matches!(self, Self::Markup(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) | Self::Markup(s) => f.write_str(s),
            Self::Object(r) => f.write_str(&r.display()),
            Self::Relation(r) => {
                let mut first = true;
                for item in r.items() {
                    let item = match item {
                        Ok(item) => item,
                        Err(err) => {
                            warn!(error = %err, "skipping relation item that failed to load");
                            continue;
                        }
                    };
                    if !first {
                        f.write_str(", ")?;
                    }
                    first = false;
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            Self::Callable(_) => f.write_str("<callable>"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Self::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Self::Float(x) => f.debug_tuple("Float").field(x).finish(),
            Self::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Self::Markup(s) => f.debug_tuple("Markup").field(s).finish(),
            Self::Object(r) => f.debug_tuple("Object").field(&r.display()).finish(),
            Self::Relation(_) => f.write_str("Relation(..)"),
            Self::Callable(c) => f.debug_tuple("Callable").field(c).finish(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Text(a), Self::Text(b)) | (Self::Markup(a), Self::Markup(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => Arc::ptr_eq(a, b),
            (Self::Relation(a), Self::Relation(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

type CallableFn = dyn Fn() -> Result<Value> + Send + Sync;

/// A zero-argument method exposed by a record.
#[derive(Clone)]
pub struct Callable {
    func: Arc<CallableFn>,
    markup: bool,
}

impl Callable {
    /// Wraps a function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(f),
            markup: false,
        }
    }

    /// Flags the callable's output as pre-rendered markup.
    #[must_use]
    pub fn markup(mut self) -> Self {
        self.markup = true;
        self
    }

    /// Returns whether the callable declares markup output.
    pub fn renders_markup(&self) -> bool {
        self.markup
    }

    /// Calls the function.
    pub fn invoke(&self) -> Result<Value> {
        (self.func)()
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callable")
            .field("markup", &self.markup)
            .finish_non_exhaustive()
    }
}

impl From<Callable> for Value {
    fn from(c: Callable) -> Self {
        Self::Callable(c)
    }
}
