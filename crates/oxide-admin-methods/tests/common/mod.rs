#![allow(dead_code)]

use oxide_admin_methods::{MapRecord, Record, Result, UnitError, Value};

/// A blog post with an author, tags, comments and an optional cover image.
pub fn post(title: &str, comments: usize, cover: Option<&str>) -> MapRecord {
    let author = MapRecord::new("Alice")
        .with("name", "Alice")
        .with_method("profile", || {
            Ok(Value::object(MapRecord::new("profile").with("city", "Ghent")))
        });
    let tags = vec![tag("rust"), tag("web"), tag("admin")];
    let mut record = MapRecord::new(title)
        .with("title", title)
        .with("published", false)
        .with("published_url", "/admin/post/1/toggle/")
        .with("author", Value::object(author))
        .with("tags", tags)
        .with("comments", vec![Value::from("c"); comments]);
    if let Some(url) = cover {
        record = record.with("cover", Value::object(MapRecord::new("cover").with("url", url)));
    }
    record
}

pub fn tag(slug: &str) -> Value {
    Value::object(MapRecord::new(slug).with("slug", slug))
}

/// A record whose `save` fails, for partial-failure scenarios.
pub struct BrokenRecord {
    pub inner: MapRecord,
}

impl BrokenRecord {
    pub fn new(flag: bool) -> Self {
        Self {
            inner: MapRecord::new("broken").with("active", flag),
        }
    }
}

impl Record for BrokenRecord {
    fn get(&self, name: &str) -> Option<Value> {
        self.inner.get(name)
    }

    fn set(&mut self, name: &str, value: Value) -> Result<()> {
        self.inner.set(name, value)
    }

    fn save(&mut self) -> Result<()> {
        Err(UnitError::Persistence("database is read-only".to_string()))
    }

    fn display(&self) -> String {
        self.inner.display()
    }
}
