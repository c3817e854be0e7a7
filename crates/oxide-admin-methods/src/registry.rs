//! Reference host registry for produced units.
//!
//! Stores units by identity in registration order, the way an admin site
//! keeps `list_display` columns and the actions menu. Registering a second unit
//! under an existing identity replaces the first one in place.

use std::collections::HashMap;

use serde::Serialize;
use tracing::warn;

use crate::error::{Result, UnitError};
use crate::identity::Identity;
use crate::record::Record;
use crate::templates::html_escape;
use crate::unit::{ActionUnit, DisplayUnit, UnitInfo};
use crate::value::Value;

/// One rendered cell of a list row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cell {
    /// Identity of the unit that produced the cell.
    pub identity: Identity,
    /// Cell content, safe to embed in a page.
    pub html: String,
    /// Error message if the unit failed for this record.
    pub error: Option<String>,
}

/// Ordered registry of display columns and bulk actions.
#[derive(Debug, Clone, Default)]
pub struct UnitRegistry {
    columns: Vec<DisplayUnit>,
    column_index: HashMap<Identity, usize>,
    actions: Vec<ActionUnit>,
    action_index: HashMap<Identity, usize>,
}

impl UnitRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a display column.
    #[must_use]
    pub fn column(mut self, unit: DisplayUnit) -> Self {
        self.register_column(unit);
        self
    }

    /// Adds a bulk action.
    #[must_use]
    pub fn action(mut self, unit: ActionUnit) -> Self {
        self.register_action(unit);
        self
    }

    /// Adds a display column, returning the unit it replaced.
    pub fn register_column(&mut self, unit: DisplayUnit) -> Option<DisplayUnit> {
        upsert(&mut self.columns, &mut self.column_index, unit, DisplayUnit::identity)
    }

    /// Adds a bulk action, returning the unit it replaced.
    pub fn register_action(&mut self, unit: ActionUnit) -> Option<ActionUnit> {
        upsert(&mut self.actions, &mut self.action_index, unit, ActionUnit::identity)
    }

    /// Columns in registration order.
    pub fn columns(&self) -> &[DisplayUnit] {
        &self.columns
    }

    /// Looks up a column by identity.
    pub fn get_column(&self, identity: &str) -> Option<&DisplayUnit> {
        let id = Identity::parse(identity).ok()?;
        self.column_index.get(&id).map(|&i| &self.columns[i])
    }

    /// Looks up an action by identity.
    pub fn get_action(&self, identity: &str) -> Option<&ActionUnit> {
        let id = Identity::parse(identity).ok()?;
        self.action_index.get(&id).map(|&i| &self.actions[i])
    }

    /// Column header labels.
    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(DisplayUnit::label).collect()
    }

    /// `(identity, label)` pairs for an actions dropdown.
    pub fn action_choices(&self) -> Vec<(String, String)> {
        self.actions
            .iter()
            .map(|a| (a.identity().to_string(), a.label().to_string()))
            .collect()
    }

    /// Metadata for every column, for serialization to a front end.
    pub fn describe(&self) -> Vec<&UnitInfo> {
        self.columns.iter().map(DisplayUnit::info).collect()
    }

    /// Renders one record, one cell per column.
    ///
    /// Plain output is escaped; markup output passes through. A failing
    /// column yields an error cell and does not affect the other cells.
    pub fn render_row(&self, record: &dyn Record) -> Vec<Cell> {
        self.columns
            .iter()
            .map(|unit| match unit.call(record) {
                Ok(value) => Cell {
                    identity: unit.identity().clone(),
                    html: cell_html(unit, &value),
                    error: None,
                },
                Err(e) => {
                    warn!(column = %unit.identity(), error = %e, "column failed");
                    Cell {
                        identity: unit.identity().clone(),
                        html: "-".to_string(),
                        error: Some(e.to_string()),
                    }
                }
            })
            .collect()
    }

    /// Runs the named action over a batch.
    pub fn run_action<'a, R, I>(&self, identity: &str, batch: I) -> Result<usize>
    where
        R: Record + 'a,
        I: IntoIterator<Item = &'a mut R>,
    {
        self.get_action(identity)
            .ok_or_else(|| UnitError::ImproperlyConfigured(format!("unknown action: {identity}")))?
            .apply(batch)
    }
}

fn upsert<T>(
    units: &mut Vec<T>,
    index: &mut HashMap<Identity, usize>,
    unit: T,
    identity: fn(&T) -> &Identity,
) -> Option<T> {
    let id = identity(&unit).clone();
    match index.get(&id) {
        Some(&i) => Some(std::mem::replace(&mut units[i], unit)),
        None => {
            index.insert(id, units.len());
            units.push(unit);
            None
        }
    }
}

fn cell_html(unit: &DisplayUnit, value: &Value) -> String {
    if unit.renders_markup() || value.is_markup() {
        value.to_string()
    } else {
        html_escape(&value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions;
    use crate::fields;
    use crate::image::image_thumb;
    use crate::record::MapRecord;

    #[test]
    fn test_columns_in_order() {
        let registry = UnitRegistry::new()
            .column(fields::short_text("title").label("Title").build().unwrap())
            .column(fields::count("comments").build().unwrap());

        assert_eq!(registry.headers(), vec!["Title", "comments"]);
        assert!(registry.get_column("comments").is_some());
        assert!(registry.get_column("missing").is_none());
        assert!(registry.get_column("not an identity").is_none());
    }

    #[test]
    fn test_same_identity_overwrites() {
        let mut registry = UnitRegistry::new()
            .column(fields::short_text("title").length(3).build().unwrap())
            .column(fields::short_text("body").build().unwrap());

        let replaced = registry.register_column(fields::short_text("title").length(10).build().unwrap());
        assert!(replaced.is_some());
        assert_eq!(registry.columns().len(), 2);
        assert_eq!(registry.columns()[0].identity().as_str(), "title");

        let record = MapRecord::new("p").with("title", "Hello world!").with("body", "");
        let cells = registry.render_row(&record);
        assert_eq!(cells[0].html, "Hello worl...");
    }

    #[test]
    fn test_render_row_escapes_plain_text_only() {
        let registry = UnitRegistry::new()
            .column(fields::short_text("title").build().unwrap())
            .column(image_thumb("photo").no_image_text("none").build().unwrap());

        let record = MapRecord::new("p").with("title", "<b>x</b>");
        let cells = registry.render_row(&record);
        assert_eq!(cells[0].html, "&lt;b&gt;x&lt;/b&gt;");
        assert!(cells[1].html.starts_with("<span"));
    }

    #[test]
    fn test_failing_cell_does_not_abort_row() {
        let registry = UnitRegistry::new()
            .column(fields::attribute("author.name").build().unwrap())
            .column(fields::short_text("title").build().unwrap());

        let record = MapRecord::new("p").with("title", "Hello");
        let cells = registry.render_row(&record);
        assert!(cells[0].error.is_some());
        assert_eq!(cells[1].html, "Hello");
        assert!(cells[1].error.is_none());
    }

    #[test]
    fn test_actions() {
        let (on, off) = actions::true_false("published").build().unwrap();
        let registry = UnitRegistry::new()
            .action(actions::toggle("published").build().unwrap())
            .action(on)
            .action(off);

        assert_eq!(
            registry.action_choices(),
            vec![
                ("toggle_published".to_string(), "Toggle published".to_string()),
                ("set_as_published".to_string(), "Set as published".to_string()),
                ("set_as_non_published".to_string(), "Set as non published".to_string()),
            ]
        );

        let mut batch = vec![MapRecord::new("a").with("published", false)];
        assert_eq!(registry.run_action("set_as_published", &mut batch).unwrap(), 1);
        assert_eq!(batch[0].get("published"), Some(Value::Bool(true)));
        assert!(registry.run_action("nope", &mut batch).is_err());
    }
}
