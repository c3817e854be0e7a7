//! Bulk actions that flip or force a boolean field.
//!
//! ```
//! use oxide_admin_methods::actions;
//! use oxide_admin_methods::record::MapRecord;
//!
//! let (publish, unpublish) = actions::true_false("published").build().unwrap();
//! assert_eq!(publish.label(), "Set as published");
//! assert_eq!(unpublish.identity().as_str(), "set_as_non_published");
//!
//! let mut posts = vec![MapRecord::new("a").with("published", false)];
//! assert_eq!(publish.apply(&mut posts).unwrap(), 1);
//! ```

use std::sync::Arc;

use crate::error::{Result, UnitError};
use crate::identity::{bind, LabelRule};
use crate::record::Record;
use crate::unit::ActionUnit;
use crate::value::Value;

/// Starts a toggle action for `field`.
pub fn toggle(field: impl Into<String>) -> Toggle {
    Toggle::new(field)
}

/// Starts a set-true/set-false action pair for `field`.
pub fn true_false(field: impl Into<String>) -> TrueFalse {
    TrueFalse::new(field)
}

/// Builder for an action that negates a boolean field on every selected record.
#[derive(Debug, Clone)]
pub struct Toggle {
    field: String,
    name: String,
    label: String,
}

impl Toggle {
    /// Creates a new toggle action builder.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            name: String::new(),
            label: String::new(),
        }
    }

    /// Sets the action identity. Defaults to `toggle_<field>`.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the menu label. Defaults to the humanized identity.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Builds the action unit.
    pub fn build(self) -> Result<ActionUnit> {
        let binding = bind(
            &self.name,
            &self.label,
            &format!("toggle_{}", self.field),
            Some(&LabelRule::Humanize),
        )?;
        let field = self.field;
        Ok(ActionUnit::new(binding, move |record| {
            let current = record
                .get(&field)
                .ok_or_else(|| UnitError::missing(&field, &field))?
                .resolve()?;
            write_and_save(record, &field, !current.truthy())
        }))
    }
}

/// Builder for a pair of actions forcing a boolean field true or false.
#[derive(Debug, Clone)]
pub struct TrueFalse {
    field: String,
    true_name: String,
    true_label: String,
    false_name: String,
    false_label: String,
}

impl TrueFalse {
    /// Creates a new action pair builder.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            true_name: String::new(),
            true_label: String::new(),
            false_name: String::new(),
            false_label: String::new(),
        }
    }

    /// Sets the identity of the set-true action. Defaults to `set_as_<field>`.
    #[must_use]
    pub fn true_name(mut self, name: impl Into<String>) -> Self {
        self.true_name = name.into();
        self
    }

    /// Sets the label of the set-true action.
    #[must_use]
    pub fn true_label(mut self, label: impl Into<String>) -> Self {
        self.true_label = label.into();
        self
    }

    /// Sets the identity of the set-false action. Defaults to `set_as_non_<field>`.
    #[must_use]
    pub fn false_name(mut self, name: impl Into<String>) -> Self {
        self.false_name = name.into();
        self
    }

    /// Sets the label of the set-false action.
    #[must_use]
    pub fn false_label(mut self, label: impl Into<String>) -> Self {
        self.false_label = label.into();
        self
    }

    /// Builds the `(set_true, set_false)` pair.
    pub fn build(self) -> Result<(ActionUnit, ActionUnit)> {
        let rule = LabelRule::Humanize;
        let true_binding = bind(
            &self.true_name,
            &self.true_label,
            &format!("set_as_{}", self.field),
            Some(&rule),
        )?;
        let false_binding = bind(
            &self.false_name,
            &self.false_label,
            &format!("set_as_non_{}", self.field),
            Some(&rule),
        )?;

        let setter = Arc::new(BoolSetter { field: self.field });
        let on = Arc::clone(&setter);
        let off = setter;

        Ok((
            ActionUnit::new(true_binding, move |record| on.apply(record, true)),
            ActionUnit::new(false_binding, move |record| off.apply(record, false)),
        ))
    }
}

/// Shared setter behind both halves of a [`TrueFalse`] pair.
#[derive(Debug)]
struct BoolSetter {
    field: String,
}

impl BoolSetter {
    fn apply(&self, record: &mut dyn Record, direction: bool) -> Result<()> {
        if record.get(&self.field).is_none() {
            return Err(UnitError::missing(&self.field, &self.field));
        }
        write_and_save(record, &self.field, direction)
    }
}

fn write_and_save(record: &mut dyn Record, field: &str, value: bool) -> Result<()> {
    record.set(field, Value::Bool(value))?;
    record.save()
}
