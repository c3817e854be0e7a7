//! Inline toggle control for a boolean field.
//!
//! Unlike the bulk [`toggle`](crate::actions::toggle) action, this unit does
//! not mutate anything. It renders the current state and a link to an
//! endpoint, served by the host, that performs the change.

use std::sync::Arc;

use crate::error::{Result, UnitError};
use crate::fields::fetch;
use crate::identity::{bind, LabelRule};
use crate::templates::{Bindings, BuiltinTemplates, TemplateRenderer, TOGGLE_TEMPLATE};
use crate::unit::{DisplayUnit, Tag};
use crate::value::Value;

/// Starts a toggle display unit for `field`.
pub fn toggle_display(field: impl Into<String>) -> ToggleDisplay {
    ToggleDisplay::new(field)
}

/// Builder for an inline state badge with a toggle link.
///
/// The template receives `record` (the record's string form), `label` (the
/// current-state label), `url`, `state` and `field`.
#[derive(Clone)]
pub struct ToggleDisplay {
    field: String,
    url_field: Option<String>,
    name: String,
    label_true: String,
    label_false: String,
    header_label: String,
    template: String,
    renderer: Arc<dyn TemplateRenderer>,
}

impl ToggleDisplay {
    /// Creates a builder using the stock template.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            url_field: None,
            name: String::new(),
            label_true: "Yes".to_string(),
            label_false: "No".to_string(),
            header_label: String::new(),
            template: TOGGLE_TEMPLATE.to_string(),
            renderer: Arc::new(BuiltinTemplates),
        }
    }

    /// Attribute holding the toggle URL. Defaults to `<field>_url`.
    #[must_use]
    pub fn url_field(mut self, url_field: impl Into<String>) -> Self {
        self.url_field = Some(url_field.into());
        self
    }

    /// Sets the identity. Defaults to `<field>_toggle`.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Label shown when the field is true.
    #[must_use]
    pub fn label_true(mut self, label: impl Into<String>) -> Self {
        self.label_true = label.into();
        self
    }

    /// Label shown when the field is false.
    #[must_use]
    pub fn label_false(mut self, label: impl Into<String>) -> Self {
        self.label_false = label.into();
        self
    }

    /// Column header. Defaults to the humanized identity.
    #[must_use]
    pub fn header_label(mut self, label: impl Into<String>) -> Self {
        self.header_label = label.into();
        self
    }

    /// Template path handed to the renderer.
    #[must_use]
    pub fn template(mut self, path: impl Into<String>) -> Self {
        self.template = path.into();
        self
    }

    /// Replaces the stock renderer.
    #[must_use]
    pub fn renderer(mut self, renderer: Arc<dyn TemplateRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Builds the display unit.
    pub fn build(self) -> Result<DisplayUnit> {
        let binding = bind(
            &self.name,
            &self.header_label,
            &format!("{}_toggle", self.field),
            Some(&LabelRule::Humanize),
        )?;
        let identity = binding.identity.clone();
        let url_field = self
            .url_field
            .unwrap_or_else(|| format!("{}_url", self.field));
        let Self {
            field,
            label_true,
            label_false,
            template,
            renderer,
            ..
        } = self;

        Ok(DisplayUnit::new(binding, &[Tag::RendersMarkup], move |record| {
            let state = fetch(record, &field)?.truthy();
            let url = record
                .get(&url_field)
                .ok_or_else(|| {
                    UnitError::ImproperlyConfigured(format!(
                        "{identity}: record {:?} has no {url_field:?} attribute",
                        record.display()
                    ))
                })?
                .resolve()?;

            let mut bindings = Bindings::new();
            bindings.insert("record".to_string(), Value::Text(record.display()));
            bindings.insert(
                "label".to_string(),
                Value::from(if state { label_true.as_str() } else { label_false.as_str() }),
            );
            bindings.insert("url".to_string(), url);
            bindings.insert("state".to_string(), Value::Bool(state));
            bindings.insert("field".to_string(), Value::from(field.as_str()));

            Ok(Value::Markup(renderer.render(&template, &bindings)?))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::MapRecord;

    fn article(featured: bool) -> MapRecord {
        MapRecord::new("Article 7")
            .with("featured", featured)
            .with("featured_url", "/admin/article/7/toggle-featured/")
    }

    #[test]
    fn test_defaults() {
        let unit = toggle_display("featured").build().unwrap();
        assert_eq!(unit.identity().as_str(), "featured_toggle");
        assert_eq!(unit.label(), "Featured toggle");
        assert!(unit.renders_markup());
    }

    #[test]
    fn test_renders_state_and_url() {
        let unit = toggle_display("featured")
            .label_true("Featured")
            .label_false("Regular")
            .header_label("Front page")
            .build()
            .unwrap();
        assert_eq!(unit.label(), "Front page");

        let Value::Markup(html) = unit.call(&article(true)).unwrap() else {
            panic!("expected markup");
        };
        assert!(html.contains("Featured"));
        assert!(html.contains("/admin/article/7/toggle-featured/"));

        let html = unit.call(&article(false)).unwrap().to_string();
        assert!(html.contains("Regular"));
    }

    #[test]
    fn test_missing_url_is_improperly_configured() {
        let unit = toggle_display("featured").build().unwrap();
        let record = MapRecord::new("a").with("featured", true);
        let err = unit.call(&record).unwrap_err();
        assert!(matches!(err, UnitError::ImproperlyConfigured(msg) if msg.contains("featured_url")));
    }

    #[test]
    fn test_custom_url_field_and_renderer() {
        let renderer = |path: &str, b: &Bindings| -> Result<String> {
            Ok(format!(
                "{path}|{}|{}|{}",
                b["record"], b["label"], b["url"]
            ))
        };
        let unit = toggle_display("featured")
            .url_field("switch_link")
            .template("custom/toggle.html")
            .renderer(Arc::new(renderer))
            .build()
            .unwrap();
        let record = MapRecord::new("A")
            .with("featured", false)
            .with_method("switch_link", || Ok(Value::from("/flip")));

        assert_eq!(
            unit.call(&record).unwrap(),
            Value::Markup("custom/toggle.html|A|No|/flip".to_string())
        );
    }
}
