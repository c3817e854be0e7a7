//! Declarative unit configuration.
//!
//! Units can be described in JSON instead of code:
//!
//! ```
//! use oxide_admin_methods::config::UnitConfig;
//! use oxide_admin_methods::templates::BuiltinTemplates;
//! use std::sync::Arc;
//!
//! let configs = UnitConfig::list_from_json(r#"[
//!     {"kind": "short_text", "field": "body", "length": 40},
//!     {"kind": "count", "field": "comments", "format": "{} comment", "format_plural": "{} comments"}
//! ]"#).unwrap();
//! let units: Vec<_> = configs
//!     .into_iter()
//!     .map(|c| c.build(Arc::new(BuiltinTemplates)))
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(units[1].identity().as_str(), "comments");
//! ```

use std::sync::Arc;

use serde::Deserialize;

use crate::actions;
use crate::error::Result;
use crate::fields;
use crate::image::image_thumb;
use crate::templates::TemplateRenderer;
use crate::toggle::toggle_display;
use crate::unit::{ActionUnit, DisplayUnit};

/// Description of one display unit.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum UnitConfig {
    /// See [`fields::ShortText`].
    ShortText {
        field: String,
        length: Option<usize>,
        suffix: Option<String>,
        #[serde(default)]
        strip_markup: bool,
        name: Option<String>,
        label: Option<String>,
    },
    /// See [`fields::Count`].
    Count {
        field: String,
        format: Option<String>,
        format_plural: Option<String>,
        format_none: Option<String>,
        name: Option<String>,
        label: Option<String>,
    },
    /// See [`fields::List`].
    List {
        relation: String,
        separator: Option<String>,
        item_attribute: Option<String>,
        limit: Option<usize>,
        name: Option<String>,
        label: Option<String>,
    },
    /// See [`fields::Attribute`].
    Attribute {
        path: String,
        name: Option<String>,
        label: Option<String>,
    },
    /// See [`crate::toggle::ToggleDisplay`].
    ToggleDisplay {
        field: String,
        url_field: Option<String>,
        name: Option<String>,
        label_true: Option<String>,
        label_false: Option<String>,
        header_label: Option<String>,
        template: Option<String>,
    },
    /// See [`crate::image::ImageThumb`].
    ImageThumb {
        field: String,
        width: Option<u32>,
        #[serde(default)]
        with_label: bool,
        label_text: Option<String>,
        no_image_text: Option<String>,
        name: Option<String>,
        template: Option<String>,
    },
}

impl UnitConfig {
    /// Parses a single unit description.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses a JSON array of unit descriptions.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builds the described unit. `renderer` is used by markup units only.
    pub fn build(self, renderer: Arc<dyn TemplateRenderer>) -> Result<DisplayUnit> {
        match self {
            Self::ShortText {
                field,
                length,
                suffix,
                strip_markup,
                name,
                label,
            } => {
                let mut b = fields::short_text(field).strip_markup(strip_markup);
                if let Some(length) = length {
                    b = b.length(length);
                }
                if let Some(suffix) = suffix {
                    b = b.suffix(suffix);
                }
                b.name(name.unwrap_or_default())
                    .label(label.unwrap_or_default())
                    .build()
            }
            Self::Count {
                field,
                format,
                format_plural,
                format_none,
                name,
                label,
            } => {
                let mut b = fields::count(field);
                if let Some(format) = format {
                    b = b.format(format);
                }
                if let Some(plural) = format_plural {
                    b = b.format_plural(plural);
                }
                if let Some(none) = format_none {
                    b = b.format_none(none);
                }
                b.name(name.unwrap_or_default())
                    .label(label.unwrap_or_default())
                    .build()
            }
            Self::List {
                relation,
                separator,
                item_attribute,
                limit,
                name,
                label,
            } => {
                let mut b = fields::list(relation);
                if let Some(separator) = separator {
                    b = b.separator(separator);
                }
                if let Some(attribute) = item_attribute {
                    b = b.item_attribute(attribute);
                }
                if let Some(limit) = limit {
                    b = b.limit(limit);
                }
                b.name(name.unwrap_or_default())
                    .label(label.unwrap_or_default())
                    .build()
            }
            Self::Attribute { path, name, label } => fields::attribute(path)
                .name(name.unwrap_or_default())
                .label(label.unwrap_or_default())
                .build(),
            Self::ToggleDisplay {
                field,
                url_field,
                name,
                label_true,
                label_false,
                header_label,
                template,
            } => {
                let mut b = toggle_display(field).renderer(renderer);
                if let Some(url_field) = url_field {
                    b = b.url_field(url_field);
                }
                if let Some(label) = label_true {
                    b = b.label_true(label);
                }
                if let Some(label) = label_false {
                    b = b.label_false(label);
                }
                if let Some(template) = template {
                    b = b.template(template);
                }
                b.name(name.unwrap_or_default())
                    .header_label(header_label.unwrap_or_default())
                    .build()
            }
            Self::ImageThumb {
                field,
                width,
                with_label,
                label_text,
                no_image_text,
                name,
                template,
            } => {
                let mut b = image_thumb(field).renderer(renderer).with_label(with_label);
                if let Some(width) = width {
                    b = b.width(width);
                }
                if let Some(template) = template {
                    b = b.template(template);
                }
                b.name(name.unwrap_or_default())
                    .label_text(label_text.unwrap_or_default())
                    .no_image_text(no_image_text.unwrap_or_default())
                    .build()
            }
        }
    }
}

/// Description of a bulk action, or of a set-true/set-false pair.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum ActionConfig {
    /// See [`actions::Toggle`].
    Toggle {
        field: String,
        name: Option<String>,
        label: Option<String>,
    },
    /// See [`actions::TrueFalse`].
    TrueFalse {
        field: String,
        true_name: Option<String>,
        true_label: Option<String>,
        false_name: Option<String>,
        false_label: Option<String>,
    },
}

impl ActionConfig {
    /// Parses a JSON array of action descriptions.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builds the described actions: one for a toggle, two for a pair.
    pub fn build(self) -> Result<Vec<ActionUnit>> {
        match self {
            Self::Toggle { field, name, label } => Ok(vec![actions::toggle(field)
                .name(name.unwrap_or_default())
                .label(label.unwrap_or_default())
                .build()?]),
            Self::TrueFalse {
                field,
                true_name,
                true_label,
                false_name,
                false_label,
            } => {
                let (on, off) = actions::true_false(field)
                    .true_name(true_name.unwrap_or_default())
                    .true_label(true_label.unwrap_or_default())
                    .false_name(false_name.unwrap_or_default())
                    .false_label(false_label.unwrap_or_default())
                    .build()?;
                Ok(vec![on, off])
            }
        }
    }
}
