//! # oxide-admin-methods
//!
//! Factories for admin list columns, detail fields and bulk actions.
//!
//! Each factory is called once while configuring an admin, and returns a unit
//! that the admin invokes once per record (display units) or once per selected
//! batch (action units). Every unit carries:
//!
//! - an [`Identity`], the ASCII key the admin registers it under
//! - a label, the free-form text shown in headers and menus
//! - tags, such as [`Tag::RendersMarkup`] for output that must not be escaped
//! - the behavior itself
//!
//! ## Display units
//!
//! - [`fields::short_text`] - truncated text, optionally markup-stripped
//! - [`fields::count`] - relation cardinality with zero/one/many formats
//! - [`fields::list`] - relation items joined into one string
//! - [`fields::attribute`] - dotted lookup such as `author.profile.city`
//! - [`toggle::toggle_display`] - state badge plus a link that flips it
//! - [`image::image_thumb`] - `<img>` preview with a text fallback
//!
//! ## Actions
//!
//! - [`actions::toggle`] - negate a boolean field on every selected record
//! - [`actions::true_false`] - a set-true/set-false pair for a boolean field
//!
//! ## Example
//!
//! ```
//! use oxide_admin_methods::{fields, MapRecord, UnitRegistry, Value};
//!
//! let registry = UnitRegistry::new()
//!     .column(fields::short_text("title").length(10).label("Title").build().unwrap())
//!     .column(
//!         fields::count("comments")
//!             .format("{} comment")
//!             .format_plural("{} comments")
//!             .format_none("no comments")
//!             .build()
//!             .unwrap(),
//!     );
//!
//! let post = MapRecord::new("Post 1")
//!     .with("title", "A rather long title")
//!     .with("comments", vec![Value::from("first!")]);
//!
//! let cells = registry.render_row(&post);
//! assert_eq!(cells[0].html, "A rather l...");
//! assert_eq!(cells[1].html, "1 comment");
//! ```

pub mod actions;
pub mod config;
pub mod error;
pub mod fields;
pub mod identity;
pub mod image;
pub mod markup;
pub mod record;
pub mod registry;
pub mod templates;
pub mod toggle;
pub mod unit;
pub mod value;

// Re-export main types
pub use config::{ActionConfig, UnitConfig};
pub use error::{Result, UnitError};
pub use identity::{bind, humanize, Binding, Identity, LabelRule};
pub use markup::{HtmlToText, MarkupStripper};
pub use record::{MapRecord, Record, Relation, VecRelation};
pub use registry::{Cell, UnitRegistry};
pub use templates::{html_escape, Bindings, BuiltinTemplates, TemplateRenderer};
pub use unit::{ActionUnit, DisplayUnit, Tag, UnitInfo};
pub use value::{Callable, Value};
