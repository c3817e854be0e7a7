//! Template rendering for markup-producing units.
//!
//! Toggle and image units hand their bindings to a [`TemplateRenderer`]. Hosts
//! plug in their own engine; [`BuiltinTemplates`] renders the stock Bootstrap 5
//! fragments.

mod image;
mod toggle;

use std::collections::BTreeMap;

use crate::error::{Result, UnitError};
use crate::value::Value;

pub use image::render_image;
pub use toggle::render_toggle;

/// Stock template for toggle display units.
pub const TOGGLE_TEMPLATE: &str = "admin_methods/toggle.html";
/// Stock template for image preview units.
pub const IMAGE_TEMPLATE: &str = "admin_methods/image.html";

/// Named values passed to a template.
pub type Bindings = BTreeMap<String, Value>;

/// Renders a template path with bindings into a markup fragment.
pub trait TemplateRenderer: Send + Sync {
    /// Renders `path`. The result is treated as pre-escaped markup.
    fn render(&self, path: &str, bindings: &Bindings) -> Result<String>;
}

impl<F> TemplateRenderer for F
where
    F: Fn(&str, &Bindings) -> Result<String> + Send + Sync,
{
    fn render(&self, path: &str, bindings: &Bindings) -> Result<String> {
        self(path, bindings)
    }
}

/// Renderer for the stock templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinTemplates;

impl TemplateRenderer for BuiltinTemplates {
    fn render(&self, path: &str, bindings: &Bindings) -> Result<String> {
        match path {
            TOGGLE_TEMPLATE => render_toggle(bindings),
            IMAGE_TEMPLATE => render_image(bindings),
            other => Err(UnitError::Template(format!("unknown template: {other}"))),
        }
    }
}

/// Looks up a binding as display text, failing if it is absent.
pub(crate) fn binding_text(bindings: &Bindings, key: &str) -> Result<String> {
    bindings
        .get(key)
        .map(ToString::to_string)
        .ok_or_else(|| UnitError::Template(format!("missing binding: {key}")))
}

/// Escapes HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
