//! Image preview.

use ironhtml::typed::Element;
use ironhtml_elements::{Img, Span};

use super::{binding_text, Bindings};
use crate::error::Result;

/// Renders an `<img>` from `url` and `width`, or the `fallback` text when
/// that binding is present. An empty fallback renders nothing.
pub fn render_image(bindings: &Bindings) -> Result<String> {
    if let Some(fallback) = bindings.get("fallback") {
        let text = fallback.to_string();
        if text.is_empty() {
            return Ok(String::new());
        }
        return Ok(Element::<Span>::new()
            .class("text-muted")
            .text(&text)
            .render());
    }

    let url = binding_text(bindings, "url")?;
    let width = binding_text(bindings, "width")?;
    Ok(Element::<Img>::new()
        .attr("src", &url)
        .attr("width", &width)
        .attr("alt", "")
        .render())
}
