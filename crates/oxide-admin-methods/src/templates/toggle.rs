//! Inline toggle control.

use ironhtml::typed::Element;
use ironhtml_elements::{Span, A, I};

use super::{binding_text, Bindings};
use crate::error::Result;

/// Renders the current-state badge followed by a link that flips the state.
///
/// Expects `label`, `url`, `state` and `record` bindings.
pub fn render_toggle(bindings: &Bindings) -> Result<String> {
    let label = binding_text(bindings, "label")?;
    let url = binding_text(bindings, "url")?;
    let record = binding_text(bindings, "record")?;
    let on = bindings.get("state").is_some_and(|v| v.truthy());

    let badge_class = if on {
        "badge text-bg-success me-2"
    } else {
        "badge text-bg-secondary me-2"
    };
    let title = format!("Toggle {record}");

    let badge = Element::<Span>::new().class(badge_class).text(&label).render();
    let link = Element::<A>::new()
        .attr("href", &url)
        .attr("title", &title)
        .class("btn btn-sm btn-outline-secondary")
        .child::<I, _>(|i| i.class("bi bi-arrow-repeat"))
        .render();

    Ok(format!("{badge}{link}"))
}
