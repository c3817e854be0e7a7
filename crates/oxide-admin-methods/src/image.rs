//! Image preview column.

use std::sync::Arc;

use tracing::warn;

use crate::error::Result;
use crate::identity::bind;
use crate::record::Record;
use crate::templates::{Bindings, BuiltinTemplates, TemplateRenderer, IMAGE_TEMPLATE};
use crate::unit::{DisplayUnit, Tag};
use crate::value::Value;

/// Starts an image preview unit for `field`.
pub fn image_thumb(field: impl Into<String>) -> ImageThumb {
    ImageThumb::new(field)
}

/// Builder for an `<img>` preview of an image-bearing field.
///
/// The field (invoked first if it is a method) must expose a non-empty `url`
/// attribute. Otherwise the template receives a `fallback` binding with the
/// configured no-image text instead of `url` and `width`.
#[derive(Clone)]
pub struct ImageThumb {
    field: String,
    width: u32,
    with_label: bool,
    label_text: String,
    no_image_text: String,
    name: String,
    template: String,
    renderer: Arc<dyn TemplateRenderer>,
}

impl ImageThumb {
    /// Creates a builder with width 100, no label and empty fallback text.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            width: 100,
            with_label: false,
            label_text: String::new(),
            no_image_text: String::new(),
            name: String::new(),
            template: IMAGE_TEMPLATE.to_string(),
            renderer: Arc::new(BuiltinTemplates),
        }
    }

    /// Rendered width in pixels.
    #[must_use]
    pub fn width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// Attaches a header label. Without it the column header stays empty.
    #[must_use]
    pub fn with_label(mut self, with_label: bool) -> Self {
        self.with_label = with_label;
        self
    }

    /// Header text used when labelled. Defaults to the identity.
    #[must_use]
    pub fn label_text(mut self, label: impl Into<String>) -> Self {
        self.label_text = label.into();
        self
    }

    /// Text shown when no image can be resolved.
    #[must_use]
    pub fn no_image_text(mut self, text: impl Into<String>) -> Self {
        self.no_image_text = text.into();
        self
    }

    /// Sets the identity. Defaults to `<field>_preview`.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
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
        let mut binding = bind(
            &self.name,
            &self.label_text,
            &format!("{}_preview", self.field),
            None,
        )?;
        if !self.with_label {
            binding.label.clear();
        }
        let identity = binding.identity.clone();
        let Self {
            field,
            width,
            no_image_text,
            template,
            renderer,
            ..
        } = self;

        Ok(DisplayUnit::new(binding, &[Tag::RendersMarkup], move |record| {
            let mut bindings = Bindings::new();
            match image_url(record, &field) {
                Some(url) => {
                    bindings.insert("url".to_string(), Value::Text(url));
                    bindings.insert("width".to_string(), Value::Int(i64::from(width)));
                }
                None => {
                    warn!(unit = %identity, record = %record.display(), "no image, using fallback");
                    bindings.insert("fallback".to_string(), Value::from(no_image_text.as_str()));
                }
            }
            Ok(Value::Markup(renderer.render(&template, &bindings)?))
        }))
    }
}

/// Resolves `field.url`, treating every failure as "no image".
fn image_url(record: &dyn Record, field: &str) -> Option<String> {
    let image = record.get(field)?.resolve().ok()?;
    let url = image.as_object()?.get("url")?.resolve().ok()?.to_string();
    (!url.is_empty()).then_some(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UnitError;
    use crate::record::MapRecord;

    fn with_photo(url: &str) -> MapRecord {
        MapRecord::new("Cat").with("photo", Value::object(MapRecord::new("photo").with("url", url)))
    }

    #[test]
    fn test_defaults() {
        let unit = image_thumb("photo").build().unwrap();
        assert_eq!(unit.identity().as_str(), "photo_preview");
        assert_eq!(unit.label(), "");
        assert!(unit.renders_markup());
    }

    #[test]
    fn test_labelled() {
        let unit = image_thumb("photo").with_label(true).build().unwrap();
        assert_eq!(unit.label(), "photo_preview");

        let unit = image_thumb("photo")
            .with_label(true)
            .label_text("Photo")
            .build()
            .unwrap();
        assert_eq!(unit.label(), "Photo");
    }

    #[test]
    fn test_renders_image() {
        let unit = image_thumb("photo").width(64).build().unwrap();
        let html = unit.call(&with_photo("/media/cat.jpg")).unwrap().to_string();
        assert!(html.contains(r#"src="/media/cat.jpg""#));
        assert!(html.contains(r#"width="64""#));
    }

    #[test]
    fn test_fallbacks_never_raise() {
        let unit = image_thumb("photo").no_image_text("N/A").build().unwrap();

        let cases = vec![
            MapRecord::new("missing field"),
            MapRecord::new("null").with("photo", Value::Null),
            MapRecord::new("no url").with("photo", Value::object(MapRecord::new("p"))),
            with_photo(""),
            MapRecord::new("failing method").with_method("photo", || {
                Err(UnitError::Persistence("storage offline".to_string()))
            }),
        ];
        for record in cases {
            let out = unit.call(&record).unwrap();
            assert!(out.is_markup());
            assert!(out.to_string().contains("N/A"), "{}", record.display());
        }
    }

    #[test]
    fn test_callable_field() {
        let unit = image_thumb("avatar").build().unwrap();
        let record = MapRecord::new("u").with_method("avatar", || {
            Ok(Value::object(MapRecord::new("a").with("url", "/a.png")))
        });
        assert!(unit.call(&record).unwrap().to_string().contains("/a.png"));
    }
}
