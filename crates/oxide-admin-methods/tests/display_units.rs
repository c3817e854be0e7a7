//! End-to-end behavior of display units against blog records.

mod common;
use common::*;

use std::sync::Arc;

use oxide_admin_methods::image::image_thumb;
use oxide_admin_methods::toggle::toggle_display;
use oxide_admin_methods::{fields, Bindings, MapRecord, Result, Tag, UnitError, UnitRegistry, Value};

#[test]
fn short_text_truncates_by_characters() {
    let unit = fields::short_text("title").length(5).build().unwrap();
    assert_eq!(
        unit.call(&post("abcdefgh", 0, None)).unwrap(),
        Value::from("abcde...")
    );
    assert_eq!(unit.call(&post("abc", 0, None)).unwrap(), Value::from("abc"));
    assert_eq!(
        unit.call(&post("ééééééé", 0, None)).unwrap(),
        Value::from("ééééé...")
    );
}

#[test]
fn count_picks_template_by_cardinality() {
    let unit = fields::count("comments")
        .format("{} item")
        .format_plural("{} items")
        .format_none("none")
        .build()
        .unwrap();

    let rendered: Vec<String> = [0, 1, 5]
        .iter()
        .map(|&n| unit.call(&post("p", n, None)).unwrap().to_string())
        .collect();
    assert_eq!(rendered, vec!["none", "1 item", "5 items"]);
}

#[test]
fn list_respects_limit_and_order() {
    let unit = fields::list("tags").limit(2).build().unwrap();
    assert_eq!(unit.call(&post("p", 0, None)).unwrap(), Value::from("rust, web"));

    let unit = fields::list("tags")
        .item_attribute("slug")
        .separator(" | ")
        .build()
        .unwrap();
    assert_eq!(
        unit.call(&post("p", 0, None)).unwrap(),
        Value::from("rust | web | admin")
    );
}

#[test]
fn attribute_invokes_methods_along_the_path() {
    let unit = fields::attribute("author.profile.city").build().unwrap();
    assert_eq!(unit.call(&post("p", 0, None)).unwrap(), Value::from("Ghent"));

    let unit = fields::attribute("author.avatar.url").build().unwrap();
    match unit.call(&post("p", 0, None)).unwrap_err() {
        UnitError::AttributeResolution { segment, .. } => assert_eq!(segment, "avatar"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn image_falls_back_without_raising() {
    let unit = image_thumb("cover").no_image_text("N/A").build().unwrap();
    assert!(unit.tags().contains(&Tag::RendersMarkup));

    let html = unit.call(&post("p", 0, None)).unwrap().to_string();
    assert!(html.contains("N/A"));

    let html = unit.call(&post("p", 0, Some("/media/c.png"))).unwrap().to_string();
    assert!(html.contains("/media/c.png"));
    assert!(html.contains(r#"width="100""#));
}

#[test]
fn toggle_display_uses_pluggable_template() {
    let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
    let log = Arc::clone(&seen);
    let renderer = move |path: &str, bindings: &Bindings| -> Result<String> {
        log.lock().unwrap().push(path.to_string());
        Ok(format!("<a href=\"{}\">{}</a>", bindings["url"], bindings["label"]))
    };

    let unit = toggle_display("published")
        .template("blog/toggle.html")
        .renderer(Arc::new(renderer))
        .build()
        .unwrap();

    let out = unit.call(&post("p", 0, None)).unwrap();
    assert_eq!(
        out,
        Value::Markup(r#"<a href="/admin/post/1/toggle/">No</a>"#.to_string())
    );
    assert_eq!(seen.lock().unwrap().as_slice(), ["blog/toggle.html"]);
}

#[test]
fn toggle_display_without_url_is_a_configuration_bug() {
    let unit = toggle_display("published").build().unwrap();
    let record = MapRecord::new("draft").with("published", true);
    assert!(matches!(
        unit.call(&record),
        Err(UnitError::ImproperlyConfigured(_))
    ));
}

#[test]
fn registry_renders_a_full_row() {
    let registry = UnitRegistry::new()
        .column(fields::short_text("title").length(8).label("Title").build().unwrap())
        .column(fields::attribute("author.name").label("Author").build().unwrap())
        .column(fields::count("comments").build().unwrap())
        .column(fields::list("tags").limit(1).build().unwrap())
        .column(toggle_display("published").build().unwrap())
        .column(image_thumb("cover").build().unwrap());

    assert_eq!(
        registry.headers(),
        vec!["Title", "Author", "comments", "tags", "Published toggle", ""]
    );

    let cells = registry.render_row(&post("Fish & chips forever", 2, None));
    assert_eq!(cells[0].html, "Fish &amp; c...");
    assert_eq!(cells[1].html, "Alice");
    assert_eq!(cells[2].html, "2");
    assert_eq!(cells[3].html, "rust");
    assert!(cells[4].html.contains("/admin/post/1/toggle/"));
    assert_eq!(cells[5].html, "");
    assert!(cells.iter().all(|c| c.error.is_none()));
}

#[test]
fn colliding_identities_overwrite() {
    let mut registry = UnitRegistry::new();
    registry.register_column(fields::short_text("title").length(3).build().unwrap());
    let previous = registry.register_column(fields::short_text("title").length(50).build().unwrap());

    assert!(previous.is_some());
    assert_eq!(registry.columns().len(), 1);
    let cells = registry.render_row(&post("Overwritten", 0, None));
    assert_eq!(cells[0].html, "Overwritten");
}
