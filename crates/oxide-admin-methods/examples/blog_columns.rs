//! Blog admin columns and actions.
//!
//! Builds the columns and bulk actions a blog post admin would register, then
//! renders a couple of posts and runs an action over them.
//!
//! ```bash
//! cargo run -p oxide-admin-methods --example blog_columns
//! ```

use oxide_admin_methods::{
    actions, fields, image::image_thumb, toggle::toggle_display, MapRecord,
    UnitRegistry, Value,
};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

fn post(id: usize, title: &str, published: bool, tags: &[&str], cover: Option<&str>) -> MapRecord {
    let author = MapRecord::new("Alice")
        .with("name", "Alice")
        .with("profile", Value::object(MapRecord::new("profile").with("city", "Ghent")));
    let tags: Vec<Value> = tags
        .iter()
        .map(|t| Value::object(MapRecord::new(*t).with("slug", *t)))
        .collect();
    let mut record = MapRecord::new(format!("Post #{id}"))
        .with("id", id as i64)
        .with("title", title)
        .with("body", format!("<p>{title}, with <em>a lot</em> more to say.</p>"))
        .with("published", published)
        .with("published_url", format!("/admin/post/{id}/toggle/published/"))
        .with("author", Value::object(author))
        .with("tags", tags)
        .with("comments", vec![Value::from("nice"); id]);
    if let Some(url) = cover {
        record = record.with("cover", Value::object(MapRecord::new("cover").with("url", url)));
    }
    record
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let (publish, unpublish) = actions::true_false("published").build()?;
    let registry = UnitRegistry::new()
        .column(fields::short_text("title").length(20).label("Title").build()?)
        .column(
            fields::short_text("body")
                .length(30)
                .strip_markup(true)
                .name("excerpt")
                .label("Excerpt")
                .build()?,
        )
        .column(fields::attribute("author.profile.city").label("City").build()?)
        .column(
            fields::count("comments")
                .format("{} comment")
                .format_plural("{} comments")
                .format_none("-")
                .build()?,
        )
        .column(fields::list("tags").item_attribute("slug").limit(2).build()?)
        .column(toggle_display("published").header_label("Published").build()?)
        .column(image_thumb("cover").width(48).no_image_text("no cover").build()?)
        .action(actions::toggle("published").build()?)
        .action(publish)
        .action(unpublish);

    let mut posts = vec![
        post(1, "Hello world", true, &["intro", "meta"], Some("/media/hello.png")),
        post(2, "Ownership explained at length", false, &["rust", "memory", "tutorial"], None),
    ];

    info!(headers = ?registry.headers(), "columns");
    for post in &posts {
        for cell in registry.render_row(post) {
            info!(column = %cell.identity, html = %cell.html, "cell");
        }
    }

    for (identity, label) in registry.action_choices() {
        info!(%identity, %label, "action");
    }
    let applied = registry.run_action("toggle_published", &mut posts)?;
    info!(applied, "toggled published");

    Ok(())
}
