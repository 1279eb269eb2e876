//! Built-in home page templates using the Tera template engine
//!
//! Templates are embedded in the binary, so a build needs nothing on disk
//! besides `_config.yml`.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::content::PostPagination;
use crate::helpers::{html_escape, meta_generator, post_path};

/// Template renderer with the embedded home page theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Tera's own escaping also rewrites '/', which breaks hrefs;
        // values go through the `html` filter instead
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("home/layout.html")),
            ("index.html", include_str!("home/index.html")),
            // Partials
            (
                "partials/icon_calendar.html",
                include_str!("home/partials/icon_calendar.html"),
            ),
            (
                "partials/icon_user.html",
                include_str!("home/partials/icon_user.html"),
            ),
            (
                "partials/load_more.html",
                include_str!("home/partials/load_more.html"),
            ),
        ])?;

        tera.register_filter("html", html_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }

    /// Render the home page: one card per post in order, then the
    /// load-more control if another page exists upstream
    pub fn render_home(&self, pagination: &PostPagination, site: &SiteData) -> Result<String> {
        let posts: Vec<PostCardData> = pagination
            .results
            .iter()
            .map(|p| PostCardData {
                href: post_path(&site.post_route, p.uid.as_deref()),
                title: p.data.title.clone(),
                subtitle: p.data.subtitle.clone(),
                date: p.first_publication_date.clone(),
                author: p.data.author.clone(),
            })
            .collect();

        let load_more = if pagination.has_next_page() {
            pagination.next_page.clone()
        } else {
            None
        };

        let mut context = Context::new();
        context.insert("site", site);
        context.insert("generator", &meta_generator());
        context.insert("posts", &posts);
        context.insert("load_more", &load_more);

        self.render("index.html", &context)
    }
}

/// Tera filter: escape HTML special characters
fn html_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = match value {
        tera::Value::Null => String::new(),
        tera::Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    Ok(tera::Value::String(html_escape(&s)))
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub language: String,
    pub post_route: String,
    pub load_more_label: String,
    /// Month abbreviations for dates formatted in the browser
    pub months_short: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostCardData {
    pub href: String,
    pub title: String,
    pub subtitle: String,
    pub date: String,
    pub author: String,
}
