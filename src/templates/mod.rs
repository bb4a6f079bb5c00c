//! Page templates rendered with Tera
//!
//! All templates are embedded in the binary, so a deployment is a single
//! executable plus its `_config.yml`.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::helpers::{display_date, PagerSlot};

/// Template renderer with the embedded site templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("macros.html", include_str!("site/macros.html")),
            ("home.html", include_str!("site/home.html")),
            ("listing.html", include_str!("site/listing.html")),
            ("detail.html", include_str!("site/detail.html")),
            ("not_found.html", include_str!("site/not_found.html")),
        ])?;

        tera.register_filter("strip_html", strip_html_filter);
        tera.register_filter("truncate_chars", truncate_chars_filter);
        tera.register_filter("date_format", date_format_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: drop HTML tags and collapse whitespace
fn strip_html_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("strip_html", "value", String, value);
    Ok(tera::Value::String(strip_html(&s)))
}

fn strip_html(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => {
                in_tag = true;
                text.push(' ');
            }
            '>' => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 160,
    };

    if s.chars().count() <= length {
        return Ok(tera::Value::String(s));
    }
    let truncated: String = s.chars().take(length).collect();
    Ok(tera::Value::String(format!("{}…", truncated.trim_end())))
}

/// Tera filter: format a raw CMS timestamp, e.g.
/// `{{ card.date | date_format(format="MMMM DD, YYYY") }}`
fn date_format_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("date_format", "value", String, value);
    let format = match args.get("format") {
        Some(val) => tera::try_get_value!("date_format", "format", String, val),
        None => "YYYY-MM-DD".to_string(),
    };
    Ok(tera::Value::String(display_date(&s, &format)))
}

// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub description: String,
    pub language: String,
    pub date_format: String,
    pub datetime_format: String,
}

/// A listing or home-page card
#[derive(Debug, Clone, Serialize)]
pub struct CardData {
    pub title: String,
    pub path: String,
    pub image: Option<String>,
    pub date: String,
    pub excerpt: String,
    pub tags: Vec<String>,
    pub time: Option<String>,
    pub location: Option<String>,
}

/// A tag toggle in the listing filter bar
#[derive(Debug, Clone, Serialize)]
pub struct TagFilterData {
    pub label: String,
    pub selected: bool,
    pub href: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PagerLinkData {
    #[serde(flatten)]
    pub slot: PagerSlot,
    pub href: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaginationData {
    pub current: usize,
    pub total: usize,
    pub prev_link: Option<String>,
    pub next_link: Option<String>,
    pub links: Vec<PagerLinkData>,
}

/// Everything a listing page needs
#[derive(Debug, Clone, Serialize)]
pub struct ListingPageData {
    pub kind: String,
    pub heading: String,
    pub base_path: String,
    pub cards: Vec<CardData>,
    pub tags: Vec<TagFilterData>,
    pub clear_link: Option<String>,
    pub sort_order: String,
    pub sort_link: String,
    pub filtered_count: usize,
    pub degraded: bool,
    pub pagination: PaginationData,
}

/// Everything a detail page needs
#[derive(Debug, Clone, Serialize)]
pub struct DetailPageData {
    pub kind: String,
    pub title: String,
    pub image: Option<String>,
    pub date: String,
    pub tags: Vec<TagFilterData>,
    pub summary: Option<String>,
    pub content: String,
    pub time: Option<String>,
    pub end_time: Option<String>,
    pub location: Option<String>,
    pub fee: Option<String>,
    pub calendar_url: Option<String>,
    pub back_link: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> SiteData {
        SiteData {
            title: "Town Notes".to_string(),
            description: String::new(),
            language: "en".to_string(),
            date_format: "YYYY-MM-DD".to_string(),
            datetime_format: "YYYY-MM-DD HH:mm".to_string(),
        }
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(strip_html("<p>Hello <b>world</b></p>\n<p>again</p>"), "Hello world again");
    }

    #[test]
    fn test_templates_parse_and_render_not_found() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut context = Context::new();
        context.insert("site", &site());
        context.insert("current_path", "/events/nope");
        context.insert("current_year", "2024");
        context.insert("message", "No event called nope");

        let html = renderer.render("not_found.html", &context).unwrap();
        assert!(html.contains("No event called nope"));
        assert!(html.contains("Town Notes"));
    }

    #[test]
    fn test_date_format_filter() {
        let mut args = HashMap::new();
        args.insert("format".to_string(), tera::Value::String("DD/MM/YYYY".to_string()));
        let out = date_format_filter(
            &tera::Value::String("2024-07-01T10:00:00Z".to_string()),
            &args,
        )
        .unwrap();
        assert_eq!(out, tera::Value::String("01/07/2024".to_string()));
    }

    #[test]
    fn test_truncate_chars_filter() {
        let mut args = HashMap::new();
        args.insert("length".to_string(), tera::Value::from(5));
        let out =
            truncate_chars_filter(&tera::Value::String("Hello there".to_string()), &args).unwrap();
        assert_eq!(out, tera::Value::String("Hello…".to_string()));
    }
}
