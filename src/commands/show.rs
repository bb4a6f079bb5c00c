//! Show a single article or event

use anyhow::Result;

use crate::content::{resolve, Article, Content, Event, Tagged};
use crate::helpers::{asset_url, display_date, google_calendar_url};
use crate::Bulletin;

/// Print one item resolved by slug
pub async fn run(site: &Bulletin, content_type: &str, slug: &str) -> Result<()> {
    match content_type {
        "article" | "articles" => {
            let article = resolve::<Article>(&site.cms, slug).await?;
            print_header(site, &article);
            if let Some(summary) = &article.summary {
                println!();
                println!("{}", summary);
            }
        }
        "event" | "events" => {
            let event = resolve::<Event>(&site.cms, slug).await?;
            print_header(site, &event);
            let format = format!("{} {}", site.config.date_format, site.config.time_format);
            if let Some(time) = &event.time {
                println!("When:      {}", display_date(time, &format));
            }
            if let Some(end) = &event.end_time {
                println!("Until:     {}", display_date(end, &format));
            }
            if let Some(location) = &event.location {
                println!("Where:     {}", location);
            }
            if let Some(fee) = &event.fee {
                println!("Fee:       {}", fee);
            }
            if event.time.is_some() {
                println!("Calendar:  {}", google_calendar_url(&event.calendar_event()));
            }
        }
        _ => {
            anyhow::bail!("Unknown type: {}. Available: article, event", content_type);
        }
    }

    Ok(())
}

fn print_header<T: Content>(site: &Bulletin, item: &Tagged<T>) {
    println!("{}", item.title());
    println!("Slug:      {}", item.slug());
    if let Some(date) = item.date_created() {
        println!("Created:   {}", display_date(date, &site.config.date_format));
    }
    if !item.tags.is_empty() {
        println!("Tags:      {}", item.tags.join(", "));
    }
    if let Some(image) = item.image() {
        println!("Image:     {}", asset_url(&site.config, image));
    }
}
