//! List site content

use anyhow::Result;

use crate::content::{fetch_tagged, Article, Content, Event, Tagged};
use crate::helpers::{display_date, tag_counts};
use crate::listing::{Listing, PAGE_SIZE};
use crate::Bulletin;

/// List site content by type
pub async fn run(site: &Bulletin, content_type: &str) -> Result<()> {
    match content_type {
        "article" | "articles" => {
            let articles = fetch_newest::<Article>(site).await?;
            println!("Articles ({}):", articles.len());
            for article in &articles {
                print_row(article);
            }
        }
        "event" | "events" => {
            let events = fetch_newest::<Event>(site).await?;
            println!("Events ({}):", events.len());
            for event in &events {
                print_row(event);
                if let Some(time) = &event.time {
                    println!(
                        "      starts {}{}",
                        display_date(time, &site.config.date_format),
                        event
                            .location
                            .as_deref()
                            .map(|l| format!(" at {}", l))
                            .unwrap_or_default()
                    );
                }
            }
        }
        "tag" | "tags" => {
            let (articles, events) = tokio::try_join!(
                fetch_tagged::<Article>(&site.cms, None),
                fetch_tagged::<Event>(&site.cms, None),
            )?;
            let mut tags = tag_counts(&articles);
            for (tag, count) in tag_counts(&events) {
                *tags.entry(tag).or_insert(0) += count;
            }
            tags.sort_by(|a_tag, a_count, b_tag, b_count| {
                b_count.cmp(a_count).then_with(|| a_tag.cmp(b_tag))
            });

            println!("Tags ({}):", tags.len());
            for (tag, count) in tags {
                println!("  {} ({})", tag, count);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: articles, events, tags",
                content_type
            );
        }
    }

    Ok(())
}

/// Whole collection, newest first
async fn fetch_newest<T: Content>(site: &Bulletin) -> Result<Vec<Tagged<T>>> {
    let items = fetch_tagged::<T>(&site.cms, None).await?;
    let listing = Listing::with_items(items, PAGE_SIZE);
    Ok(listing.filtered().into_iter().cloned().collect())
}

fn print_row<T: Content>(item: &Tagged<T>) {
    let date = item
        .date_created()
        .map(|d| display_date(d, "YYYY-MM-DD"))
        .unwrap_or_else(|| "----------".to_string());
    let tags = if item.tags.is_empty() {
        String::new()
    } else {
        format!(" [{}]", item.tags.join(", "))
    };
    println!("  {} - {} ({}){}", date, item.title(), item.slug(), tags);
}
