//! Article, event and tag records as the CMS returns them

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

use crate::helpers::{parse_instant, CalendarEvent};

/// CMS primary key. Directus hands out integers or UUID strings depending
/// on the collection, so both are accepted and compared as strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for ItemId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match StringOrNumber::deserialize(deserializer)? {
            StringOrNumber::Int(n) => Ok(Self::from(n)),
            StringOrNumber::Float(n) => Ok(Self(n.to_string())),
            StringOrNumber::Str(s) => Ok(Self(s)),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Int(i64),
    Float(f64),
    Str(String),
}

/// Accepts `"5.00"`, `5` or `null` for free-form fields like `fee`
fn opt_string_or_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(
        Option::<StringOrNumber>::deserialize(deserializer)?.map(|v| match v {
            StringOrNumber::Int(n) => n.to_string(),
            StringOrNumber::Float(n) => n.to_string(),
            StringOrNumber::Str(s) => s,
        }),
    )
}

/// A content type that can be listed, tag-joined and resolved by slug.
pub trait Content: DeserializeOwned + Serialize + Clone + Send + Sync + 'static {
    /// Singular name used in messages and routes ("article")
    const KIND: &'static str;
    /// Primary collection
    const COLLECTION: &'static str;
    /// Many-to-many junction collection linking items to tags
    const JOIN_COLLECTION: &'static str;

    fn id(&self) -> &ItemId;
    fn slug(&self) -> &str;
    fn title(&self) -> &str;
    fn image(&self) -> Option<&str>;
    fn date_created(&self) -> Option<&str>;
}

/// A news article
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: ItemId,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub date_created: Option<String>,
    /// Short teaser shown on listing cards
    #[serde(default)]
    pub summary: Option<String>,
    /// HTML body
    #[serde(default)]
    pub content: Option<String>,
}

impl Content for Article {
    const KIND: &'static str = "article";
    const COLLECTION: &'static str = "articles";
    const JOIN_COLLECTION: &'static str = "articles_tags";

    fn id(&self) -> &ItemId {
        &self.id
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    fn date_created(&self) -> Option<&str> {
        self.date_created.as_deref()
    }
}

/// A scheduled event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: ItemId,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub date_created: Option<String>,
    /// Start instant
    #[serde(default)]
    pub time: Option<String>,
    /// End instant
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub fee: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// HTML body
    #[serde(default)]
    pub content: Option<String>,
}

impl Event {
    /// Input for the add-to-calendar link
    pub fn calendar_event(&self) -> CalendarEvent<'_> {
        CalendarEvent {
            title: &self.title,
            details: self.description.as_deref().unwrap_or_default(),
            location: self.location.as_deref().unwrap_or_default(),
            start: self.time.as_deref().unwrap_or_default(),
            end: self
                .end_time
                .as_deref()
                .or(self.time.as_deref())
                .unwrap_or_default(),
        }
    }

    /// Whether the event has not finished yet at `now`
    pub fn is_upcoming(&self, now: chrono::DateTime<chrono::Utc>) -> bool {
        self.end_time
            .as_deref()
            .or(self.time.as_deref())
            .and_then(parse_instant)
            .map(|end| end >= now)
            .unwrap_or(false)
    }
}

impl Content for Event {
    const KIND: &'static str = "event";
    const COLLECTION: &'static str = "events";
    const JOIN_COLLECTION: &'static str = "events_tags";

    fn id(&self) -> &ItemId {
        &self.id
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    fn date_created(&self) -> Option<&str> {
        self.date_created.as_deref()
    }
}

/// Junction row between a content item and a tag.
///
/// Directus names the foreign keys after the collections
/// (`articles_id` / `events_id`, `tags_id`); either side may be null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinRow {
    #[serde(alias = "articles_id", alias = "events_id")]
    pub content_id: Option<ItemId>,
    #[serde(alias = "tags_id")]
    pub tag_id: Option<ItemId>,
}

/// Tag dictionary entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: ItemId,
    #[serde(default, alias = "name")]
    pub label: Option<String>,
}

/// A content item with its tag ids resolved to labels
#[derive(Debug, Clone, Serialize)]
pub struct Tagged<T> {
    #[serde(flatten)]
    pub item: T,
    pub tags: Vec<String>,
}

impl<T> Tagged<T> {
    pub fn has_any_tag<'a, I>(&self, wanted: I) -> bool
    where
        I: IntoIterator<Item = &'a String>,
    {
        wanted.into_iter().any(|t| self.tags.contains(t))
    }
}

impl<T> Deref for Tagged<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.item
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_item_id_accepts_numbers_and_strings() {
        let ids: Vec<ItemId> = serde_json::from_value(json!([7, "7", "a1b2"])).unwrap();
        assert_eq!(ids[0], ids[1]);
        assert_eq!(ids[2].to_string(), "a1b2");
    }

    #[test]
    fn test_join_row_aliases() {
        let rows: Vec<JoinRow> = serde_json::from_value(json!([
            { "id": 1, "articles_id": 3, "tags_id": 9 },
            { "id": 2, "events_id": "e-1", "tags_id": null },
        ]))
        .unwrap();
        assert_eq!(
            rows[0],
            JoinRow {
                content_id: Some(ItemId::from(3_i64)),
                tag_id: Some(ItemId::from(9_i64)),
            }
        );
        assert_eq!(rows[1].content_id, Some(ItemId::from("e-1")));
        assert_eq!(rows[1].tag_id, None);
    }

    #[test]
    fn test_event_fee_as_number() {
        let event: Event = serde_json::from_value(json!({
            "id": 1, "slug": "fair", "title": "Fair", "fee": 5
        }))
        .unwrap();
        assert_eq!(event.fee.as_deref(), Some("5"));
        assert!(event.time.is_none());
    }

    #[test]
    fn test_tag_name_alias() {
        let tag: Tag = serde_json::from_value(json!({ "id": 2, "name": "Music" })).unwrap();
        assert_eq!(tag.label.as_deref(), Some("Music"));
    }

    #[test]
    fn test_event_upcoming() {
        let event: Event = serde_json::from_value(json!({
            "id": 1, "slug": "fair", "title": "Fair",
            "time": "2024-07-01T10:00:00Z", "end_time": "2024-07-01T12:00:00Z"
        }))
        .unwrap();
        let before = parse_instant("2024-07-01T11:00:00Z").unwrap();
        let after = parse_instant("2024-07-02T00:00:00Z").unwrap();
        assert!(event.is_upcoming(before));
        assert!(!event.is_upcoming(after));
    }
}
