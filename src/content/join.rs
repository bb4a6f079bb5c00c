//! Tag join: resolve each item's junction rows to tag labels

use std::collections::HashMap;

use super::model::{Content, ItemId, JoinRow, Tag, Tagged};

/// Join `items` with their junction rows and the tag dictionary.
///
/// Labels are attached in junction-row order. Rows pointing at unknown or
/// label-less tags are skipped; every item comes out exactly once, in
/// input order.
pub fn aggregate<T: Content>(items: Vec<T>, joins: &[JoinRow], tags: &[Tag]) -> Vec<Tagged<T>> {
    let labels = label_map(tags);

    let mut by_item: HashMap<&ItemId, Vec<&ItemId>> = HashMap::new();
    for row in joins {
        if let (Some(content_id), Some(tag_id)) = (&row.content_id, &row.tag_id) {
            by_item.entry(content_id).or_default().push(tag_id);
        }
    }

    items
        .into_iter()
        .map(|item| {
            let tags = by_item
                .get(item.id())
                .map(|tag_ids| {
                    tag_ids
                        .iter()
                        .filter_map(|id| labels.get(*id))
                        .map(|label| label.to_string())
                        .collect()
                })
                .unwrap_or_default();
            Tagged { item, tags }
        })
        .collect()
}

/// `tag_id -> label`, later duplicates win, blank labels dropped
fn label_map(tags: &[Tag]) -> HashMap<&ItemId, &str> {
    let mut labels = HashMap::with_capacity(tags.len());
    for tag in tags {
        match tag.label.as_deref() {
            Some(label) if !label.trim().is_empty() => {
                labels.insert(&tag.id, label);
            }
            _ => {
                labels.remove(&tag.id);
            }
        }
    }
    labels
}
