//! List helpers: pager windows and tag counts

use indexmap::IndexMap;
use serde::Serialize;

use crate::content::Tagged;

/// One slot in a pager
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PagerSlot {
    Page { number: usize, current: bool },
    Ellipsis,
}

/// Page numbers to show around `current`, with the first and last page
/// always reachable and gaps collapsed into ellipses
pub fn pager_slots(current: usize, total: usize, mid_size: usize) -> Vec<PagerSlot> {
    if total <= 1 {
        return Vec::new();
    }

    let current = current.clamp(1, total);
    let start = current.saturating_sub(mid_size).max(1);
    let end = (current + mid_size).min(total);
    let mut slots = Vec::new();

    if start > 1 {
        slots.push(PagerSlot::Page {
            number: 1,
            current: false,
        });
        if start > 2 {
            slots.push(PagerSlot::Ellipsis);
        }
    }

    for number in start..=end {
        slots.push(PagerSlot::Page {
            number,
            current: number == current,
        });
    }

    if end < total {
        if end < total - 1 {
            slots.push(PagerSlot::Ellipsis);
        }
        slots.push(PagerSlot::Page {
            number: total,
            current: false,
        });
    }

    slots
}

/// Number of items per tag, most used first, ties by name
pub fn tag_counts<T>(items: &[Tagged<T>]) -> IndexMap<String, usize> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();

    for item in items {
        for tag in &item.tags {
            *counts.entry(tag.clone()).or_insert(0) += 1;
        }
    }

    counts.sort_by(|a_tag, a_count, b_tag, b_count| {
        b_count.cmp(a_count).then_with(|| a_tag.cmp(b_tag))
    });
    counts
}
