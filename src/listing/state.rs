use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Items per listing page
pub const PAGE_SIZE: usize = 12;

/// Listing order by `date_created`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            Self::Newest => Self::Oldest,
            Self::Oldest => Self::Newest,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newest" | "desc" => Ok(Self::Newest),
            "oldest" | "asc" => Ok(Self::Oldest),
            other => Err(format!("unknown sort order: {other}")),
        }
    }
}

/// Where a listing is in its load cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingPhase {
    Idle,
    Loading,
    Loaded,
}

/// Result of a page change request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageChange {
    /// Out of range, nothing happened
    Unchanged,
    /// Page switched; the view should scroll back to the top
    Moved,
}

impl PageChange {
    pub fn scroll_to_top(self) -> bool {
        self == Self::Moved
    }
}

/// Filter, sort and page selection of a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingState {
    pub selected_tags: BTreeSet<String>,
    pub sort_order: SortOrder,
    pub current_page: usize,
    pub page_size: usize,
}

impl ListingState {
    pub fn new(page_size: usize) -> Self {
        Self {
            selected_tags: BTreeSet::new(),
            sort_order: SortOrder::default(),
            current_page: 1,
            page_size: page_size.max(1),
        }
    }
}

impl Default for ListingState {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

/// `ceil(filtered_count / page_size)`, never less than one
pub fn total_pages(filtered_count: usize, page_size: usize) -> usize {
    filtered_count.div_ceil(page_size.max(1)).max(1)
}
