//! Listing controller: tag filter, date sort and pagination over an
//! in-memory collection

use std::collections::BTreeSet;

use serde::Serialize;

use super::state::{total_pages, ListingPhase, ListingState, PageChange, SortOrder};
use super::task::{spawn_load, LoadHandle, Loaded, RequestToken};
use crate::cms::CmsClient;
use crate::content::{Content, Tagged};
use crate::helpers::timestamp_millis;

/// The slice of a listing currently on screen
#[derive(Debug, Serialize)]
pub struct ListingView<'a, T> {
    pub items: Vec<&'a Tagged<T>>,
    pub current_page: usize,
    pub total_pages: usize,
    pub filtered_count: usize,
    pub sort_order: SortOrder,
    pub selected_tags: &'a BTreeSet<String>,
}

/// A fetched collection plus the user's filter, sort and page choices
#[derive(Debug)]
pub struct Listing<T> {
    items: Vec<Tagged<T>>,
    tags: Vec<String>,
    state: ListingState,
    phase: ListingPhase,
    latest: Option<RequestToken>,
    degraded: Option<String>,
}

impl<T: Content> Listing<T> {
    pub fn new(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            tags: Vec::new(),
            state: ListingState::new(page_size),
            phase: ListingPhase::Idle,
            latest: None,
            degraded: None,
        }
    }

    /// Listing over an already fetched collection
    pub fn with_items(items: Vec<Tagged<T>>, page_size: usize) -> Self {
        let mut listing = Self::new(page_size);
        listing.load(items);
        listing
    }

    /// Replace the base collection and recompute the distinct tags
    pub fn load(&mut self, items: Vec<Tagged<T>>) {
        let distinct: BTreeSet<&String> = items.iter().flat_map(|item| &item.tags).collect();
        self.tags = distinct.into_iter().cloned().collect();
        self.items = items;
        self.phase = ListingPhase::Loaded;
        self.clamp_page();
    }

    /// Start fetching the collection. Any load already in flight is
    /// superseded: its result will be ignored by [`Listing::apply`].
    pub fn begin_load(&mut self, client: &CmsClient) -> LoadHandle<T> {
        let token = self
            .latest
            .map(RequestToken::next)
            .unwrap_or_else(RequestToken::first);
        self.latest = Some(token);
        self.phase = ListingPhase::Loading;
        spawn_load(client.clone(), token)
    }

    /// Apply a finished load. Returns `false` for superseded loads.
    pub fn apply(&mut self, loaded: Loaded<T>) -> bool {
        if self.latest != Some(loaded.token) {
            tracing::debug!(
                "Ignoring stale load {} of {} (latest {:?})",
                loaded.token,
                T::COLLECTION,
                self.latest
            );
            return false;
        }

        match loaded.result {
            Ok(items) => {
                self.degraded = None;
                self.load(items);
            }
            Err(e) => {
                self.degraded = Some(e.to_string());
                self.load(Vec::new());
            }
        }
        true
    }

    pub fn phase(&self) -> ListingPhase {
        self.phase
    }

    /// Why the last load came back empty, if the CMS failed
    pub fn degraded(&self) -> Option<&str> {
        self.degraded.as_deref()
    }

    pub fn state(&self) -> &ListingState {
        &self.state
    }

    /// Every tag in the collection, deduplicated and sorted
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add `tag` to the selection, or remove it if already selected
    pub fn toggle_tag(&mut self, tag: &str) {
        if !self.state.selected_tags.remove(tag) {
            self.state.selected_tags.insert(tag.to_string());
        }
        self.state.current_page = 1;
    }

    pub fn clear_tags(&mut self) {
        self.state.selected_tags.clear();
        self.state.current_page = 1;
    }

    pub fn toggle_sort_order(&mut self) {
        self.state.sort_order = self.state.sort_order.toggled();
    }

    /// Switch to page `page`; pages outside `[1, total_pages]` are ignored
    pub fn go_to_page(&mut self, page: usize) -> PageChange {
        if page < 1 || page > self.total_pages() {
            return PageChange::Unchanged;
        }
        self.state.current_page = page;
        PageChange::Moved
    }

    /// Items matching the selection (any selected tag), in sort order
    pub fn filtered(&self) -> Vec<&Tagged<T>> {
        let selected = &self.state.selected_tags;
        let mut matching: Vec<(i64, &Tagged<T>)> = self
            .items
            .iter()
            .filter(|item| selected.is_empty() || item.has_any_tag(selected))
            .map(|item| (timestamp_millis(item.date_created()), item))
            .collect();

        match self.state.sort_order {
            SortOrder::Newest => matching.sort_by(|a, b| b.0.cmp(&a.0)),
            SortOrder::Oldest => matching.sort_by(|a, b| a.0.cmp(&b.0)),
        }

        matching.into_iter().map(|(_, item)| item).collect()
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered_count(), self.state.page_size)
    }

    fn filtered_count(&self) -> usize {
        let selected = &self.state.selected_tags;
        self.items
            .iter()
            .filter(|item| selected.is_empty() || item.has_any_tag(selected))
            .count()
    }

    /// The current page of the filtered, sorted collection
    pub fn view(&self) -> ListingView<'_, T> {
        let filtered = self.filtered();
        let filtered_count = filtered.len();
        let total_pages = total_pages(filtered_count, self.state.page_size);
        let current_page = self.state.current_page.clamp(1, total_pages);

        let items = filtered
            .into_iter()
            .skip((current_page - 1) * self.state.page_size)
            .take(self.state.page_size)
            .collect();

        ListingView {
            items,
            current_page,
            total_pages,
            filtered_count,
            sort_order: self.state.sort_order,
            selected_tags: &self.state.selected_tags,
        }
    }

    fn clamp_page(&mut self) {
        let total = self.total_pages();
        self.state.current_page = self.state.current_page.clamp(1, total);
    }
}
