//! Listing module - in-memory filter, sort and pagination of tagged items

mod controller;
mod state;
mod task;

pub use controller::{Listing, ListingView};
pub use state::{total_pages, ListingPhase, ListingState, PageChange, SortOrder, PAGE_SIZE};
pub use task::{spawn_load, LoadHandle, Loaded, RequestToken};
