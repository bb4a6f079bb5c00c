//! Content module - CMS records, the tag join, and slug lookup

mod detail;
mod error;
pub mod fetch;
mod join;
mod model;

pub use detail::resolve;
pub use error::{ContentError, JoinDegraded};
pub use fetch::fetch_tagged;
pub use join::aggregate;
pub use model::{Article, Content, Event, ItemId, JoinRow, Tag, Tagged};
