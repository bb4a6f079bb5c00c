//! Helper functions for pages and the CLI
//!
//! Date parsing and formatting, URL building, pager windows and the
//! add-to-calendar link.

mod calendar;
mod date;
mod list;
mod url;

pub use self::calendar::*;
pub use self::date::*;
pub use self::list::*;
pub use self::url::*;
