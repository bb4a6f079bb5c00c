//! CMS client adapter
//!
//! Thin wrapper around the headless CMS REST API. Every read goes through
//! [`CmsClient::read_items`], which disables HTTP caching and unwraps the
//! `{ "data": [...] }` envelope.

mod client;
mod error;
mod query;

pub use client::CmsClient;
pub use error::CmsError;
pub use query::Query;
