use thiserror::Error;

use crate::cms::CmsError;

/// One of the three collections behind a tag join could not be read.
///
/// Returned instead of a partially joined list, so callers can tell
/// "nothing published" apart from "CMS unavailable".
#[derive(Debug, Error)]
#[error("tag join degraded: failed to read {collection}: {source}")]
pub struct JoinDegraded {
    pub collection: &'static str,
    #[source]
    pub source: CmsError,
}

impl JoinDegraded {
    pub fn new(collection: &'static str, source: CmsError) -> Self {
        Self { collection, source }
    }
}

/// Detail lookup failure
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("no {kind} with slug {slug:?}")]
    NotFound { kind: &'static str, slug: String },
}

impl ContentError {
    pub fn not_found(kind: &'static str, slug: &str) -> Self {
        Self::NotFound {
            kind,
            slug: slug.to_string(),
        }
    }
}
