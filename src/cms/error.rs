use thiserror::Error;

/// Failure reading a collection from the CMS.
#[derive(Debug, Error)]
pub enum CmsError {
    /// Connection refused, DNS failure, timeout and friends.
    #[error("CMS unreachable: {0}")]
    Network(#[from] reqwest::Error),

    /// The CMS answered with a non-success status.
    #[error("CMS returned HTTP {status}: {message}")]
    Upstream { status: u16, message: String },

    /// The body was not the expected `{ "data": [...] }` envelope.
    #[error("Unexpected CMS response for {collection}: {message}")]
    Decode { collection: String, message: String },

    /// The configured base URL cannot be joined with a collection path.
    #[error("Invalid CMS URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl CmsError {
    /// Returns `true` if the CMS reported the collection or item as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Upstream { status: 404, .. })
    }
}
