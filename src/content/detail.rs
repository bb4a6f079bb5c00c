//! Detail resolver: one item by slug

use crate::cms::{CmsClient, Query};

use super::fetch::fetch_tagged;
use super::model::{Content, Tagged};
use super::ContentError;

/// Resolve a single `T` by slug through the tag-join pipeline.
///
/// A failed fetch and an empty result both end in `NotFound`. If the slug
/// is not unique the first match wins.
pub async fn resolve<T: Content>(client: &CmsClient, slug: &str) -> Result<Tagged<T>, ContentError> {
    let query = Query::eq("slug", slug);

    let items = match fetch_tagged::<T>(client, Some(&query)).await {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!("Treating {} {:?} as missing: {}", T::KIND, slug, e);
            return Err(ContentError::not_found(T::KIND, slug));
        }
    };

    if items.len() > 1 {
        tracing::debug!("{} {} share slug {:?}, using the first", items.len(), T::COLLECTION, slug);
    }

    items
        .into_iter()
        .find(|item| item.slug() == slug)
        .ok_or_else(|| ContentError::not_found(T::KIND, slug))
}
