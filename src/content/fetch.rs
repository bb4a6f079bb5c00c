//! Collection fetchers

use crate::cms::{CmsClient, CmsError, Query};

use super::join::aggregate;
use super::model::{Content, JoinRow, Tag, Tagged};
use super::JoinDegraded;

/// Tag dictionary collection
pub const TAGS_COLLECTION: &str = "tags";

/// Read the primary collection of `T`
pub async fn fetch_items<T: Content>(
    client: &CmsClient,
    query: Option<&Query>,
) -> Result<Vec<T>, CmsError> {
    client.read_items(T::COLLECTION, query).await
}

/// Read every junction row linking `T` to tags
pub async fn fetch_join_rows<T: Content>(client: &CmsClient) -> Result<Vec<JoinRow>, CmsError> {
    client.read_items(T::JOIN_COLLECTION, None).await
}

/// Read the tag dictionary
pub async fn fetch_tags(client: &CmsClient) -> Result<Vec<Tag>, CmsError> {
    client.read_items(TAGS_COLLECTION, None).await
}

/// Fetch items, junction rows and tags concurrently and join them.
///
/// `query` narrows the primary collection only. Any failed read fails the
/// whole join.
pub async fn fetch_tagged<T: Content>(
    client: &CmsClient,
    query: Option<&Query>,
) -> Result<Vec<Tagged<T>>, JoinDegraded> {
    let result = tokio::try_join!(
        async {
            fetch_items::<T>(client, query)
                .await
                .map_err(|e| JoinDegraded::new(T::COLLECTION, e))
        },
        async {
            fetch_join_rows::<T>(client)
                .await
                .map_err(|e| JoinDegraded::new(T::JOIN_COLLECTION, e))
        },
        async {
            fetch_tags(client)
                .await
                .map_err(|e| JoinDegraded::new(TAGS_COLLECTION, e))
        },
    );

    match result {
        Ok((items, joins, tags)) => {
            tracing::debug!(
                "Joined {} {} with {} tag links and {} tags",
                items.len(),
                T::COLLECTION,
                joins.len(),
                tags.len()
            );
            Ok(aggregate(items, &joins, &tags))
        }
        Err(e) => {
            tracing::warn!("Failed to load {}: {}", T::COLLECTION, e);
            Err(e)
        }
    }
}

/// Listing variant of [`fetch_tagged`]: a degraded join becomes an empty list
pub async fn fetch_tagged_or_empty<T: Content>(client: &CmsClient) -> Vec<Tagged<T>> {
    fetch_tagged(client, None).await.unwrap_or_default()
}
