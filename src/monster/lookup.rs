//! Read paths shared by the MCP tools and the `get` / `similar` commands.

use tracing::debug;

use super::normalize_name;
use super::types::{Monster, RecordError};
use crate::store::{MonsterStore, StoreError};

/// Errors from monster lookups.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("monster not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Record(#[from] RecordError),
}

/// Look up one monster by name, normalized to capitalized-first-letter form.
///
/// A missing monster is `Ok(None)`, not an error.
pub async fn get_monster(
    store: &dyn MonsterStore,
    name: &str,
) -> Result<Option<Monster>, StoreError> {
    let key = normalize_name(name);
    debug!(requested = %name, key = %key, "looking up monster");
    store.find_one_by_name(&key).await
}

/// Resolve `name`, then return up to `limit` monsters ordered by distance to it.
///
/// The resolved monster is normally the first result (distance 0 to itself).
/// When it cannot be resolved no similarity query is issued.
pub async fn find_similar_monsters(
    store: &dyn MonsterStore,
    name: &str,
    limit: usize,
) -> Result<Vec<Monster>, LookupError> {
    let monster = get_monster(store, name)
        .await?
        .ok_or_else(|| LookupError::NotFound(name.to_string()))?;

    let vector = monster.search_vector()?;
    debug!(name = %monster.name, limit, "querying nearest neighbors");
    Ok(store.find_nearest(vector.as_slice(), limit).await?)
}
