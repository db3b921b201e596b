//! Photo resolution: photo ids to `{id, image_url, display_name}`.
//!
//! Photos live in the wider application's `photos` table. Walls reference
//! them weakly, so an id that no longer resolves is simply absent from the
//! result rather than an error.

#[cfg(test)]
#[path = "photo_test.rs"]
mod photo_test;

use std::collections::{HashMap, HashSet};

use canvas::doc::{PhotoId, PhotoRef};
use sqlx::PgPool;
use uuid::Uuid;

use crate::services::wall::WallError;

/// Largest id list accepted per resolve call.
pub const MAX_RESOLVE_IDS: usize = 1000;

/// Drop duplicate ids, keeping the first occurrence.
pub(crate) fn dedup_ids(ids: &[PhotoId]) -> Vec<PhotoId> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

/// Arrange resolved rows in request order, skipping ids that did not resolve.
pub(crate) fn order_like(ids: &[PhotoId], rows: Vec<PhotoRef>) -> Vec<PhotoRef> {
    let mut by_id: HashMap<PhotoId, PhotoRef> = rows.into_iter().map(|p| (p.id, p)).collect();
    ids.iter().filter_map(|id| by_id.remove(id)).collect()
}

/// Resolve the owner's photos by id, in request order.
///
/// # Errors
///
/// Returns `InvalidInput` when more than [`MAX_RESOLVE_IDS`] distinct ids are
/// requested, or a database error.
pub async fn resolve_photos(pool: &PgPool, owner_id: Uuid, ids: &[PhotoId]) -> Result<Vec<PhotoRef>, WallError> {
    let ids = dedup_ids(ids);
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    if ids.len() > MAX_RESOLVE_IDS {
        return Err(WallError::InvalidInput(format!("at most {MAX_RESOLVE_IDS} photo ids per request")));
    }

    let rows = sqlx::query_as::<_, (Uuid, String, String)>(
        "SELECT id, image_url, display_name FROM photos WHERE owner_id = $1 AND id = ANY($2)",
    )
    .bind(owner_id)
    .bind(&ids)
    .fetch_all(pool)
    .await?;

    let photos = rows
        .into_iter()
        .map(|(id, image_url, display_name)| PhotoRef { id, image_url, display_name })
        .collect();
    Ok(order_like(&ids, photos))
}
