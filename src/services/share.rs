//! Share links: token lifecycle and the public read path.
//!
//! A wall is public exactly while it carries a share token. Tokens are 32
//! random bytes, hex encoded. Enabling sharing on a wall that already has a
//! token keeps the existing link; clearing it and enabling again issues a
//! new one.

#[cfg(test)]
#[path = "share_test.rs"]
mod share_test;

use std::collections::HashSet;

use canvas::doc::{PhotoId, SharedWall, Wall, WallId};
use rand::Rng;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::services::wall::{WALL_COLUMNS, WallError, WallTuple, wall_from_row};
use crate::services::{item, photo};

const TOKEN_BYTES: usize = 32;
pub const TOKEN_LEN: usize = TOKEN_BYTES * 2;

/// Fresh random share token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; TOKEN_BYTES] = rand::rng().random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Whether `token` could have come from [`generate_token`].
#[must_use]
pub fn is_well_formed(token: &str) -> bool {
    token.len() == TOKEN_LEN && token.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

/// Give one of the owner's walls a share token, keeping an existing one.
///
/// # Errors
///
/// Returns `NotFound` if the wall does not exist or belongs to someone else.
pub async fn enable_sharing(pool: &PgPool, wall_id: WallId, owner_id: Uuid) -> Result<Wall, WallError> {
    let row = sqlx::query_as::<_, WallTuple>(&format!(
        "UPDATE walls
         SET share_token = COALESCE(share_token, $3), updated_at = now()
         WHERE id = $1 AND owner_id = $2
         RETURNING {WALL_COLUMNS}"
    ))
    .bind(wall_id)
    .bind(owner_id)
    .bind(generate_token())
    .fetch_optional(pool)
    .await?
    .ok_or(WallError::NotFound(wall_id))?;
    info!(%wall_id, "sharing enabled");
    Ok(wall_from_row(row))
}

/// Clear a wall's share token. The old link stops resolving immediately.
///
/// # Errors
///
/// Returns `NotFound` if the wall does not exist or belongs to someone else.
pub async fn disable_sharing(pool: &PgPool, wall_id: WallId, owner_id: Uuid) -> Result<Wall, WallError> {
    let row = sqlx::query_as::<_, WallTuple>(&format!(
        "UPDATE walls
         SET share_token = NULL, updated_at = now()
         WHERE id = $1 AND owner_id = $2
         RETURNING {WALL_COLUMNS}"
    ))
    .bind(wall_id)
    .bind(owner_id)
    .fetch_optional(pool)
    .await?
    .ok_or(WallError::NotFound(wall_id))?;
    info!(%wall_id, "sharing disabled");
    Ok(wall_from_row(row))
}

/// Distinct photo ids referenced by `items`, in first-seen order.
pub(crate) fn referenced_photos(items: &[canvas::doc::WallItem]) -> Vec<PhotoId> {
    let mut seen = HashSet::new();
    items.iter().map(|i| i.photo_id).filter(|id| seen.insert(*id)).collect()
}

/// Everything the read-only viewer needs for a share token.
///
/// # Errors
///
/// Returns `ShareNotFound` for a malformed, cleared or unknown token.
pub async fn load_shared(pool: &PgPool, token: &str) -> Result<SharedWall, WallError> {
    if !is_well_formed(token) {
        return Err(WallError::ShareNotFound);
    }
    let row = sqlx::query_as::<_, WallTuple>(&format!("SELECT {WALL_COLUMNS} FROM walls WHERE share_token = $1"))
        .bind(token)
        .fetch_optional(pool)
        .await?
        .ok_or(WallError::ShareNotFound)?;
    let wall = wall_from_row(row);

    let items = item::load_items(pool, wall.id).await?;
    let mut photos = Vec::new();
    // Resolve in chunks so a very large wall never trips the per-call cap.
    for chunk in referenced_photos(&items).chunks(photo::MAX_RESOLVE_IDS) {
        photos.extend(photo::resolve_photos(pool, wall.owner_id, chunk).await?);
    }

    Ok(SharedWall { wall, items, photos })
}
