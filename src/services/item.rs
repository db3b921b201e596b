//! Wall item service: list, bulk insert, partial update, delete.
//!
//! Item writes arrive from the editor after a gesture commits. There is no
//! version check: the last write for an item wins. Width is clamped to the
//! minimum on every write path, including rows already in flight from an
//! older client.

#[cfg(test)]
#[path = "item_test.rs"]
mod item_test;

use canvas::consts::MIN_ITEM_WIDTH;
use canvas::doc::{ItemId, PartialWallItem, WallId, WallItem};
use sqlx::{PgConnection, PgPool, QueryBuilder};
use uuid::Uuid;

use crate::services::wall::{self, WallError};

/// Largest batch accepted by [`insert_items`].
pub const MAX_INSERT_BATCH: usize = 500;

type ItemTuple = (Uuid, Uuid, Uuid, f64, f64, f64, i64);

const ITEM_COLUMNS: &str = "id, wall_id, photo_id, x, y, width, z_index";

fn item_from_row(row: ItemTuple) -> WallItem {
    let (id, wall_id, photo_id, x, y, width, z_index) = row;
    WallItem { id, wall_id, photo_id, x, y, width, z_index }
}

// =============================================================================
// VALIDATION
// =============================================================================

/// Check an incoming item against the wall it is posted to and clamp width.
pub(crate) fn validate_item(mut item: WallItem, wall_id: WallId) -> Result<WallItem, WallError> {
    if item.wall_id != wall_id {
        return Err(WallError::InvalidInput(format!("item {} belongs to wall {}", item.id, item.wall_id)));
    }
    if !(item.x.is_finite() && item.y.is_finite() && item.width.is_finite()) {
        return Err(WallError::InvalidInput(format!("item {} has non-finite geometry", item.id)));
    }
    item.width = item.width.max(MIN_ITEM_WIDTH);
    Ok(item)
}

/// Reject empty patches and non-finite coordinates.
pub(crate) fn validate_patch(fields: &PartialWallItem) -> Result<(), WallError> {
    if fields.is_empty() {
        return Err(WallError::InvalidInput("nothing to update".into()));
    }
    let finite = [fields.x, fields.y, fields.width].into_iter().flatten().all(f64::is_finite);
    if !finite {
        return Err(WallError::InvalidInput("non-finite geometry".into()));
    }
    Ok(())
}

// =============================================================================
// QUERIES
// =============================================================================

/// Items of one of the owner's walls, ascending z.
///
/// # Errors
///
/// Returns `NotFound` if the wall does not exist or belongs to someone else.
pub async fn list_items(pool: &PgPool, wall_id: WallId, owner_id: Uuid) -> Result<Vec<WallItem>, WallError> {
    wall::ensure_owner(pool, wall_id, owner_id).await?;
    load_items(pool, wall_id).await
}

/// Items of any wall, ascending z. Callers check access first.
pub(crate) async fn load_items(pool: &PgPool, wall_id: WallId) -> Result<Vec<WallItem>, WallError> {
    let rows = sqlx::query_as::<_, ItemTuple>(&format!(
        "SELECT {ITEM_COLUMNS} FROM wall_items WHERE wall_id = $1 ORDER BY z_index ASC, created_at ASC, id ASC"
    ))
    .bind(wall_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(item_from_row).collect())
}

/// Insert a batch of client-created items. Ids already present are skipped,
/// so a retried request is harmless. Returns the number of rows written.
///
/// # Errors
///
/// Returns `InvalidInput` for an oversized batch or a malformed item, and
/// `NotFound` if the wall is not the owner's.
pub async fn insert_items(pool: &PgPool, wall_id: WallId, owner_id: Uuid, items: Vec<WallItem>) -> Result<u64, WallError> {
    if items.len() > MAX_INSERT_BATCH {
        return Err(WallError::InvalidInput(format!("at most {MAX_INSERT_BATCH} items per request")));
    }
    let items = items
        .into_iter()
        .map(|item| validate_item(item, wall_id))
        .collect::<Result<Vec<_>, _>>()?;

    wall::ensure_owner(pool, wall_id, owner_id).await?;
    let written = insert_rows(&mut *pool.acquire().await?, &items).await?;
    if written > 0 {
        wall::touch_wall(pool, wall_id).await?;
    }
    Ok(written)
}

/// Bulk insert already-validated items on `conn`, which may be a transaction.
pub(crate) async fn insert_rows(conn: &mut PgConnection, items: &[WallItem]) -> Result<u64, WallError> {
    if items.is_empty() {
        return Ok(0);
    }
    let mut builder = QueryBuilder::new("INSERT INTO wall_items (id, wall_id, photo_id, x, y, width, z_index) ");
    builder.push_values(items, |mut row, item| {
        row.push_bind(item.id)
            .push_bind(item.wall_id)
            .push_bind(item.photo_id)
            .push_bind(item.x)
            .push_bind(item.y)
            .push_bind(item.width.max(MIN_ITEM_WIDTH))
            .push_bind(item.z_index);
    });
    builder.push(" ON CONFLICT (id) DO NOTHING");
    let result = builder.build().execute(conn).await?;
    Ok(result.rows_affected())
}

/// Apply a partial update to one item and return the stored result.
///
/// # Errors
///
/// Returns `InvalidInput` for an empty or malformed patch, and `ItemNotFound`
/// when the item is not on one of the owner's walls.
pub async fn update_item(
    pool: &PgPool,
    wall_id: WallId,
    item_id: ItemId,
    owner_id: Uuid,
    fields: &PartialWallItem,
) -> Result<WallItem, WallError> {
    validate_patch(fields)?;

    let row = sqlx::query_as::<_, ItemTuple>(
        "UPDATE wall_items i
         SET x = COALESCE($4, i.x),
             y = COALESCE($5, i.y),
             width = GREATEST(COALESCE($6, i.width), $8),
             z_index = COALESCE($7, i.z_index),
             updated_at = now()
         FROM walls w
         WHERE i.id = $1 AND i.wall_id = $2 AND w.id = i.wall_id AND w.owner_id = $3
         RETURNING i.id, i.wall_id, i.photo_id, i.x, i.y, i.width, i.z_index",
    )
    .bind(item_id)
    .bind(wall_id)
    .bind(owner_id)
    .bind(fields.x)
    .bind(fields.y)
    .bind(fields.width)
    .bind(fields.z_index)
    .bind(MIN_ITEM_WIDTH)
    .fetch_optional(pool)
    .await?
    .ok_or(WallError::ItemNotFound(item_id))?;

    wall::touch_wall(pool, wall_id).await?;
    Ok(item_from_row(row))
}

/// Remove one item. The referenced photo is untouched.
///
/// # Errors
///
/// Returns `ItemNotFound` when the item is not on one of the owner's walls.
pub async fn delete_item(pool: &PgPool, wall_id: WallId, item_id: ItemId, owner_id: Uuid) -> Result<(), WallError> {
    let result = sqlx::query(
        "DELETE FROM wall_items i
         USING walls w
         WHERE i.id = $1 AND i.wall_id = $2 AND w.id = i.wall_id AND w.owner_id = $3",
    )
    .bind(item_id)
    .bind(wall_id)
    .bind(owner_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(WallError::ItemNotFound(item_id));
    }
    wall::touch_wall(pool, wall_id).await?;
    Ok(())
}
