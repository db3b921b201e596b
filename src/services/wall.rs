//! Wall service: CRUD over the `walls` table.
//!
//! DESIGN
//! ======
//! Every query is scoped by `owner_id` in SQL, so a wall owned by someone
//! else is indistinguishable from a missing one (`NotFound`). Timestamps
//! leave Postgres as epoch milliseconds to match the wire format.
//!
//! A wall created with `photo_ids` is laid out with the same grid placement
//! the editor uses when photos are added to an open wall.

#[cfg(test)]
#[path = "wall_test.rs"]
mod wall_test;

use canvas::aspect::AspectRatios;
use canvas::consts::{DEFAULT_BACKGROUND, DEFAULT_WALL_HEIGHT, DEFAULT_WALL_WIDTH};
use canvas::doc::{PhotoId, Wall, WallDoc, WallId, WallItem};
use sqlx::{PgConnection, PgPool};
use tracing::info;
use uuid::Uuid;

use crate::services::{item, photo};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum WallError {
    #[error("wall not found: {0}")]
    NotFound(Uuid),
    #[error("item not found: {0}")]
    ItemNotFound(Uuid),
    #[error("share link not found")]
    ShareNotFound,
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub const DEFAULT_WALL_NAME: &str = "Untitled Wall";
pub const MAX_NAME_LEN: usize = 200;
/// Upper bound for either canvas dimension.
pub const MAX_WALL_DIMENSION: f64 = 100_000.0;

/// Validated input for [`create_wall`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewWall {
    pub name: String,
    pub width: f64,
    pub height: f64,
    pub background_color: String,
}

impl Default for NewWall {
    fn default() -> Self {
        Self {
            name: DEFAULT_WALL_NAME.to_owned(),
            width: DEFAULT_WALL_WIDTH,
            height: DEFAULT_WALL_HEIGHT,
            background_color: DEFAULT_BACKGROUND.to_owned(),
        }
    }
}

impl NewWall {
    /// Build from optional request fields, applying defaults and validation.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an over-long name, a malformed color, or a
    /// non-positive or non-finite dimension.
    pub fn from_parts(
        name: Option<&str>,
        width: Option<f64>,
        height: Option<f64>,
        background_color: Option<&str>,
    ) -> Result<Self, WallError> {
        let defaults = Self::default();
        let name = match name.map(str::trim) {
            None | Some("") => defaults.name,
            Some(name) => normalize_name(name)?,
        };
        let width = width.map_or(Ok(defaults.width), |w| validate_dimension("width", w))?;
        let height = height.map_or(Ok(defaults.height), |h| validate_dimension("height", h))?;
        let background_color = match background_color {
            None => defaults.background_color,
            Some(color) => normalize_color(color)?,
        };
        Ok(Self { name, width, height, background_color })
    }
}

/// Fields an owner may change on an existing wall.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WallPatch {
    pub name: Option<String>,
    pub background_color: Option<String>,
}

impl WallPatch {
    /// Validate and normalize a patch.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the patch is empty or a field is malformed.
    pub fn validated(self) -> Result<Self, WallError> {
        if self.name.is_none() && self.background_color.is_none() {
            return Err(WallError::InvalidInput("nothing to update".into()));
        }
        let name = self.name.as_deref().map(normalize_name).transpose()?;
        let background_color = self.background_color.as_deref().map(normalize_color).transpose()?;
        Ok(Self { name, background_color })
    }
}

// =============================================================================
// VALIDATION
// =============================================================================

/// Trim a wall name; blank or over-long names are rejected.
pub(crate) fn normalize_name(raw: &str) -> Result<String, WallError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(WallError::InvalidInput("name must not be blank".into()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(WallError::InvalidInput(format!("name longer than {MAX_NAME_LEN} characters")));
    }
    Ok(name.to_owned())
}

/// Accept `#rgb`, `#rrggbb` or `#rrggbbaa`; stored lowercase.
pub(crate) fn normalize_color(raw: &str) -> Result<String, WallError> {
    let color = raw.trim();
    let valid = color
        .strip_prefix('#')
        .is_some_and(|hex| matches!(hex.len(), 3 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit()));
    if !valid {
        return Err(WallError::InvalidInput(format!("invalid background color {color:?}")));
    }
    Ok(color.to_ascii_lowercase())
}

pub(crate) fn validate_dimension(field: &str, value: f64) -> Result<f64, WallError> {
    if value.is_finite() && value > 0.0 && value <= MAX_WALL_DIMENSION {
        Ok(value)
    } else {
        Err(WallError::InvalidInput(format!("{field} must be in (0, {MAX_WALL_DIMENSION}]")))
    }
}

/// Grid-placed items for a newly created wall, in `photo_ids` order.
///
/// Nothing is measured yet, so every item assumes the default aspect ratio.
#[must_use]
pub fn initial_items(wall_id: WallId, photo_ids: &[PhotoId], width: f64, height: f64) -> Vec<WallItem> {
    let mut doc = WallDoc::new();
    doc.add_items(wall_id, photo_ids, width, height, &AspectRatios::new())
}

// =============================================================================
// ROWS
// =============================================================================

pub(crate) const WALL_COLUMNS: &str = "id, name, owner_id, width, height, background_color, share_token, \
     (EXTRACT(EPOCH FROM created_at) * 1000)::BIGINT, \
     (EXTRACT(EPOCH FROM updated_at) * 1000)::BIGINT";

pub(crate) type WallTuple = (Uuid, String, Uuid, f64, f64, String, Option<String>, i64, i64);

pub(crate) fn wall_from_row(row: WallTuple) -> Wall {
    let (id, name, owner_id, width, height, background_color, share_token, created_at, updated_at) = row;
    Wall { id, name, owner_id, width, height, background_color, share_token, created_at, updated_at }
}

// =============================================================================
// CRUD
// =============================================================================

/// Create a wall, optionally pre-populated with the owner's photos.
///
/// Photo ids the owner does not own are dropped; duplicates keep their first
/// position.
///
/// # Errors
///
/// Returns `InvalidInput` for too many photo ids, or a database error.
pub async fn create_wall(pool: &PgPool, owner_id: Uuid, new: &NewWall, photo_ids: &[PhotoId]) -> Result<Wall, WallError> {
    let owned: Vec<PhotoId> = if photo_ids.is_empty() {
        Vec::new()
    } else {
        photo::resolve_photos(pool, owner_id, photo_ids)
            .await?
            .into_iter()
            .map(|p| p.id)
            .collect()
    };

    let mut tx = pool.begin().await?;
    let (wall, placed) = insert_wall(tx.as_mut(), owner_id, new, &owned).await?;
    tx.commit().await?;

    info!(wall_id = %wall.id, %owner_id, items = placed, "created wall");
    Ok(wall)
}

/// Insert the wall row and its initial grid on one connection. Callers own
/// the transaction.
pub(crate) async fn insert_wall(
    conn: &mut PgConnection,
    owner_id: Uuid,
    new: &NewWall,
    photo_ids: &[PhotoId],
) -> Result<(Wall, u64), WallError> {
    let row = sqlx::query_as::<_, WallTuple>(&format!(
        "INSERT INTO walls (id, owner_id, name, width, height, background_color)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING {WALL_COLUMNS}"
    ))
    .bind(Uuid::new_v4())
    .bind(owner_id)
    .bind(&new.name)
    .bind(new.width)
    .bind(new.height)
    .bind(&new.background_color)
    .fetch_one(&mut *conn)
    .await?;
    let wall = wall_from_row(row);

    let items = initial_items(wall.id, photo_ids, wall.width, wall.height);
    let placed = item::insert_rows(conn, &items).await?;
    Ok((wall, placed))
}

/// List the owner's walls, most recently updated first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_walls(pool: &PgPool, owner_id: Uuid) -> Result<Vec<Wall>, WallError> {
    let rows = sqlx::query_as::<_, WallTuple>(&format!(
        "SELECT {WALL_COLUMNS} FROM walls WHERE owner_id = $1 ORDER BY updated_at DESC, id ASC"
    ))
    .bind(owner_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(wall_from_row).collect())
}

/// Fetch one of the owner's walls.
///
/// # Errors
///
/// Returns `NotFound` if the wall does not exist or belongs to someone else.
pub async fn get_wall(pool: &PgPool, wall_id: WallId, owner_id: Uuid) -> Result<Wall, WallError> {
    let row = sqlx::query_as::<_, WallTuple>(&format!("SELECT {WALL_COLUMNS} FROM walls WHERE id = $1 AND owner_id = $2"))
        .bind(wall_id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?
        .ok_or(WallError::NotFound(wall_id))?;
    Ok(wall_from_row(row))
}

/// Apply a validated patch and bump `updated_at`.
///
/// # Errors
///
/// Returns `NotFound` if the wall does not exist or belongs to someone else.
pub async fn update_wall(pool: &PgPool, wall_id: WallId, owner_id: Uuid, patch: &WallPatch) -> Result<Wall, WallError> {
    let row = sqlx::query_as::<_, WallTuple>(&format!(
        "UPDATE walls
         SET name = COALESCE($3, name),
             background_color = COALESCE($4, background_color),
             updated_at = now()
         WHERE id = $1 AND owner_id = $2
         RETURNING {WALL_COLUMNS}"
    ))
    .bind(wall_id)
    .bind(owner_id)
    .bind(patch.name.as_deref())
    .bind(patch.background_color.as_deref())
    .fetch_optional(pool)
    .await?
    .ok_or(WallError::NotFound(wall_id))?;
    Ok(wall_from_row(row))
}

/// Delete a wall. Its items go with it; the photos they reference do not.
///
/// # Errors
///
/// Returns `NotFound` if the wall does not exist or belongs to someone else.
pub async fn delete_wall(pool: &PgPool, wall_id: WallId, owner_id: Uuid) -> Result<(), WallError> {
    let result = sqlx::query("DELETE FROM walls WHERE id = $1 AND owner_id = $2")
        .bind(wall_id)
        .bind(owner_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(WallError::NotFound(wall_id));
    }
    info!(%wall_id, "deleted wall");
    Ok(())
}

/// Succeeds when `wall_id` exists and belongs to `owner_id`.
///
/// # Errors
///
/// Returns `NotFound` otherwise.
pub async fn ensure_owner(pool: &PgPool, wall_id: WallId, owner_id: Uuid) -> Result<(), WallError> {
    let found = sqlx::query_scalar::<_, i32>("SELECT 1 FROM walls WHERE id = $1 AND owner_id = $2")
        .bind(wall_id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;
    match found {
        Some(_) => Ok(()),
        None => Err(WallError::NotFound(wall_id)),
    }
}

/// Bump `updated_at` after an item mutation.
pub(crate) async fn touch_wall(pool: &PgPool, wall_id: WallId) -> Result<(), WallError> {
    sqlx::query("UPDATE walls SET updated_at = now() WHERE id = $1")
        .bind(wall_id)
        .execute(pool)
        .await?;
    Ok(())
}
