//! Wall, item and share-toggle routes for the owner's editor.

#[cfg(test)]
#[path = "walls_test.rs"]
mod walls_test;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use canvas::doc::{PartialWallItem, PhotoId, Wall, WallItem};
use serde::Deserialize;
use uuid::Uuid;

use crate::routes::auth::OwnerUser;
use crate::services::wall::{self, NewWall, WallError, WallPatch};
use crate::services::{item, share};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CreateWallBody {
    pub name: Option<String>,
    #[serde(default)]
    pub photo_ids: Vec<PhotoId>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub background_color: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateWallBody {
    pub name: Option<String>,
    pub background_color: Option<String>,
}

pub(crate) fn wall_error_to_status(err: WallError) -> StatusCode {
    match err {
        WallError::NotFound(_) | WallError::ItemNotFound(_) | WallError::ShareNotFound => StatusCode::NOT_FOUND,
        WallError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        WallError::Database(e) => {
            tracing::error!(error = %e, "wall query failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

// =============================================================================
// WALLS
// =============================================================================

/// `POST /api/walls`: create a wall, optionally laid out with photos.
pub async fn create_wall(
    State(state): State<AppState>,
    owner: OwnerUser,
    Json(body): Json<CreateWallBody>,
) -> Result<(StatusCode, Json<Wall>), StatusCode> {
    let new = NewWall::from_parts(
        body.name.as_deref(),
        body.width,
        body.height,
        body.background_color.as_deref(),
    )
    .map_err(wall_error_to_status)?;
    let wall = wall::create_wall(&state.pool, owner.id, &new, &body.photo_ids)
        .await
        .map_err(wall_error_to_status)?;
    Ok((StatusCode::CREATED, Json(wall)))
}

/// `GET /api/walls`: the owner's walls, most recently updated first.
pub async fn list_walls(State(state): State<AppState>, owner: OwnerUser) -> Result<Json<Vec<Wall>>, StatusCode> {
    let walls = wall::list_walls(&state.pool, owner.id)
        .await
        .map_err(wall_error_to_status)?;
    Ok(Json(walls))
}

/// `GET /api/walls/:id`
pub async fn get_wall(
    State(state): State<AppState>,
    owner: OwnerUser,
    Path(wall_id): Path<Uuid>,
) -> Result<Json<Wall>, StatusCode> {
    let wall = wall::get_wall(&state.pool, wall_id, owner.id)
        .await
        .map_err(wall_error_to_status)?;
    Ok(Json(wall))
}

/// `PATCH /api/walls/:id`: rename or recolor.
pub async fn update_wall(
    State(state): State<AppState>,
    owner: OwnerUser,
    Path(wall_id): Path<Uuid>,
    Json(body): Json<UpdateWallBody>,
) -> Result<Json<Wall>, StatusCode> {
    let patch = WallPatch { name: body.name, background_color: body.background_color }
        .validated()
        .map_err(wall_error_to_status)?;
    let wall = wall::update_wall(&state.pool, wall_id, owner.id, &patch)
        .await
        .map_err(wall_error_to_status)?;
    Ok(Json(wall))
}

/// `DELETE /api/walls/:id`: delete a wall and its items.
pub async fn delete_wall(
    State(state): State<AppState>,
    owner: OwnerUser,
    Path(wall_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    wall::delete_wall(&state.pool, wall_id, owner.id)
        .await
        .map_err(wall_error_to_status)?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

/// `POST /api/walls/:id/share`: make the wall public, returning it with its token.
pub async fn enable_share(
    State(state): State<AppState>,
    owner: OwnerUser,
    Path(wall_id): Path<Uuid>,
) -> Result<Json<Wall>, StatusCode> {
    let wall = share::enable_sharing(&state.pool, wall_id, owner.id)
        .await
        .map_err(wall_error_to_status)?;
    Ok(Json(wall))
}

/// `DELETE /api/walls/:id/share`: revoke the public link.
pub async fn disable_share(
    State(state): State<AppState>,
    owner: OwnerUser,
    Path(wall_id): Path<Uuid>,
) -> Result<Json<Wall>, StatusCode> {
    let wall = share::disable_sharing(&state.pool, wall_id, owner.id)
        .await
        .map_err(wall_error_to_status)?;
    Ok(Json(wall))
}

// =============================================================================
// ITEMS
// =============================================================================

/// `GET /api/walls/:id/items`: ascending z.
pub async fn list_items(
    State(state): State<AppState>,
    owner: OwnerUser,
    Path(wall_id): Path<Uuid>,
) -> Result<Json<Vec<WallItem>>, StatusCode> {
    let items = item::list_items(&state.pool, wall_id, owner.id)
        .await
        .map_err(wall_error_to_status)?;
    Ok(Json(items))
}

/// `POST /api/walls/:id/items`: bulk insert of client-created items.
pub async fn insert_items(
    State(state): State<AppState>,
    owner: OwnerUser,
    Path(wall_id): Path<Uuid>,
    Json(items): Json<Vec<WallItem>>,
) -> Result<(StatusCode, Json<serde_json::Value>), StatusCode> {
    let inserted = item::insert_items(&state.pool, wall_id, owner.id, items)
        .await
        .map_err(wall_error_to_status)?;
    Ok((StatusCode::CREATED, Json(serde_json::json!({ "inserted": inserted }))))
}

/// `PATCH /api/walls/:id/items/:item_id`: partial geometry/z update.
pub async fn update_item(
    State(state): State<AppState>,
    owner: OwnerUser,
    Path((wall_id, item_id)): Path<(Uuid, Uuid)>,
    Json(fields): Json<PartialWallItem>,
) -> Result<Json<WallItem>, StatusCode> {
    let item = item::update_item(&state.pool, wall_id, item_id, owner.id, &fields)
        .await
        .map_err(wall_error_to_status)?;
    Ok(Json(item))
}

/// `DELETE /api/walls/:id/items/:item_id`
pub async fn delete_item(
    State(state): State<AppState>,
    owner: OwnerUser,
    Path((wall_id, item_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    item::delete_item(&state.pool, wall_id, item_id, owner.id)
        .await
        .map_err(wall_error_to_status)?;
    Ok(Json(serde_json::json!({ "ok": true })))
}
