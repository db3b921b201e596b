//! Photo resolution route.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use canvas::doc::{PhotoId, PhotoRef};
use serde::Deserialize;

use crate::routes::auth::OwnerUser;
use crate::routes::walls::wall_error_to_status;
use crate::services::photo;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ResolvePhotosBody {
    pub photo_ids: Vec<PhotoId>,
}

/// `POST /api/photos/resolve`: ids the owner does not have are left out.
pub async fn resolve_photos(
    State(state): State<AppState>,
    owner: OwnerUser,
    Json(body): Json<ResolvePhotosBody>,
) -> Result<Json<Vec<PhotoRef>>, StatusCode> {
    let photos = photo::resolve_photos(&state.pool, owner.id, &body.photo_ids)
        .await
        .map_err(wall_error_to_status)?;
    Ok(Json(photos))
}
