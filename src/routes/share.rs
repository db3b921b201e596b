//! Public share route. No owner header: the token is the credential.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use canvas::doc::SharedWall;

use crate::routes::walls::wall_error_to_status;
use crate::services::share;
use crate::state::AppState;

/// `GET /api/share/:token`: wall, items and resolved photos for the viewer.
pub async fn get_shared(State(state): State<AppState>, Path(token): Path<String>) -> Result<Json<SharedWall>, StatusCode> {
    let shared = share::load_shared(&state.pool, &token)
        .await
        .map_err(wall_error_to_status)?;
    Ok(Json(shared))
}
