//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the owner-scoped wall API, photo resolution, the public share read
//! path and a health probe under one Axum router. Every request is traced;
//! CORS allows either any origin or the single configured one.

pub mod auth;
pub mod photos;
pub mod share;
pub mod walls;


use axum::Router;
use axum::http::{HeaderValue, StatusCode};
use axum::routing::{get, patch, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub(crate) fn cors_layer(allow_origin: Option<HeaderValue>) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    match allow_origin {
        Some(origin) => cors.allow_origin(origin),
        None => cors.allow_origin(Any),
    }
}

/// Full application router.
pub fn app(state: AppState, allow_origin: Option<HeaderValue>) -> Router {
    Router::new()
        .route("/api/walls", get(walls::list_walls).post(walls::create_wall))
        .route(
            "/api/walls/{id}",
            get(walls::get_wall)
                .patch(walls::update_wall)
                .delete(walls::delete_wall),
        )
        .route(
            "/api/walls/{id}/share",
            post(walls::enable_share).delete(walls::disable_share),
        )
        .route(
            "/api/walls/{id}/items",
            get(walls::list_items).post(walls::insert_items),
        )
        .route(
            "/api/walls/{id}/items/{item_id}",
            patch(walls::update_item).delete(walls::delete_item),
        )
        .route("/api/photos/resolve", post(photos::resolve_photos))
        .route("/api/share/{token}", get(share::get_shared))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allow_origin))
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
