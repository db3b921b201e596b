//! Shared application state.
//!
//! `AppState` is injected into Axum handlers via the `State` extractor. The
//! wall service is stateless between requests, so the pool is all it holds.

use sqlx::PgPool;

/// Shared application state. Clone is required by Axum.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
}

impl AppState {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
