//! ucd-query library - read-only HTTP access to an imported UCD store
//!
//! Serves lookups by code point and by block plus the aggregate statistics
//! the importer computes. The store is opened read-only; an import running in
//! parallel may be observed mid-replacement.

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use ucd_common::Store;

pub mod api;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Read-only store handle
    pub store: Store,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    let api = Router::new()
        .route("/api/code-points/:cp", get(api::get_code_point))
        .route("/api/blocks", get(api::list_blocks))
        .route("/api/blocks/:name/code-points", get(api::get_block_code_points))
        .route("/api/stats", get(api::get_stats))
        .route("/api/stats/breakdown", get(api::get_breakdown))
        .route("/api/metadata", get(api::get_metadata))
        .route("/api/buildinfo", get(api::get_build_info));

    Router::new()
        .merge(api)
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
