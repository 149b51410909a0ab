use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

pub mod aggregator;
pub mod config;
pub mod db;
pub mod error;
pub mod routes;
pub mod stars;
pub mod state;
pub mod store;

use crate::state::AppState;

/// Builds the full HTTP surface of the hive.
pub fn app(state: Arc<AppState>, body_limit: usize) -> Router {
    let api = routes::system_routes().merge(routes::ratio_routes());

    Router::new()
        .route("/", axum::routing::get(routes::system::root))
        .nest("/api", api)
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
