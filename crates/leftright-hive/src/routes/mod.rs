pub mod ratio;
pub mod stars;
pub mod system;

use crate::state::AppState;
use axum::Router;
use std::sync::Arc;

pub fn system_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", axum::routing::get(system::health))
        .route("/stars", axum::routing::get(stars::get_stars))
}

pub fn ratio_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ratio", axum::routing::get(ratio::list_ratios))
        .route(
            "/ratio/{layout}",
            axum::routing::get(ratio::get_ratio).post(ratio::submit_ratio),
        )
}
