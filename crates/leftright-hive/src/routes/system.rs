use axum::{extract::State, http::StatusCode, Json};
use leftright_protocol::HealthResponse;
use std::sync::Arc;
use tracing::error;

use crate::state::AppState;

pub async fn root() -> &'static str {
    "LeftRight Hive API v0.1"
}

/// Round-trips the store so a broken database shows up here first.
pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    let version = env!("CARGO_PKG_VERSION").to_string();

    match state.aggregator.store().ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok".to_string(),
                version,
                message: "Ratio store reachable".to_string(),
            }),
        ),
        Err(e) => {
            error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "error".to_string(),
                    version,
                    message: e.to_string(),
                }),
            )
        }
    }
}
