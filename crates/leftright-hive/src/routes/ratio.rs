use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use leftright_protocol::RatioResponse;
use serde_json::Value;
use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

pub async fn get_ratio(
    State(state): State<Arc<AppState>>,
    Path(layout): Path<String>,
) -> AppResult<Json<RatioResponse>> {
    Ok(Json(state.aggregator.get(&layout).await?))
}

pub async fn submit_ratio(
    State(state): State<Arc<AppState>>,
    Path(layout): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<RatioResponse>> {
    let Json(body) = body.map_err(|e| AppError::Validation(e.body_text()))?;
    Ok(Json(state.aggregator.submit_json(&layout, &body).await?))
}

pub async fn list_ratios(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<RatioResponse>>> {
    let rows = state.aggregator.store().list().await?;

    Ok(Json(
        rows.into_iter()
            .map(|(layout, stat)| RatioResponse {
                count: stat.count,
                average: stat.average,
                layout,
            })
            .collect(),
    ))
}
