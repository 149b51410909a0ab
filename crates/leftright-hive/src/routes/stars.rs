use axum::{
    extract::State,
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use leftright_protocol::StarsResponse;
use std::sync::Arc;

use crate::stars::StarCount;
use crate::state::AppState;

pub async fn get_stars(State(state): State<Arc<AppState>>) -> Response {
    let count = state.stars.stars().await;
    let body = Json(StarsResponse {
        stars: count.value(),
    });

    match count {
        StarCount::Live(_) => (
            [(
                header::CACHE_CONTROL,
                HeaderValue::from_static("public, s-maxage=300"),
            )],
            body,
        )
            .into_response(),
        StarCount::Unavailable => (
            [(
                header::CACHE_CONTROL,
                HeaderValue::from_static("public, s-maxage=60, stale-while-revalidate"),
            )],
            body,
        )
            .into_response(),
    }
}
