use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use crate::AppState;

#[derive(Deserialize)]
pub struct TopicRequest {
    pub topic: String,
}

pub async fn analyze(
    State(state): State<AppState>,
    Json(payload): Json<TopicRequest>,
) -> impl IntoResponse {
    match state.pipeline.analyze(&payload.topic).await {
        Ok(report) => Json(report).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}
