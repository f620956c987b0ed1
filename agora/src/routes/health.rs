use axum::response::Json;
use serde_json::{json, Value};

// Liveness only; deliberately independent of both collaborators.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
