//! Health check endpoint

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: String,
    version: String,
    tasks_file: String,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let tasks_file = state.task_store().path().to_string_lossy().to_string();

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        tasks_file,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
