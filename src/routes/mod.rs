// src/routes/mod.rs
pub mod chat;

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chat::send_message_handler;
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

use crate::state::SharedState;

pub fn create_router() -> Router<SharedState> {
    Router::new()
        .route("/send-message", post(send_message_handler))
        .route("/health", get(health_handler))
        .fallback(not_found_handler)
        .layer(TraceLayer::new_for_http())
}

// Liveness probe; must stay independent of the governor and the upstream.
async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

async fn not_found_handler() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Resource not found" })),
    )
}
