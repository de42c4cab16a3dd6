use std::net::SocketAddr;
use std::time::Instant;

use axum::Json;
use axum::extract::{ConnectInfo, State};

use crate::error::AppError;
use crate::message::{ChatRequest, ChatResponse};
use crate::services::prompt::{self, SYSTEM_PROMPT};
use crate::state::SharedState;

/// The whole pipeline: admit, compose, call upstream, wrap the reply.
/// Rejected requests never reach the upstream.
pub async fn send_message_handler(
    State(state): State<SharedState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let identity = addr.ip().to_string();
    let raw = payload.message.as_deref().unwrap_or_default();

    let validated = state.governor.admit(&identity, raw, Instant::now())?;
    tracing::debug!(client = %identity, chars = validated.text().chars().count(), "message admitted");

    let messages = prompt::compose(SYSTEM_PROMPT, &validated);
    let reply = state.upstream.call(&messages).await?;
    tracing::info!(client = %identity, reply_chars = reply.chars().count(), "reply delivered");

    Ok(Json(ChatResponse::new(reply)))
}
