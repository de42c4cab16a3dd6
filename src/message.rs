// src/message.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: Option<String>,
}

/// Per-response metadata carried by every envelope, success or failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meta {
    pub timestamp: DateTime<Utc>,
    pub request_id: Uuid,
}

impl Meta {
    pub fn new() -> Self {
        Self {
            timestamp: Utc::now(),
            request_id: Uuid::new_v4(),
        }
    }
}

impl Default for Meta {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize, Deserialize)]
pub struct ChatResponse {
    pub meta: Meta,
    pub response: String,
}

impl ChatResponse {
    pub fn new(response: String) -> Self {
        Self {
            meta: Meta::new(),
            response,
        }
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub meta: Meta,
    pub error: ErrorBody,
}
