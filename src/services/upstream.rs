// src/services/upstream.rs
use anyhow::Context;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;
use super::prompt::ChatMessage;

const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 1024;

// How much of an upstream error body is kept for the logs.
const DETAIL_LIMIT: usize = 200;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("upstream returned no completion")]
    EmptyResponse,
    #[error("upstream unavailable: {detail}")]
    Unavailable { detail: String },
}

#[derive(Serialize)]
struct UpstreamPayload<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
pub struct UpstreamReply {
    #[serde(default)]
    choices: Vec<UpstreamChoice>,
}

#[derive(Deserialize)]
struct UpstreamChoice {
    message: UpstreamMessage,
}

#[derive(Deserialize)]
struct UpstreamMessage {
    #[serde(default)]
    content: String,
}

/// One bounded call per inbound request to the chat-completions endpoint.
/// Never retries; every failure mode collapses into [`UpstreamError`].
pub struct UpstreamClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl UpstreamClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.upstream_timeout)
            .build()
            .context("failed to build upstream HTTP client")?;
        Ok(Self {
            http,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    pub async fn call(&self, messages: &[ChatMessage]) -> Result<String, UpstreamError> {
        let payload = UpstreamPayload {
            model: &self.model,
            messages,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| UpstreamError::Unavailable {
                detail: if e.is_timeout() {
                    "request timed out".to_string()
                } else {
                    format!("transport error: {e}")
                },
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Unavailable {
                detail: format!("status {status}: {}", truncate(&body, DETAIL_LIMIT)),
            });
        }

        // A 2xx with a body we cannot make sense of is the provider's
        // fault, not the client's.
        let reply: UpstreamReply = response
            .json()
            .await
            .map_err(|_| UpstreamError::EmptyResponse)?;
        extract_reply(reply)
    }
}

/// Pull the first completion out of a decoded reply.
pub fn extract_reply(reply: UpstreamReply) -> Result<String, UpstreamError> {
    match reply.choices.into_iter().next() {
        Some(choice) if !choice.message.content.is_empty() => Ok(choice.message.content),
        _ => Err(UpstreamError::EmptyResponse),
    }
}

fn truncate(s: &str, limit: usize) -> &str {
    match s.char_indices().nth(limit) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
