// src/config.rs
use std::env::{self, VarError};
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;

pub const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "llama3-70b-8192";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
    pub port: u16,
    pub upstream_timeout: Duration,
    pub rate_limit_interval: Duration,
    pub rate_limit_capacity: usize,
    pub max_message_len: usize,
}

impl Config {
    /// Read configuration from the environment. The API key is the only
    /// required variable; everything else falls back to a default.
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = env::var("GROQ_API_KEY")
            .context("GROQ_API_KEY environment variable is not set")?;

        Ok(Self {
            api_key,
            api_url: env::var("GROQ_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            model: env::var("GROQ_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            port: env_or("PORT", 10_000)?,
            upstream_timeout: Duration::from_secs(env_or("UPSTREAM_TIMEOUT_SECS", 10)?),
            rate_limit_interval: Duration::from_secs(env_or("RATE_LIMIT_INTERVAL_SECS", 12)?),
            rate_limit_capacity: env_or("RATE_LIMIT_CAPACITY", 10_000)?,
            max_message_len: env_or("MAX_MESSAGE_LEN", 500)?,
        })
    }
}

// Missing variables fall back; present-but-invalid values are startup errors.
fn env_or<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("invalid value for {name}: {raw:?}")),
        Err(VarError::NotPresent) => Ok(default),
        Err(e) => Err(e).with_context(|| format!("could not read {name}")),
    }
}
