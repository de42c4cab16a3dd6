// src/state.rs
use std::sync::Arc;

use crate::config::Config;
use crate::services::governor::AdmissionGovernor;
use crate::services::upstream::UpstreamClient;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub governor: AdmissionGovernor,
    pub upstream: UpstreamClient,
}

impl AppState {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            governor: AdmissionGovernor::new(
                config.max_message_len,
                config.rate_limit_interval,
                config.rate_limit_capacity,
            ),
            upstream: UpstreamClient::new(config)?,
        })
    }
}
