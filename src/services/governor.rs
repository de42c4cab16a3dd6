// src/services/governor.rs
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdmissionError {
    #[error("Message cannot be empty")]
    EmptyMessage,
    #[error("Message exceeds {limit} characters")]
    MessageTooLong { limit: usize },
    #[error("Too many requests")]
    RateLimited,
}

/// A message that passed admission: trimmed, non-empty, length-bounded.
/// Only [`AdmissionGovernor::admit`] constructs one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedMessage {
    text: String,
}

impl ValidatedMessage {
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Decides whether a request is admitted before any upstream cost is paid:
/// shape/length validation plus a per-identity minimum-interval throttle.
///
/// The throttle is a minimum interval between admitted requests, not a
/// windowed counter. The identity table is capacity-bounded: inserting into a
/// full table first sweeps entries old enough that they can no longer block
/// anyone, then evicts the oldest survivor.
pub struct AdmissionGovernor {
    max_message_len: usize,
    min_interval: Duration,
    capacity: usize,
    last_seen: Mutex<HashMap<String, Instant>>,
}

impl AdmissionGovernor {
    pub fn new(max_message_len: usize, min_interval: Duration, capacity: usize) -> Self {
        Self {
            max_message_len,
            min_interval,
            capacity,
            last_seen: Mutex::new(HashMap::new()),
        }
    }

    /// Validate `raw` and charge the rate limit for `identity`.
    ///
    /// On success the identity's timestamp is updated to `now` before
    /// returning, under the same lock as the check, so a same-identity burst
    /// admits exactly one request per interval even while an upstream call is
    /// still in flight. Exactly `min_interval` elapsed counts as admitted.
    pub fn admit(
        &self,
        identity: &str,
        raw: &str,
        now: Instant,
    ) -> Result<ValidatedMessage, AdmissionError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AdmissionError::EmptyMessage);
        }
        if trimmed.chars().count() > self.max_message_len {
            return Err(AdmissionError::MessageTooLong {
                limit: self.max_message_len,
            });
        }

        let mut table = self.last_seen.lock().expect("rate limit mutex poisoned");
        match table.get(identity).copied() {
            Some(last) if now.duration_since(last) < self.min_interval => {
                return Err(AdmissionError::RateLimited);
            }
            Some(_) => {
                table.insert(identity.to_string(), now);
            }
            None => {
                if table.len() >= self.capacity {
                    Self::evict(&mut table, now, self.min_interval, self.capacity);
                }
                table.insert(identity.to_string(), now);
            }
        }

        Ok(ValidatedMessage {
            text: trimmed.to_string(),
        })
    }

    /// Number of identities currently tracked.
    pub fn tracked(&self) -> usize {
        self.last_seen.lock().expect("rate limit mutex poisoned").len()
    }

    fn evict(
        table: &mut HashMap<String, Instant>,
        now: Instant,
        min_interval: Duration,
        capacity: usize,
    ) {
        // Entries past the interval no longer block their owner; dropping
        // them is invisible to callers.
        table.retain(|_, last| now.duration_since(*last) < min_interval);
        if table.len() >= capacity {
            let oldest = table
                .iter()
                .min_by_key(|&(_, last)| *last)
                .map(|(id, _)| id.clone());
            if let Some(id) = oldest {
                table.remove(&id);
            }
        }
    }
}
