//! Stored Entry Module
//!
//! A single value held by the in-memory backend, with optional expiration.

use std::time::Duration;

use chrono::Utc;

// == Stored Entry ==
/// Represents one stored value and its expiration deadline.
#[derive(Debug, Clone)]
pub struct StoredEntry {
    /// The encoded value
    pub value: Vec<u8>,
    /// Expiration timestamp (Unix milliseconds), None = no expiration
    pub expires_at: Option<i64>,
}

impl StoredEntry {
    // == Constructor ==
    /// Creates a new entry that expires after `ttl`, or never when `None`.
    pub fn new(value: Vec<u8>, ttl: Option<Duration>) -> Self {
        Self {
            value,
            expires_at: ttl.map(deadline_from_now),
        }
    }

    // == Expire ==
    /// Replaces the expiration deadline with `now + ttl`.
    pub fn expire_in(&mut self, ttl: Duration) {
        self.expires_at = Some(deadline_from_now(ttl));
    }

    // == Is Expired ==
    /// An entry is expired once the current time reaches its deadline.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires) => current_timestamp_ms() >= expires,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds, or None if no expiration is set.
    pub fn ttl_remaining_ms(&self) -> Option<i64> {
        self.expires_at
            .map(|expires| (expires - current_timestamp_ms()).max(0))
    }

    /// Returns remaining TTL rounded to whole seconds, the way Redis `TTL` does.
    pub fn ttl_remaining_secs(&self) -> Option<i64> {
        self.ttl_remaining_ms().map(|ms| (ms + 500) / 1000)
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> i64 {
    Utc::now().timestamp_millis()
}

fn deadline_from_now(ttl: Duration) -> i64 {
    let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
    current_timestamp_ms().saturating_add(ttl_ms)
}
