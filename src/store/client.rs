//! Store Client Contract
//!
//! The minimal command set the facade needs from a key-value store.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

/// A remote (or in-process) key-value store.
///
/// Implementations must be safe to share across concurrent requests; the
/// facade holds one instance behind an `Arc` for the lifetime of the process.
#[async_trait]
pub trait StoreClient: Send + Sync + 'static {
    /// Returns the raw bytes stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Stores `value` under `key`. `None` clears any previous expiration.
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>) -> Result<()>;

    /// Removes `key`, returning whether it existed.
    async fn delete(&self, key: &str) -> Result<bool>;

    /// Returns whether `key` exists. Does not touch its TTL.
    async fn exists(&self, key: &str) -> Result<bool>;

    /// Sets or replaces the TTL of an existing key. Returns false if absent.
    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool>;

    /// Remaining TTL in whole seconds.
    ///
    /// Follows Redis `TTL` replies: `-1` when the key has no expiration,
    /// `-2` when the key does not exist.
    async fn ttl(&self, key: &str) -> Result<i64>;

    /// Round-trips a no-op command to verify connectivity.
    async fn ping(&self) -> Result<()>;
}
