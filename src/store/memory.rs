//! In-Memory Store Module
//!
//! A process-local `StoreClient` with the same observable semantics as Redis.
//! Expired entries are dropped when touched, and swept from the whole map
//! every `SWEEP_EVERY_WRITES` writes so untouched keys cannot pile up.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::Result;
use crate::store::{StoreClient, StoredEntry, TTL_MISSING, TTL_NO_EXPIRY};

/// Number of `set` calls between full sweeps of expired entries.
pub const SWEEP_EVERY_WRITES: u64 = 64;

// == Memory Store Client ==
/// HashMap-backed store guarded by an async RwLock.
#[derive(Debug, Default)]
pub struct MemoryStoreClient {
    entries: RwLock<HashMap<String, StoredEntry>>,
    writes: AtomicU64,
}

impl MemoryStoreClient {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (unexpired) entries.
    pub async fn len(&self) -> usize {
        let entries = self.entries.read().await;
        entries.values().filter(|entry| !entry.is_expired()).count()
    }

    /// Returns true if no live entries remain.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Removes `key` if its entry has expired. Returns the live entry state.
    async fn purge_if_expired(&self, key: &str) -> bool {
        let mut entries = self.entries.write().await;
        match entries.get(key) {
            Some(entry) if entry.is_expired() => {
                entries.remove(key);
                false
            }
            Some(_) => true,
            None => false,
        }
    }
}

#[async_trait]
impl StoreClient for MemoryStoreClient {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        if !self.purge_if_expired(key).await {
            return Ok(None);
        }
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.value.clone()))
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), StoredEntry::new(value, ttl));

        let write_count = self.writes.fetch_add(1, Ordering::Relaxed) + 1;
        if write_count % SWEEP_EVERY_WRITES == 0 {
            let before = entries.len();
            entries.retain(|_, entry| !entry.is_expired());
            debug!("Memory store sweep removed {} expired entries", before - entries.len());
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let mut entries = self.entries.write().await;
        Ok(entries
            .remove(key)
            .is_some_and(|entry| !entry.is_expired()))
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.purge_if_expired(key).await)
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool> {
        let mut entries = self.entries.write().await;
        match entries.get_mut(key) {
            Some(entry) if entry.is_expired() => {
                entries.remove(key);
                Ok(false)
            }
            Some(entry) => {
                entry.expire_in(ttl);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ttl(&self, key: &str) -> Result<i64> {
        if !self.purge_if_expired(key).await {
            return Ok(TTL_MISSING);
        }
        let entries = self.entries.read().await;
        Ok(match entries.get(key) {
            Some(entry) => entry.ttl_remaining_secs().unwrap_or(TTL_NO_EXPIRY),
            None => TTL_MISSING,
        })
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
