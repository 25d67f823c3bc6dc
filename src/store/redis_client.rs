//! Redis Store Module
//!
//! `StoreClient` backed by a shared `redis::aio::ConnectionManager`.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, RedisResult};
use tracing::{info, warn};

use crate::error::{Result, StoreError};
use crate::store::StoreClient;

// == Redis Store Client ==
/// Redis-backed store.
///
/// The connection manager multiplexes commands over one connection and
/// reconnects on failure; clones share that connection.
#[derive(Clone)]
pub struct RedisStoreClient {
    conn: ConnectionManager,
    command_timeout: Duration,
}

impl RedisStoreClient {
    /// Opens the connection described by `url` (e.g. `redis://127.0.0.1:6379`).
    pub async fn connect(url: &str, command_timeout: Duration) -> Result<Self> {
        let client = redis::Client::open(url)
            .map_err(|e| StoreError::InvalidArgument(format!("invalid Redis URL: {}", e)))?;

        let conn = match tokio::time::timeout(command_timeout, ConnectionManager::new(client)).await
        {
            Ok(conn) => conn?,
            Err(_) => {
                return Err(StoreError::Unavailable(format!(
                    "connecting to {} timed out after {:?}",
                    url, command_timeout
                )))
            }
        };

        info!("Connected to Redis at {}", url);
        Ok(Self {
            conn,
            command_timeout,
        })
    }

    /// Runs one command future under the configured timeout.
    async fn run<T, F>(&self, command: &'static str, fut: F) -> Result<T>
    where
        F: Future<Output = RedisResult<T>> + Send,
    {
        match tokio::time::timeout(self.command_timeout, fut).await {
            Ok(result) => result.map_err(|e| {
                warn!("Redis {} failed: {}", command, e);
                StoreError::from(e)
            }),
            Err(_) => {
                warn!("Redis {} timed out after {:?}", command, self.command_timeout);
                Err(StoreError::Unavailable(format!(
                    "{} timed out after {:?}",
                    command, self.command_timeout
                )))
            }
        }
    }
}

/// Whole milliseconds for PX / PEXPIRE arguments.
fn ttl_millis(ttl: Duration) -> u64 {
    u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX)
}

#[async_trait]
impl StoreClient for RedisStoreClient {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.conn.clone();
        self.run("GET", async move { conn.get::<_, Option<Vec<u8>>>(key).await })
            .await
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>) -> Result<()> {
        let mut conn = self.conn.clone();
        match ttl {
            Some(ttl) => {
                let millis = ttl_millis(ttl);
                self.run("SET PX", async move {
                    conn.pset_ex::<_, _, ()>(key, value, millis).await
                })
                .await
            }
            None => {
                self.run("SET", async move { conn.set::<_, _, ()>(key, value).await })
                    .await
            }
        }
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let mut conn = self.conn.clone();
        let removed = self
            .run("DEL", async move { conn.del::<_, i64>(key).await })
            .await?;
        Ok(removed > 0)
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let mut conn = self.conn.clone();
        self.run("EXISTS", async move { conn.exists::<_, bool>(key).await })
            .await
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool> {
        let millis = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        let mut conn = self.conn.clone();
        self.run("PEXPIRE", async move { conn.pexpire::<_, bool>(key, millis).await })
            .await
    }

    async fn ttl(&self, key: &str) -> Result<i64> {
        let mut conn = self.conn.clone();
        self.run("TTL", async move { conn.ttl::<_, i64>(key).await })
            .await
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.conn.clone();
        let reply: String = self
            .run("PING", async move { redis::cmd("PING").query_async(&mut conn).await })
            .await?;
        if reply == "PONG" {
            Ok(())
        } else {
            Err(StoreError::Internal(format!(
                "unexpected PING reply: {}",
                reply
            )))
        }
    }
}
