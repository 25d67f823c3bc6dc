//! Key-Value Facade
//!
//! Translates facade operations into store commands and normalizes replies.
//! Holds no state of its own: every call is a round trip to the store.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::models::TimeUnit;
use crate::store::{
    JsonCodec, StoreClient, ValueCodec, MAX_KEY_LENGTH, MAX_TTL, TTL_NO_EXPIRY,
};

/// TTL given to the disposable key written by `health_probe`.
pub const HEALTH_PROBE_TTL_SECS: i64 = 5;

const HEALTH_PROBE_VALUE: &str = "ok";

// == Facade ==
/// Facade over an injected store client and value codec.
///
/// Cloning is cheap; clones share the same client and codec.
#[derive(Clone)]
pub struct KvFacade {
    client: Arc<dyn StoreClient>,
    codec: Arc<dyn ValueCodec>,
}

impl KvFacade {
    // == Constructors ==
    /// Creates a facade over `client` using `codec` for value serialization.
    pub fn new(client: Arc<dyn StoreClient>, codec: Arc<dyn ValueCodec>) -> Self {
        Self { client, codec }
    }

    /// Creates a facade over `client` with the default JSON codec.
    pub fn with_json_codec(client: Arc<dyn StoreClient>) -> Self {
        Self::new(client, Arc::new(JsonCodec))
    }

    // == Get ==
    /// Returns the stored value, or `None` when the key does not exist.
    pub async fn get(&self, key: &str) -> Result<Option<Value>> {
        validate_key(key)?;
        let value = match self.client.get(key).await? {
            Some(bytes) => Some(self.codec.decode(&bytes)?),
            None => None,
        };
        debug!(key, found = value.is_some(), "get");
        Ok(value)
    }

    /// Reads the value and deserializes it into `T`.
    pub async fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    // == Set ==
    /// Stores `value` without expiration, replacing any prior value and TTL.
    pub async fn set(&self, key: &str, value: &Value) -> Result<()> {
        validate_key(key)?;
        let bytes = self.codec.encode(value)?;
        self.client.set(key, bytes, None).await?;
        debug!(key, "set");
        Ok(())
    }

    /// Stores `value` expiring after `timeout` of `unit`.
    ///
    /// `timeout` must be positive and convert to at least one millisecond.
    pub async fn set_with_ttl(
        &self,
        key: &str,
        value: &Value,
        timeout: i64,
        unit: TimeUnit,
    ) -> Result<()> {
        validate_key(key)?;
        let ttl = ttl_duration(timeout, unit)?;
        let bytes = self.codec.encode(value)?;
        self.client.set(key, bytes, Some(ttl)).await?;
        debug!(key, timeout, %unit, "set with ttl");
        Ok(())
    }

    /// Serializes `value` and stores it without expiration.
    pub async fn set_typed<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)?;
        self.set(key, &value).await
    }

    // == Delete ==
    /// Removes `key`. Returns true iff it existed.
    pub async fn delete(&self, key: &str) -> Result<bool> {
        validate_key(key)?;
        let deleted = self.client.delete(key).await?;
        debug!(key, deleted, "delete");
        Ok(deleted)
    }

    // == Exists ==
    /// Checks whether `key` exists without touching its TTL.
    pub async fn has_key(&self, key: &str) -> Result<bool> {
        validate_key(key)?;
        self.client.exists(key).await
    }

    // == Expire ==
    /// Sets or replaces the TTL on an existing key.
    ///
    /// Returns false, without creating anything, when the key is absent.
    pub async fn expire(&self, key: &str, timeout: i64, unit: TimeUnit) -> Result<bool> {
        validate_key(key)?;
        let ttl = ttl_duration(timeout, unit)?;
        let applied = self.client.expire(key, ttl).await?;
        debug!(key, timeout, %unit, applied, "expire");
        Ok(applied)
    }

    // == Get Expire ==
    /// Remaining seconds until `key` expires.
    ///
    /// Returns `-1` both when the key has no expiration and when it does not
    /// exist; the two cases are indistinguishable here.
    pub async fn get_expire(&self, key: &str) -> Result<i64> {
        validate_key(key)?;
        let ttl = self.client.ttl(key).await?;
        Ok(if ttl < 0 { TTL_NO_EXPIRY } else { ttl })
    }

    // == Health Probe ==
    /// Writes, reads back and deletes a disposable key.
    ///
    /// Returns whether the value read back matched. Any store failure along
    /// the way is returned as an error.
    pub async fn health_probe(&self) -> Result<bool> {
        let probe_key = format!("health:check:{}", chrono::Utc::now().timestamp_millis());
        let expected = Value::String(HEALTH_PROBE_VALUE.to_string());

        self.set_with_ttl(&probe_key, &expected, HEALTH_PROBE_TTL_SECS, TimeUnit::Seconds)
            .await?;
        let read_back = self.get(&probe_key).await?;
        self.delete(&probe_key).await?;

        Ok(read_back.as_ref() == Some(&expected))
    }
}

// == Validation ==
fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(StoreError::InvalidArgument(
            "Key cannot be empty".to_string(),
        ));
    }
    if key.len() > MAX_KEY_LENGTH {
        return Err(StoreError::InvalidArgument(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        )));
    }
    Ok(())
}

fn ttl_duration(timeout: i64, unit: TimeUnit) -> Result<Duration> {
    if timeout <= 0 {
        return Err(StoreError::InvalidArgument(format!(
            "timeout must be positive, got {}",
            timeout
        )));
    }
    let ttl = unit.to_duration(timeout as u64);
    if ttl.as_millis() == 0 {
        return Err(StoreError::InvalidArgument(format!(
            "timeout of {} {} is below the store's millisecond granularity",
            timeout, unit
        )));
    }
    if ttl > MAX_TTL {
        return Err(StoreError::InvalidArgument(format!(
            "timeout of {} {} exceeds the maximum of {} seconds",
            timeout,
            unit,
            MAX_TTL.as_secs()
        )));
    }
    Ok(ttl)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStoreClient;
    use async_trait::async_trait;
    use serde::Deserialize;
    use serde_json::json;

    fn facade() -> KvFacade {
        KvFacade::with_json_codec(Arc::new(MemoryStoreClient::new()))
    }

    struct DownStore;

    #[async_trait]
    impl StoreClient for DownStore {
        async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
        async fn set(&self, _key: &str, _value: Vec<u8>, _ttl: Option<Duration>) -> Result<()> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
        async fn delete(&self, _key: &str) -> Result<bool> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
        async fn exists(&self, _key: &str) -> Result<bool> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
        async fn expire(&self, _key: &str, _ttl: Duration) -> Result<bool> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
        async fn ttl(&self, _key: &str) -> Result<i64> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
        async fn ping(&self) -> Result<()> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct TestObject {
        name: String,
        age: u32,
    }

    #[tokio::test]
    async fn test_set_without_ttl() {
        let facade = facade();

        facade.set("foo", &json!("bar")).await.unwrap();

        assert_eq!(facade.get("foo").await.unwrap(), Some(json!("bar")));
        assert!(facade.has_key("foo").await.unwrap());
        assert_eq!(facade.get_expire("foo").await.unwrap(), -1);
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        assert_eq!(facade().get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_with_ttl_expires() {
        let facade = facade();

        facade
            .set_with_ttl("short", &json!(1), 1, TimeUnit::Seconds)
            .await
            .unwrap();
        assert!(facade.has_key("short").await.unwrap());

        tokio::time::sleep(Duration::from_millis(1100)).await;

        assert!(!facade.has_key("short").await.unwrap());
    }

    #[tokio::test]
    async fn test_set_clears_previous_ttl() {
        let facade = facade();

        facade
            .set_with_ttl("k", &json!("a"), 60, TimeUnit::Seconds)
            .await
            .unwrap();
        facade.set("k", &json!("b")).await.unwrap();

        assert_eq!(facade.get_expire("k").await.unwrap(), -1);
    }

    #[tokio::test]
    async fn test_non_positive_timeout_rejected() {
        let facade = facade();

        let err = facade
            .set_with_ttl("k", &json!("v"), 0, TimeUnit::Seconds)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidArgument(_)));
        assert!(!facade.has_key("k").await.unwrap());

        let err = facade.expire("k", -5, TimeUnit::Seconds).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_sub_millisecond_timeout_rejected() {
        let err = facade()
            .set_with_ttl("k", &json!("v"), 10, TimeUnit::Nanoseconds)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_oversized_timeout_rejected() {
        let facade = facade();

        let err = facade
            .set_with_ttl("k", &json!("v"), i64::MAX, TimeUnit::Days)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidArgument(_)));
        assert!(!facade.has_key("k").await.unwrap());

        facade.set("k", &json!("v")).await.unwrap();
        let err = facade
            .expire("k", 200 * 365, TimeUnit::Days)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidArgument(_)));
        assert_eq!(facade.get_expire("k").await.unwrap(), -1);

        assert!(facade.expire("k", 365, TimeUnit::Days).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let facade = facade();

        facade.set("k", &json!("v")).await.unwrap();
        assert!(facade.delete("k").await.unwrap());
        assert!(!facade.delete("k").await.unwrap());
    }

    #[tokio::test]
    async fn test_expire_missing_key() {
        let facade = facade();

        assert!(!facade.expire("ghost", 5, TimeUnit::Seconds).await.unwrap());
        assert!(!facade.has_key("ghost").await.unwrap());
    }

    #[tokio::test]
    async fn test_expire_existing_key() {
        let facade = facade();

        facade.set("k", &json!("v")).await.unwrap();
        assert!(facade.expire("k", 2, TimeUnit::Seconds).await.unwrap());

        let ttl = facade.get_expire("k").await.unwrap();
        assert!(ttl > 0 && ttl <= 2);
    }

    #[tokio::test]
    async fn test_get_expire_conflates_missing_and_persistent() {
        let facade = facade();

        facade.set("persistent", &json!("v")).await.unwrap();

        assert_eq!(facade.get_expire("persistent").await.unwrap(), -1);
        assert_eq!(facade.get_expire("missing").await.unwrap(), -1);
    }

    #[tokio::test]
    async fn test_typed_round_trip() {
        let facade = facade();
        let obj = TestObject {
            name: "embedded-name".to_string(),
            age: 35,
        };

        facade.set_typed("object", &obj).await.unwrap();

        let back: TestObject = facade.get_as("object").await.unwrap().unwrap();
        assert_eq!(back, obj);
    }

    #[tokio::test]
    async fn test_empty_key_rejected() {
        let err = facade().get("").await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_health_probe_cleans_up() {
        let store = Arc::new(MemoryStoreClient::new());
        let facade = KvFacade::with_json_codec(store.clone());

        assert!(facade.health_probe().await.unwrap());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let facade = KvFacade::with_json_codec(Arc::new(DownStore));

        assert!(matches!(
            facade.get("k").await,
            Err(StoreError::Unavailable(_))
        ));
        assert!(matches!(
            facade.health_probe().await,
            Err(StoreError::Unavailable(_))
        ));
    }
}
