//! Request DTOs for the facade API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{Result, StoreError};
use crate::models::TimeUnit;

/// Request body for storing a value (POST /api/redis/{key})
///
/// # Fields
/// - `value`: Any JSON value to store
/// - `timeout`: Optional expiration amount, only applied when positive
/// - `timeUnit`: Unit of `timeout`, case-insensitive
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetValueRequest {
    /// The value to store
    #[serde(default)]
    pub value: Option<Value>,
    /// Expiration amount
    #[serde(default, deserialize_with = "lenient_timeout")]
    pub timeout: i64,
    /// Expiration unit name
    #[serde(default)]
    pub time_unit: Option<String>,
}

impl SetValueRequest {
    /// Returns the requested expiration, if both a positive timeout and a
    /// unit were supplied.
    pub fn expiration(&self) -> Result<Option<(i64, TimeUnit)>> {
        match &self.time_unit {
            Some(unit) if self.timeout > 0 => {
                let unit: TimeUnit = unit.parse()?;
                Ok(Some((self.timeout, unit)))
            }
            _ => Ok(None),
        }
    }
}

/// Request body for setting a TTL (POST /api/redis/{key}/expire)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpireRequest {
    #[serde(default, deserialize_with = "lenient_optional_timeout")]
    pub timeout: Option<i64>,
    #[serde(default)]
    pub time_unit: Option<String>,
}

impl ExpireRequest {
    /// Extracts the timeout and parsed unit, rejecting missing fields.
    pub fn parse(&self) -> Result<(i64, TimeUnit)> {
        let timeout = self
            .timeout
            .ok_or_else(|| StoreError::InvalidArgument("timeout is required".to_string()))?;
        let unit: TimeUnit = self
            .time_unit
            .as_deref()
            .ok_or_else(|| StoreError::InvalidArgument("timeUnit is required".to_string()))?
            .parse()?;
        Ok((timeout, unit))
    }
}

// == Timeout Parsing ==
/// A timeout sent either as a JSON integer or as a numeric string.
#[derive(Deserialize)]
#[serde(untagged)]
enum TimeoutRepr {
    Int(i64),
    Text(String),
}

fn lenient_optional_timeout<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<TimeoutRepr>::deserialize(deserializer)? {
        None => Ok(None),
        Some(TimeoutRepr::Int(n)) => Ok(Some(n)),
        Some(TimeoutRepr::Text(text)) => text.trim().parse::<i64>().map(Some).map_err(|_| {
            serde::de::Error::custom(format!("timeout '{}' is not an integer", text))
        }),
    }
}

fn lenient_timeout<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_optional_timeout(deserializer)?.unwrap_or_default())
}
