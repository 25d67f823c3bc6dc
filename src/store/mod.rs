//! Store Module
//!
//! The external key-value store collaborator and value serialization.
//!
//! # Backends
//! - `RedisStoreClient` - Redis over a shared, auto-reconnecting connection
//! - `MemoryStoreClient` - in-process map with Redis-compatible TTL replies

mod client;
mod codec;
mod entry;
mod memory;
mod redis_client;

// Re-export public types
pub use client::StoreClient;
pub use codec::{JsonCodec, ValueCodec};
pub use entry::StoredEntry;
pub use memory::MemoryStoreClient;
pub use redis_client::RedisStoreClient;

use std::time::Duration;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 512;

/// TTL reply for a key that exists without an expiration
pub const TTL_NO_EXPIRY: i64 = -1;

/// TTL reply for a key that does not exist
pub const TTL_MISSING: i64 = -2;

/// Longest TTL accepted (100 years); both backends agree up to this bound
pub const MAX_TTL: Duration = Duration::from_secs(100 * 365 * 86_400);
