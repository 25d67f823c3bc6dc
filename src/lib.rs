//! Redis Facade - A small REST API over a Redis key-value store
//!
//! Exposes get/set/delete/exists/expire/ttl and a health probe over HTTP,
//! forwarding each operation to an injected store client.

pub mod api;
pub mod config;
pub mod error;
pub mod facade;
pub mod models;
pub mod store;

pub use api::{create_router, AppState};
pub use config::{Config, StoreBackend};
pub use error::StoreError;
pub use facade::KvFacade;
