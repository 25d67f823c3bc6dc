//! Facade Module
//!
//! The single service boundary between the HTTP surface and the store.

mod service;


pub use service::{KvFacade, HEALTH_PROBE_TTL_SECS};
