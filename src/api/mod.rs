//! API Module
//!
//! HTTP handlers and routing for the facade REST API.
//!
//! # Endpoints
//! - `GET /api/redis/:key` - Read a value
//! - `POST /api/redis/:key` - Store a value, optionally with TTL
//! - `DELETE /api/redis/:key` - Delete a key
//! - `GET /api/redis/:key/exists` - Existence check
//! - `POST /api/redis/:key/expire` - Set a TTL
//! - `GET /api/redis/:key/ttl` - Remaining TTL
//! - `GET /api/redis/health` - Store health probe

pub mod error;
pub mod handlers;
pub mod routes;

pub use error::ApiError;
pub use handlers::*;
pub use routes::create_router;
