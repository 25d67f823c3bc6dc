//! Request and Response models for the facade API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;
pub mod time_unit;

// Re-export commonly used types
pub use requests::{ExpireRequest, SetValueRequest};
pub use responses::{
    DeleteResponse, ErrorResponse, ExistsResponse, ExpireResponse, HealthResponse, TtlResponse,
    ValueResponse,
};
pub use time_unit::TimeUnit;
