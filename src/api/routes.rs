//! API Routes
//!
//! Configures the Axum router with all facade endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    delete_health_key_handler, delete_value_handler, exists_handler, expire_handler,
    get_value_handler, health_handler, set_health_key_handler, set_value_handler, ttl_handler,
    AppState,
};

/// Common prefix of every endpoint.
pub const API_PREFIX: &str = "/api/redis";

/// Creates the main router with all endpoints configured.
///
/// `/api/redis/health` is a static route and takes precedence over the
/// `/api/redis/:key` capture. Its POST and DELETE still reach the key named
/// `health`; only GET is taken by the health probe.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route(
            "/health",
            get(health_handler)
                .post(set_health_key_handler)
                .delete(delete_health_key_handler),
        )
        .route(
            "/:key",
            get(get_value_handler)
                .post(set_value_handler)
                .delete(delete_value_handler),
        )
        .route("/:key/exists", get(exists_handler))
        .route("/:key/expire", post(expire_handler))
        .route("/:key/ttl", get(ttl_handler));

    Router::new()
        .nest(API_PREFIX, api)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
