//! API Handlers
//!
//! HTTP request handlers for each facade endpoint. Each handler performs
//! exactly one facade operation (the POST and GET envelopes read back TTL
//! and existence as separate round trips).

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use tracing::{debug, error};

use crate::api::ApiError;
use crate::error::StoreError;
use crate::facade::KvFacade;
use crate::models::{
    DeleteResponse, ExistsResponse, ExpireRequest, ExpireResponse, HealthResponse,
    SetValueRequest, TtlResponse, ValueResponse,
};
use crate::store::StoreClient;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Facade over the shared store connection
    pub facade: KvFacade,
}

impl AppState {
    /// Creates a new AppState around an existing facade.
    pub fn new(facade: KvFacade) -> Self {
        Self { facade }
    }

    /// Creates a new AppState over `client` with the default JSON codec.
    pub fn from_client(client: Arc<dyn StoreClient>) -> Self {
        Self::new(KvFacade::with_json_codec(client))
    }
}

/// Handler for GET /api/redis/:key
///
/// Returns the value envelope, or 404 when the key does not exist.
pub async fn get_value_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<ValueResponse>, ApiError> {
    let facade = &state.facade;

    let value = facade
        .get(&key)
        .await
        .map_err(ApiError::envelope(&key))?
        .ok_or_else(|| ApiError::envelope(&key)(StoreError::NotFound(key.clone())))?;
    let exists = facade.has_key(&key).await.map_err(ApiError::envelope(&key))?;
    let ttl = facade.get_expire(&key).await.map_err(ApiError::envelope(&key))?;

    Ok(Json(ValueResponse::found(key, value, exists, ttl)))
}

/// Handler for POST /api/redis/:key
///
/// Stores the value, then reads it back with its TTL for the response. The
/// read-back is a separate round trip and may observe a concurrent writer.
pub async fn set_value_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    body: Result<Json<SetValueRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ValueResponse>), ApiError> {
    let facade = &state.facade;
    let Json(req) = body.map_err(|rejection| ApiError::envelope(&key)(rejection.into()))?;

    let value = req.value.as_ref().ok_or_else(|| {
        ApiError::envelope(&key)(StoreError::InvalidArgument("value is required".to_string()))
    })?;

    let written = match req.expiration().map_err(ApiError::envelope(&key))? {
        Some((timeout, unit)) => facade.set_with_ttl(&key, value, timeout, unit).await,
        None => facade.set(&key, value).await,
    };
    written.map_err(ApiError::envelope(&key))?;

    let stored = facade
        .get(&key)
        .await
        .map_err(ApiError::envelope(&key))?
        .unwrap_or_default();
    let ttl = facade.get_expire(&key).await.map_err(ApiError::envelope(&key))?;

    let body =
        ValueResponse::found(key, stored, true, ttl).with_message("Value stored successfully");
    Ok((StatusCode::CREATED, Json(body)))
}

/// Handler for DELETE /api/redis/:key
pub async fn delete_value_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let deleted = state
        .facade
        .delete(&key)
        .await
        .map_err(ApiError::operation("deleting key"))?;

    Ok(Json(DeleteResponse::new(key, deleted)))
}

/// Handler for GET /api/redis/:key/exists
pub async fn exists_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<ExistsResponse>, ApiError> {
    let exists = state
        .facade
        .has_key(&key)
        .await
        .map_err(ApiError::operation("checking key"))?;

    Ok(Json(ExistsResponse { key, exists }))
}

/// Handler for POST /api/redis/:key/expire
pub async fn expire_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    body: Result<Json<ExpireRequest>, JsonRejection>,
) -> Result<Json<ExpireResponse>, ApiError> {
    let Json(req) =
        body.map_err(|rejection| ApiError::operation("setting expiration")(rejection.into()))?;
    let (timeout, unit) = req
        .parse()
        .map_err(ApiError::operation("setting expiration"))?;

    let success = state
        .facade
        .expire(&key, timeout, unit)
        .await
        .map_err(ApiError::operation("setting expiration"))?;

    let unit_name = req.time_unit.unwrap_or_else(|| unit.to_string());
    Ok(Json(ExpireResponse::new(key, timeout, unit_name, success)))
}

/// Handler for GET /api/redis/:key/ttl
pub async fn ttl_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<TtlResponse>, ApiError> {
    let ttl = state
        .facade
        .get_expire(&key)
        .await
        .map_err(ApiError::operation("getting TTL"))?;

    Ok(Json(TtlResponse::new(key, ttl)))
}

/// Key whose POST and DELETE requests share a path with the health route.
pub const HEALTH_KEY: &str = "health";

/// Handler for POST /api/redis/health
///
/// Stores under the key `health`, which the static health route shadows.
pub async fn set_health_key_handler(
    state: State<AppState>,
    body: Result<Json<SetValueRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ValueResponse>), ApiError> {
    set_value_handler(state, Path(HEALTH_KEY.to_string()), body).await
}

/// Handler for DELETE /api/redis/health
pub async fn delete_health_key_handler(
    state: State<AppState>,
) -> Result<Json<DeleteResponse>, ApiError> {
    delete_value_handler(state, Path(HEALTH_KEY.to_string())).await
}

/// Handler for GET /api/redis/health
///
/// Writes, reads and deletes a probe key. Any failure reports 503.
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    match state.facade.health_probe().await {
        Ok(test_result) => {
            debug!(test_result, "Health check passed");
            Ok(Json(HealthResponse::healthy(test_result)))
        }
        Err(e) => {
            error!("Health check failed: {}", e);
            Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse::unhealthy(e.to_string())),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStoreClient;
    use serde_json::json;

    fn test_state() -> AppState {
        AppState::from_client(Arc::new(MemoryStoreClient::new()))
    }

    fn set_request(value: serde_json::Value) -> SetValueRequest {
        SetValueRequest {
            value: Some(value),
            timeout: 0,
            time_unit: None,
        }
    }

    #[tokio::test]
    async fn test_set_and_get_handler() {
        let state = test_state();

        let (status, Json(created)) = set_value_handler(
            State(state.clone()),
            Path("foo".to_string()),
            Ok(Json(set_request(json!("bar")))),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created.value, json!("bar"));
        assert_eq!(created.ttl, -1);
        assert_eq!(created.message.as_deref(), Some("Value stored successfully"));

        let Json(fetched) = get_value_handler(State(state), Path("foo".to_string()))
            .await
            .unwrap();
        assert_eq!(fetched.value, json!("bar"));
        assert!(fetched.exists);
        assert!(fetched.message.is_none());
    }

    #[tokio::test]
    async fn test_get_nonexistent_key() {
        let result = get_value_handler(State(test_state()), Path("nonexistent".to_string())).await;
        assert!(matches!(
            result,
            Err(ApiError::Envelope {
                source: StoreError::NotFound(_),
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_set_without_value_rejected() {
        let req = SetValueRequest {
            value: None,
            timeout: 0,
            time_unit: None,
        };
        let result =
            set_value_handler(State(test_state()), Path("k".to_string()), Ok(Json(req))).await;
        assert!(matches!(
            result,
            Err(ApiError::Envelope {
                source: StoreError::InvalidArgument(_),
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_delete_handler() {
        let state = test_state();
        let (status, _) = set_value_handler(
            State(state.clone()),
            Path("to_delete".to_string()),
            Ok(Json(set_request(json!(1)))),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);

        let Json(first) = delete_value_handler(State(state.clone()), Path("to_delete".to_string()))
            .await
            .unwrap();
        assert!(first.deleted);

        let Json(second) = delete_value_handler(State(state), Path("to_delete".to_string()))
            .await
            .unwrap();
        assert!(!second.deleted);
        assert_eq!(second.message, "Key not found");
    }

    #[tokio::test]
    async fn test_expire_echoes_unit_as_sent() {
        let state = test_state();
        let (status, _) = set_value_handler(
            State(state.clone()),
            Path("k".to_string()),
            Ok(Json(set_request(json!("v")))),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);

        let req = ExpireRequest {
            timeout: Some(30),
            time_unit: Some("seconds".to_string()),
        };
        let Json(resp) = expire_handler(State(state), Path("k".to_string()), Ok(Json(req)))
            .await
            .unwrap();
        assert!(resp.success);
        assert_eq!(resp.time_unit, "seconds");
    }

    #[tokio::test]
    async fn test_ttl_handler_missing_key() {
        let Json(resp) = ttl_handler(State(test_state()), Path("ghost".to_string()))
            .await
            .unwrap();
        assert_eq!(resp.ttl, -1);
        assert!(!resp.exists);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let Json(resp) = health_handler(State(test_state())).await.unwrap();
        assert_eq!(resp.status, "healthy");
        assert_eq!(resp.test_result, Some(true));
    }
}
