use poem_openapi::{payload::Json, OpenApi, Tags};
use chrono::Utc;

use crate::types::dto::common::{HealthResponse, MessageResponse};

/// Health check API
pub struct HealthApi;

/// API tags for health endpoints
#[derive(Tags)]
enum ApiTags {
    /// Health check endpoints
    Health,
}

#[OpenApi]
impl HealthApi {
    /// Health check endpoint
    ///
    /// Returns the current status of the API service
    #[oai(path = "/health", method = "get", tag = "ApiTags::Health")]
    async fn health(&self) -> Json<HealthResponse> {
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
        })
    }

    /// Liveness probe
    #[oai(path = "/ping", method = "get", tag = "ApiTags::Health")]
    async fn ping(&self) -> Json<MessageResponse> {
        Json(MessageResponse {
            message: "pong".to_string(),
        })
    }
}
