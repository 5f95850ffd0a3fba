//! Health Routes
//!
//! - GET / - Service info
//! - GET /api/health - Liveness probe the board checks before loading

use axum::{extract::State, Json};
use chrono::Utc;
use std::sync::Arc;

use crate::api::dto::{HealthResponse, InfoResponse};
use crate::api::state::AppState;

pub const SERVICE_NAME: &str = "party-board-api";

/// GET /
pub async fn info(State(state): State<Arc<AppState>>) -> Json<InfoResponse> {
    Json(InfoResponse {
        message: "Party Board Dish Organizer API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: "running".to_string(),
        uptime_seconds: state.uptime_seconds(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// GET /api/health
///
/// The in-memory store has no dependency to check; answering at all means
/// the service is live.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health() {
        let Json(body) = health().await;
        assert_eq!(body.status, "healthy");
        assert_eq!(body.service, SERVICE_NAME);
    }
}
