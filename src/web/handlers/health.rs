//! Health check HTTP handlers

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::models::StatKind;
use crate::web::AppState;

/// Health check endpoint
///
/// Reports cache state per table; the service is healthy as long as it can
/// respond, since an empty cache refills lazily on the next table read.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let offense_fetched_at = state.cache.fetched_at(StatKind::Offense).await;
    let defense_fetched_at = state.cache.fetched_at(StatKind::Defense).await;

    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now(),
        "source": state.source.name(),
        "cache": {
            "ttlSeconds": state.cache.ttl().num_seconds(),
            "offenseFetchedAt": offense_fetched_at,
            "defenseFetchedAt": defense_fetched_at,
        }
    }))
}

/// Liveness check (for container probes)
pub async fn liveness_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "alive",
        "timestamp": chrono::Utc::now()
    }))
}
