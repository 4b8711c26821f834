use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Router};
use serde::Serialize;

use crate::response::JsonBody;
use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `"ok"` or `"degraded"`.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Round-trip time of the database probe, when it succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_latency_ms: Option<u64>,
}

/// GET /health
///
/// Answers 503 while the database is unreachable so load balancers can
/// route around this instance.
async fn health_check(State(state): State<AppState>) -> (StatusCode, JsonBody<HealthResponse>) {
    let started = Instant::now();
    let probe = baralga_db::health_check(&state.pool).await;

    let (code, body) = match probe {
        Ok(()) => {
            let latency = started.elapsed().as_millis().try_into().unwrap_or(u64::MAX);
            (
                StatusCode::OK,
                HealthResponse {
                    status: "ok",
                    version: env!("CARGO_PKG_VERSION"),
                    db_healthy: true,
                    db_latency_ms: Some(latency),
                },
            )
        }
        Err(err) => {
            tracing::warn!(error = %err, "Database health probe failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                HealthResponse {
                    status: "degraded",
                    version: env!("CARGO_PKG_VERSION"),
                    db_healthy: false,
                    db_latency_ms: None,
                },
            )
        }
    };
    (code, JsonBody(body))
}

/// Mount health check routes (root level, not under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
