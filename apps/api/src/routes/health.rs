//! Health check HTTP route handlers
//!
//! Provides endpoints for checking the health of the API and its dependencies:
//! - `GET /health` - Simple liveness check (returns 200 OK)
//! - `GET /health/live` - Kubernetes-style liveness probe
//! - `GET /health/ready` - Readiness check (verifies database and session store)

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;
use sqlx::PgPool;

use crate::repositories::SessionStore;

/// Shared application state for health check handlers
#[derive(Clone)]
pub struct HealthState {
    /// Database pool for readiness pings
    pub pool: PgPool,
    /// Session store for readiness pings
    pub session_store: SessionStore,
}

impl HealthState {
    /// Create new health state
    pub fn new(pool: PgPool, session_store: SessionStore) -> Self {
        Self {
            pool,
            session_store,
        }
    }
}

/// Create health check router
pub fn health_router(state: HealthState) -> Router {
    Router::new()
        .route("/", get(simple_health))
        .route("/live", get(liveness_probe))
        .route("/ready", get(readiness_probe))
        .with_state(state)
}

/// Simple health check - always returns OK if the server is running
///
/// This is useful for load balancer health checks that just need to verify
/// the server is responding to HTTP requests.
async fn simple_health() -> &'static str {
    "OK"
}

/// Liveness probe for Kubernetes
///
/// Returns 200 if the server process is running and can handle requests.
/// This does NOT check external dependencies - that's what readiness is for.
async fn liveness_probe() -> impl IntoResponse {
    Json(json!({ "status": "alive" }))
}

/// Readiness probe verifying external dependencies
///
/// Returns 200 when both the database and the session store answer a ping,
/// 503 with per-dependency status otherwise.
async fn readiness_probe(State(state): State<HealthState>) -> impl IntoResponse {
    let database_ok = sqlx::query("SELECT 1").execute(&state.pool).await.is_ok();

    let session_store_ok = match state.session_store.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Session store readiness check failed");
            false
        }
    };

    let ready = database_ok && session_store_ok;
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(json!({
            "status": if ready { "ready" } else { "not_ready" },
            "checks": {
                "database": if database_ok { "up" } else { "down" },
                "session_store": if session_store_ok { "up" } else { "down" },
            }
        })),
    )
}
