pub mod auth;

use axum::extract::State;
use axum::response::Json;
use serde_json::{json, Value};

use crate::state::AppState;

/// GET / - service descriptor
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Academy API",
            "version": version,
            "description": "Multi-tenant backend for gymnastics academy management",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "login": "/auth/login (public - token acquisition)",
                "auth": "/api/auth/* (protected)",
                "billing": "/api/billing/* (protected)",
                "athletes": "/api/athletes (protected)",
                "admin": "/api/admin/* (restricted, super admin only)",
            }
        }
    }))
}

/// GET /health - liveness plus database connectivity
pub async fn health(State(state): State<AppState>) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match crate::database::health_check(&state.pool).await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
