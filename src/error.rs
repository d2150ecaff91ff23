// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};
use thiserror::Error;

use crate::billing::plan::PlanCode;

/// Authorization failures raised by the tenant gate middleware.
///
/// Closed set: every gate rejection maps to exactly one of these, each with a
/// fixed HTTP status the caller translates into a response.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Authentication required: {0}")]
    Unauthenticated(String),

    #[error("Profile has no active tenant")]
    TenantMissing,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Profile not found")]
    ProfileNotFound,
}

impl AuthError {
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::Unauthenticated(_) => 401,
            AuthError::TenantMissing => 403,
            AuthError::Forbidden(_) => 403,
            AuthError::ProfileNotFound => 404,
        }
    }
}

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 403 Forbidden
    Forbidden(String),

    // 404 Not Found
    NotFound(String),

    // 409 Conflict
    Conflict(String),

    // 409 Conflict carrying the plan-limit context for the client
    LimitExceeded {
        resource: String,
        current_usage: i64,
        limit: i64,
        upgrade_to: Option<PlanCode>,
    },

    // 500 Internal Server Error
    InternalServerError(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::Forbidden(_) => 403,
            ApiError::NotFound(_) => 404,
            ApiError::Conflict(_) => 409,
            ApiError::LimitExceeded { .. } => 409,
            ApiError::InternalServerError(_) => 500,
            ApiError::ServiceUnavailable(_) => 503,
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::LimitExceeded { .. } => "PLAN_LIMIT_EXCEEDED",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
            ApiError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> String {
        match self {
            ApiError::BadRequest(msg) => msg.clone(),
            ApiError::Unauthorized(msg) => msg.clone(),
            ApiError::Forbidden(msg) => msg.clone(),
            ApiError::NotFound(msg) => msg.clone(),
            ApiError::Conflict(msg) => msg.clone(),
            ApiError::LimitExceeded { resource, limit, .. } => {
                format!("Plan limit reached for {} (limit: {})", resource, limit)
            }
            ApiError::InternalServerError(msg) => msg.clone(),
            ApiError::ServiceUnavailable(msg) => msg.clone(),
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        match self {
            ApiError::LimitExceeded { resource, current_usage, limit, upgrade_to } => {
                json!({
                    "error": true,
                    "message": self.message(),
                    "code": self.error_code(),
                    "resource": resource,
                    "current_usage": current_usage,
                    "limit": limit,
                    "upgrade_to": upgrade_to,
                })
            }
            _ => {
                json!({
                    "error": true,
                    "message": self.message(),
                    "code": self.error_code()
                })
            }
        }
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthenticated(msg) => ApiError::unauthorized(msg),
            AuthError::TenantMissing => {
                ApiError::forbidden("Profile has no active tenant")
            }
            AuthError::Forbidden(msg) => ApiError::forbidden(msg),
            AuthError::ProfileNotFound => ApiError::not_found("Profile not found"),
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::not_found("Record not found"),
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                tracing::error!("Database connectivity error: {}", err);
                ApiError::service_unavailable("Database temporarily unavailable")
            }
            other => {
                // Don't expose internal SQL errors to clients
                tracing::error!("Database query error: {}", other);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
        }
    }
}

impl From<crate::services::billing_service::BillingError> for ApiError {
    fn from(err: crate::services::billing_service::BillingError) -> Self {
        use crate::services::billing_service::BillingError;
        match err {
            BillingError::UnknownPlan(code) => {
                ApiError::bad_request(format!("Unknown plan code: {}", code))
            }
            BillingError::Database(e) => e.into(),
        }
    }
}

impl From<crate::auth::JwtError> for ApiError {
    fn from(err: crate::auth::JwtError) -> Self {
        tracing::error!("JWT error: {}", err);
        ApiError::internal_server_error("Failed to issue session token")
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_status_codes() {
        assert_eq!(AuthError::Unauthenticated("no token".into()).status_code(), 401);
        assert_eq!(AuthError::TenantMissing.status_code(), 403);
        assert_eq!(AuthError::Forbidden("nope".into()).status_code(), 403);
        assert_eq!(AuthError::ProfileNotFound.status_code(), 404);
    }

    #[test]
    fn test_auth_error_maps_to_api_error() {
        let api: ApiError = AuthError::ProfileNotFound.into();
        assert_eq!(api.status_code(), 404);
        assert_eq!(api.error_code(), "NOT_FOUND");

        let api: ApiError = AuthError::TenantMissing.into();
        assert_eq!(api.status_code(), 403);
    }

    #[test]
    fn test_limit_exceeded_body_carries_upgrade_hint() {
        let err = ApiError::LimitExceeded {
            resource: "athletes".into(),
            current_usage: 50,
            limit: 50,
            upgrade_to: Some(PlanCode::Pro),
        };
        assert_eq!(err.status_code(), 409);
        let body = err.to_json();
        assert_eq!(body["code"], "PLAN_LIMIT_EXCEEDED");
        assert_eq!(body["upgrade_to"], "pro");
        assert_eq!(body["limit"], 50);
    }
}
