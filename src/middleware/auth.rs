use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::{validate_jwt, Claims};
use crate::error::{ApiError, AuthError};
use crate::state::AppState;
use crate::types::Role;

/// Authenticated user context extracted from the session token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub profile_id: Uuid,
    pub tenant_id: Option<Uuid>,
    pub email: String,
    pub role: Role,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            profile_id: claims.sub,
            tenant_id: claims.tenant_id,
            email: claims.email,
            role: claims.role,
        }
    }
}

/// Session authentication middleware. Validates the bearer token and injects
/// AuthUser into request extensions for the gates downstream.
pub async fn require_auth(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers).map_err(AuthError::Unauthenticated)?;

    let claims = validate_jwt(&token, &state.config.security)
        .map_err(|e| AuthError::Unauthenticated(e.to_string()))?;

    request.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(request).await)
}

/// Extract the bearer token from the Authorization header
fn extract_bearer_token(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get("authorization")
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty bearer token".to_string());
        }
        Ok(token.to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_missing_header_rejected() {
        assert!(extract_bearer_token(&HeaderMap::new()).is_err());
    }

    #[test]
    fn test_non_bearer_rejected() {
        assert!(extract_bearer_token(&headers_with("Basic abc123")).is_err());
    }

    #[test]
    fn test_empty_token_rejected() {
        assert!(extract_bearer_token(&headers_with("Bearer  ")).is_err());
    }

    #[test]
    fn test_bearer_token_extracted() {
        let token = extract_bearer_token(&headers_with("Bearer abc.def.ghi")).unwrap();
        assert_eq!(token, "abc.def.ghi");
    }
}
