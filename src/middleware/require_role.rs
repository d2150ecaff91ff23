use axum::{extract::Request, middleware::Next, response::Response};

use super::tenant_gate::ProfileContext;
use crate::error::{ApiError, AuthError};
use crate::types::Capability;

/// Route layer for platform-administration endpoints. Runs after the profile
/// gate, so a missing context is a wiring bug rather than a client error.
pub async fn require_super_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    let ctx = request.extensions().get::<ProfileContext>().ok_or_else(|| {
        ApiError::internal_server_error("Profile context required before role check")
    })?;

    if !ctx.profile.role.can(Capability::ManagePlatform) {
        tracing::warn!(
            "Role check rejected: profile '{}' with role '{}' on platform route",
            ctx.profile.id,
            ctx.profile.role.as_str()
        );
        return Err(AuthError::Forbidden("Super admin access required".into()).into());
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::StatusCode;
    use axum::middleware::from_fn;
    use axum::routing::get;
    use axum::Router;
    use chrono::Utc;
    use tower::util::ServiceExt;
    use uuid::Uuid;

    use crate::database::models::Profile;
    use crate::types::Role;

    /// Router with the role layer and a stubbed profile gate in front of it
    fn app_with_role(role: Role) -> Router {
        let now = Utc::now();
        let ctx = ProfileContext {
            user_id: Uuid::new_v4(),
            profile: Profile {
                id: Uuid::new_v4(),
                tenant_id: None,
                email: "admin@example.com".to_string(),
                display_name: "Admin".to_string(),
                role,
                created_at: now,
                updated_at: now,
            },
        };

        Router::new()
            .route("/admin", get(|| async { "ok" }))
            .layer(from_fn(require_super_admin))
            .layer(from_fn(move |mut request: Request, next: Next| {
                let ctx = ctx.clone();
                async move {
                    request.extensions_mut().insert(ctx);
                    next.run(request).await
                }
            }))
    }

    async fn status_for(role: Role) -> StatusCode {
        let request = axum::http::Request::builder()
            .uri("/admin")
            .body(Body::empty())
            .unwrap();
        app_with_role(role).oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_super_admin_passes_role_layer() {
        assert_eq!(status_for(Role::SuperAdmin).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_member_rejected_by_role_layer() {
        assert_eq!(status_for(Role::Member).await, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_tenant_admin_rejected_by_role_layer() {
        // Academy admins manage their academy, not the platform
        assert_eq!(status_for(Role::Admin).await, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_missing_context_is_server_error() {
        let app = Router::new()
            .route("/admin", get(|| async { "ok" }))
            .layer(from_fn(require_super_admin));

        let request = axum::http::Request::builder()
            .uri("/admin")
            .body(Body::empty())
            .unwrap();
        let status = app.oneshot(request).await.unwrap().status();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
