// POST /auth/login - exchange a verified identity for a session token.
//
// Credential verification happens at the external identity provider; this
// endpoint maps the identity onto a profile row and issues the JWT that the
// tenant gate validates on every protected request.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use sqlx::Row;
use uuid::Uuid;

use crate::auth::{generate_jwt, Claims};
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::types::Role;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Academy slug. Omitted for platform administrators, whose profiles
    /// are not bound to a tenant.
    pub tenant: Option<String>,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_in: u64,
    pub profile: LoginProfile,
}

#[derive(Debug, Serialize)]
pub struct LoginProfile {
    pub id: Uuid,
    pub tenant_id: Option<Uuid>,
    pub email: String,
    pub display_name: String,
    pub role: Role,
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    if payload.email.trim().is_empty() {
        return Err(ApiError::bad_request("email is required"));
    }

    let row = match &payload.tenant {
        Some(slug) => {
            sqlx::query(
                r#"
                SELECT p.id, p.tenant_id, p.email, p.display_name, p.role
                FROM profiles p
                JOIN tenants t ON t.id = p.tenant_id
                WHERE t.slug = $1
                AND p.email = $2
                AND t.is_active = true
                AND t.trashed_at IS NULL AND t.deleted_at IS NULL
                AND p.trashed_at IS NULL AND p.deleted_at IS NULL
                "#,
            )
            .bind(slug)
            .bind(&payload.email)
            .fetch_optional(&state.pool)
            .await?
        }
        None => {
            sqlx::query(
                r#"
                SELECT id, tenant_id, email, display_name, role
                FROM profiles
                WHERE email = $1
                AND tenant_id IS NULL
                AND trashed_at IS NULL AND deleted_at IS NULL
                "#,
            )
            .bind(&payload.email)
            .fetch_optional(&state.pool)
            .await?
        }
    };

    // Same message for unknown tenant and unknown email
    let row = row.ok_or_else(|| ApiError::unauthorized("Invalid login"))?;

    let profile_id: Uuid = row.get("id");
    let tenant_id: Option<Uuid> = row.get("tenant_id");
    let email: String = row.get("email");
    let display_name: String = row.get("display_name");
    let role = Role::parse(row.get::<String, _>("role").as_str());

    let expiry_hours = state.config.security.jwt_expiry_hours;
    let claims = Claims::new(profile_id, tenant_id, email.clone(), role, expiry_hours);
    let token = generate_jwt(&claims, &state.config.security)?;

    tracing::info!(profile = %profile_id, "login issued session token");

    Ok(ApiResponse::success(LoginResponse {
        token,
        expires_in: expiry_hours * 3600,
        profile: LoginProfile {
            id: profile_id,
            tenant_id,
            email,
            display_name,
            role,
        },
    }))
}
