use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use sqlx::Row;
use uuid::Uuid;

use super::auth::AuthUser;
use crate::database::models::{Profile, Tenant};
use crate::error::{ApiError, AuthError};
use crate::state::AppState;
use crate::types::Role;

/// Profile-only context for routes that do not require a tenant
/// (platform administration).
#[derive(Clone, Debug)]
pub struct ProfileContext {
    pub user_id: Uuid,
    pub profile: Profile,
}

/// Full tenant context handed to tenant-scoped handlers
#[derive(Clone, Debug)]
pub struct TenantContext {
    pub user_id: Uuid,
    pub tenant_id: Uuid,
    pub profile: Profile,
    pub tenant: Tenant,
}

/// Gate for tenant-scoped routes. Resolves the acting profile and its active
/// tenant, or short-circuits with one of the closed authorization errors.
/// One guard evaluation per request, no mutation.
pub async fn with_tenant(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_user = auth_user_from(&request)?;
    let profile = load_profile(&state, &auth_user).await?;

    let tenant_id = resolve_tenant_id(&profile)?;
    let tenant = load_active_tenant(&state, tenant_id)
        .await?
        .ok_or(AuthError::TenantMissing)?;

    tracing::debug!(
        profile = %profile.id,
        tenant = %tenant.slug,
        "tenant gate passed"
    );

    let user_id = profile.id;
    request.extensions_mut().insert(ProfileContext {
        user_id,
        profile: profile.clone(),
    });
    request.extensions_mut().insert(TenantContext {
        user_id,
        tenant_id,
        profile,
        tenant,
    });

    Ok(next.run(request).await)
}

/// Gate for routes that need an authenticated profile but no tenant scope.
/// Platform admins may not belong to any academy.
pub async fn with_profile(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_user = auth_user_from(&request)?;
    let profile = load_profile(&state, &auth_user).await?;

    let user_id = profile.id;
    request.extensions_mut().insert(ProfileContext { user_id, profile });

    Ok(next.run(request).await)
}

fn auth_user_from(request: &Request) -> Result<AuthUser, ApiError> {
    request
        .extensions()
        .get::<AuthUser>()
        .cloned()
        .ok_or_else(|| {
            AuthError::Unauthenticated("Session authentication required before tenant gate".into())
                .into()
        })
}

/// Load the live profile row for the token's subject and cross-check the
/// token's role claim against the database.
async fn load_profile(state: &AppState, auth_user: &AuthUser) -> Result<Profile, ApiError> {
    let row = sqlx::query(
        r#"
        SELECT id, tenant_id, email, display_name, role, created_at, updated_at
        FROM profiles
        WHERE id = $1
        AND trashed_at IS NULL
        AND deleted_at IS NULL
        "#,
    )
    .bind(auth_user.profile_id)
    .fetch_optional(&state.pool)
    .await
    .map_err(|e| {
        tracing::error!("Database error loading profile {}: {}", auth_user.profile_id, e);
        ApiError::from(e)
    })?;

    let row = row.ok_or_else(|| {
        tracing::warn!("Gate rejected: profile '{}' not found or inactive", auth_user.profile_id);
        ApiError::from(AuthError::ProfileNotFound)
    })?;

    let role = Role::parse(row.get::<String, _>("role").as_str());
    verify_role_claim(auth_user.role, role)?;

    Ok(Profile {
        id: row.get("id"),
        tenant_id: row.get("tenant_id"),
        email: row.get("email"),
        display_name: row.get("display_name"),
        role,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

/// A stale token must not grant a role the profile no longer holds
fn verify_role_claim(token_role: Role, profile_role: Role) -> Result<(), AuthError> {
    if token_role != profile_role {
        tracing::warn!(
            "Gate rejected: token role '{}' does not match profile role '{}'",
            token_role.as_str(),
            profile_role.as_str()
        );
        return Err(AuthError::Forbidden("Role claim does not match profile".into()));
    }
    Ok(())
}

/// Tenant-scoped routes require the profile to carry an active tenant
fn resolve_tenant_id(profile: &Profile) -> Result<Uuid, AuthError> {
    profile.tenant_id.ok_or(AuthError::TenantMissing)
}

async fn load_active_tenant(
    state: &AppState,
    tenant_id: Uuid,
) -> Result<Option<Tenant>, ApiError> {
    let tenant = sqlx::query_as::<_, Tenant>(
        r#"
        SELECT id, name, slug, is_active, created_at, updated_at, trashed_at, deleted_at
        FROM tenants
        WHERE id = $1
        AND is_active = true
        AND trashed_at IS NULL
        AND deleted_at IS NULL
        "#,
    )
    .bind(tenant_id)
    .fetch_optional(&state.pool)
    .await
    .map_err(|e| {
        tracing::error!("Database error loading tenant {}: {}", tenant_id, e);
        ApiError::from(e)
    })?;

    if tenant.is_none() {
        tracing::warn!("Gate rejected: tenant '{}' not found or inactive", tenant_id);
    }

    Ok(tenant)
}
