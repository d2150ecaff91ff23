// Platform tenant registry. Super admin only: these routes sit behind the
// profile gate plus the super-admin role layer, no tenant scope required.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::Tenant;
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateTenantRequest {
    pub name: String,
    pub slug: String,
}

/// GET /api/admin/tenants - every registered academy, inactive ones included
pub async fn list_tenants(State(state): State<AppState>) -> ApiResult<Vec<Tenant>> {
    let tenants = sqlx::query_as::<_, Tenant>(
        r#"
        SELECT id, name, slug, is_active, created_at, updated_at, trashed_at, deleted_at
        FROM tenants
        WHERE deleted_at IS NULL
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(&state.pool)
    .await?;

    Ok(ApiResponse::success(tenants))
}

/// POST /api/admin/tenants - register a new academy
pub async fn create_tenant(
    State(state): State<AppState>,
    Json(payload): Json<CreateTenantRequest>,
) -> ApiResult<Tenant> {
    validate_slug(&payload.slug)?;

    if payload.name.trim().is_empty() {
        return Err(ApiError::bad_request("name is required"));
    }

    let (exists,): (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM tenants WHERE slug = $1 AND deleted_at IS NULL)")
            .bind(&payload.slug)
            .fetch_one(&state.pool)
            .await?;

    if exists {
        return Err(ApiError::conflict(format!(
            "Tenant slug '{}' is already taken",
            payload.slug
        )));
    }

    let tenant = sqlx::query_as::<_, Tenant>(
        r#"
        INSERT INTO tenants (id, name, slug, is_active, created_at, updated_at)
        VALUES ($1, $2, $3, true, NOW(), NOW())
        RETURNING id, name, slug, is_active, created_at, updated_at, trashed_at, deleted_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(payload.name.trim())
    .bind(&payload.slug)
    .fetch_one(&state.pool)
    .await?;

    tracing::info!(tenant = %tenant.id, slug = %tenant.slug, "tenant registered");

    Ok(ApiResponse::created(tenant))
}

/// Slugs become part of login and public directory URLs
fn validate_slug(slug: &str) -> Result<(), ApiError> {
    if slug.len() < 2 || slug.len() > 63 {
        return Err(ApiError::bad_request("slug must be 2-63 characters"));
    }

    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(ApiError::bad_request(
            "slug can only contain lowercase letters, digits, and hyphens",
        ));
    }

    if slug.starts_with('-') || slug.ends_with('-') {
        return Err(ApiError::bad_request("slug cannot start or end with a hyphen"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_slugs() {
        assert!(validate_slug("flips-gym").is_ok());
        assert!(validate_slug("gym42").is_ok());
    }

    #[test]
    fn test_invalid_slugs() {
        assert!(validate_slug("a").is_err());
        assert!(validate_slug("Flips").is_err());
        assert!(validate_slug("flips gym").is_err());
        assert!(validate_slug("-flips").is_err());
        assert!(validate_slug("flips-").is_err());
    }
}
