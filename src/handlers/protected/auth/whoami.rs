use axum::extract::Extension;
use serde::Serialize;
use uuid::Uuid;

use crate::database::models::Profile;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::middleware::tenant_gate::TenantContext;

#[derive(Debug, Serialize)]
pub struct WhoamiResponse {
    pub user_id: Uuid,
    pub profile: Profile,
    pub tenant: WhoamiTenant,
}

#[derive(Debug, Serialize)]
pub struct WhoamiTenant {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

/// GET /api/auth/whoami - current tenant context as seen by the gate
pub async fn whoami(Extension(ctx): Extension<TenantContext>) -> ApiResult<WhoamiResponse> {
    Ok(ApiResponse::success(WhoamiResponse {
        user_id: ctx.user_id,
        profile: ctx.profile,
        tenant: WhoamiTenant {
            id: ctx.tenant.id,
            name: ctx.tenant.name,
            slug: ctx.tenant.slug,
        },
    }))
}
