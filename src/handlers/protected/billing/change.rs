use axum::extract::{Extension, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::database::models::Subscription;
use crate::error::{ApiError, AuthError};
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::middleware::tenant_gate::TenantContext;
use crate::services::billing_service::{BillingService, PlanChangePreview};
use crate::state::AppState;
use crate::types::Capability;

#[derive(Debug, Deserialize)]
pub struct PlanChangeRequest {
    pub new_plan: String,
}

#[derive(Debug, Serialize)]
pub struct PlanChangeResponse {
    pub subscription: Subscription,
    pub preview: PlanChangePreview,
}

fn require_billing_access(ctx: &TenantContext) -> Result<(), ApiError> {
    if !ctx.profile.role.can(Capability::ManageBilling) {
        return Err(AuthError::Forbidden("Billing access requires admin role".into()).into());
    }
    Ok(())
}

/// POST /api/billing/preview - proration quote for a plan change, no mutation
pub async fn preview_change(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
    Json(payload): Json<PlanChangeRequest>,
) -> ApiResult<PlanChangePreview> {
    require_billing_access(&ctx)?;

    let billing = BillingService::new(state.pool.clone());
    let preview = billing.preview_change(ctx.tenant_id, &payload.new_plan).await?;

    Ok(ApiResponse::success(preview))
}

/// POST /api/billing/change-plan - apply a plan change mid-cycle
pub async fn change_plan(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
    Json(payload): Json<PlanChangeRequest>,
) -> ApiResult<PlanChangeResponse> {
    require_billing_access(&ctx)?;

    let billing = BillingService::new(state.pool.clone());
    let (subscription, preview) = billing.change_plan(ctx.tenant_id, &payload.new_plan).await?;

    Ok(ApiResponse::success(PlanChangeResponse {
        subscription,
        preview,
    }))
}
