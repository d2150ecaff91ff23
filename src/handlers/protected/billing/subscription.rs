use axum::extract::{Extension, State};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::billing::plan::PlanCode;
use crate::database::models::Subscription;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::middleware::tenant_gate::TenantContext;
use crate::services::BillingService;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SubscriptionResponse {
    pub plan: PlanCode,
    pub monthly_price_eur: Decimal,
    /// None while the tenant is on the implicit free tier
    pub subscription: Option<Subscription>,
}

/// GET /api/billing/subscription - the tenant's current subscription.
/// Resolution is always by tenant id, never by academy owner.
pub async fn current_subscription(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
) -> ApiResult<SubscriptionResponse> {
    let billing = BillingService::new(state.pool.clone());

    let subscription = billing.current_subscription(ctx.tenant_id).await?;
    let plan = subscription
        .as_ref()
        .and_then(|sub| PlanCode::parse(&sub.plan_code))
        .unwrap_or(PlanCode::Free);

    Ok(ApiResponse::success(SubscriptionResponse {
        plan,
        monthly_price_eur: plan.monthly_price(),
        subscription,
    }))
}
