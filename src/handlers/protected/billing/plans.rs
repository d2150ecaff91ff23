use crate::billing::plan::{catalog, PlanInfo};
use crate::middleware::response::{ApiResponse, ApiResult};

/// GET /api/billing/plans - plan catalog with prices and limits
pub async fn list_plans() -> ApiResult<Vec<PlanInfo>> {
    Ok(ApiResponse::success(catalog()))
}
