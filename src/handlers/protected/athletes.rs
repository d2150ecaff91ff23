use axum::extract::{Extension, State};
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::billing::limits::evaluate_limit;
use crate::database::models::Athlete;
use crate::error::{ApiError, AuthError};
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::middleware::tenant_gate::TenantContext;
use crate::services::{BillingService, UsageService};
use crate::state::AppState;
use crate::types::Capability;

#[derive(Debug, Deserialize)]
pub struct CreateAthleteRequest {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<NaiveDate>,
}

/// GET /api/athletes - live athletes of the calling tenant
pub async fn list_athletes(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
) -> ApiResult<Vec<Athlete>> {
    let athletes = sqlx::query_as::<_, Athlete>(
        r#"
        SELECT id, tenant_id, first_name, last_name, birth_date,
               created_at, updated_at, trashed_at, deleted_at
        FROM athletes
        WHERE tenant_id = $1
        AND trashed_at IS NULL
        AND deleted_at IS NULL
        ORDER BY last_name, first_name
        LIMIT $2
        "#,
    )
    .bind(ctx.tenant_id)
    .bind(state.config.api.max_page_size)
    .fetch_all(&state.pool)
    .await?;

    Ok(ApiResponse::success(athletes))
}

/// POST /api/athletes - create an athlete, guarded by the plan limit
pub async fn create_athlete(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
    Json(payload): Json<CreateAthleteRequest>,
) -> ApiResult<Athlete> {
    if !ctx.profile.role.can(Capability::ManageAthletes) {
        return Err(AuthError::Forbidden("Managing athletes requires admin role".into()).into());
    }

    if payload.first_name.trim().is_empty() || payload.last_name.trim().is_empty() {
        return Err(ApiError::bad_request("first_name and last_name are required"));
    }

    let billing = BillingService::new(state.pool.clone());
    let usage = UsageService::new(state.pool.clone());

    let plan = billing.current_plan(ctx.tenant_id).await?;
    let current_usage = usage.count(ctx.tenant_id, "athletes").await?;
    let limit = plan.limit_for("athletes");

    let decision = evaluate_limit(plan.as_str(), limit, current_usage, "athletes");
    if decision.exceeded {
        return Err(ApiError::LimitExceeded {
            resource: "athletes".into(),
            current_usage,
            // exceeded implies a concrete limit was configured
            limit: limit.unwrap_or(0),
            upgrade_to: decision.upgrade_to,
        });
    }

    let athlete = sqlx::query_as::<_, Athlete>(
        r#"
        INSERT INTO athletes
            (id, tenant_id, first_name, last_name, birth_date, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
        RETURNING id, tenant_id, first_name, last_name, birth_date,
                  created_at, updated_at, trashed_at, deleted_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(ctx.tenant_id)
    .bind(payload.first_name.trim())
    .bind(payload.last_name.trim())
    .bind(payload.birth_date)
    .fetch_one(&state.pool)
    .await?;

    Ok(ApiResponse::created(athlete))
}
