use chrono::{Duration, Utc};
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::billing::plan::PlanCode;
use crate::billing::proration::{quote_at, ProrationQuote};
use crate::database::models::Subscription;

/// Default cycle length when a tenant subscribes for the first time
const DEFAULT_CYCLE_DAYS: i64 = 30;

#[derive(Debug, Error)]
pub enum BillingError {
    #[error("Unknown plan code: {0}")]
    UnknownPlan(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Subscription queries and plan changes for one tenant.
///
/// Subscriptions are always resolved by tenant_id. Owner-based lookups are
/// deliberately not supported: one resolution path only.
pub struct BillingService {
    pool: PgPool,
}

impl BillingService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The tenant's active subscription, if any
    pub async fn current_subscription(
        &self,
        tenant_id: Uuid,
    ) -> Result<Option<Subscription>, BillingError> {
        let subscription = sqlx::query_as::<_, Subscription>(
            r#"
            SELECT id, tenant_id, plan_code, status, cycle_start, cycle_end,
                   created_at, updated_at
            FROM subscriptions
            WHERE tenant_id = $1
            AND status = 'active'
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(subscription)
    }

    /// Current plan for a tenant. No subscription row means free tier, and an
    /// unrecognized stored plan code also degrades to free.
    pub async fn current_plan(&self, tenant_id: Uuid) -> Result<PlanCode, BillingError> {
        let plan = self
            .current_subscription(tenant_id)
            .await?
            .and_then(|sub| PlanCode::parse(&sub.plan_code))
            .unwrap_or(PlanCode::Free);

        Ok(plan)
    }

    /// Proration quote for switching the tenant to `new_plan` right now
    pub async fn preview_change(
        &self,
        tenant_id: Uuid,
        new_plan: &str,
    ) -> Result<PlanChangePreview, BillingError> {
        let target = PlanCode::parse(new_plan)
            .ok_or_else(|| BillingError::UnknownPlan(new_plan.to_string()))?;

        let now = Utc::now();
        let subscription = self.current_subscription(tenant_id).await?;

        let (current, cycle_start, cycle_end) = match &subscription {
            Some(sub) => (
                PlanCode::parse(&sub.plan_code).unwrap_or(PlanCode::Free),
                sub.cycle_start,
                sub.cycle_end,
            ),
            // First subscription: a fresh cycle starting now, so the quote
            // is the full monthly price of the target plan
            None => (PlanCode::Free, now, now + Duration::days(DEFAULT_CYCLE_DAYS)),
        };

        let quote = quote_at(current.as_str(), target.as_str(), cycle_start, cycle_end, now);

        Ok(PlanChangePreview {
            current_plan: current,
            new_plan: target,
            quote,
        })
    }

    /// Apply a plan change and return the updated subscription with the quote
    /// that was in effect at the moment of the change.
    pub async fn change_plan(
        &self,
        tenant_id: Uuid,
        new_plan: &str,
    ) -> Result<(Subscription, PlanChangePreview), BillingError> {
        let preview = self.preview_change(tenant_id, new_plan).await?;

        let updated = sqlx::query_as::<_, Subscription>(
            r#"
            UPDATE subscriptions
            SET plan_code = $2, updated_at = NOW()
            WHERE tenant_id = $1
            AND status = 'active'
            RETURNING id, tenant_id, plan_code, status, cycle_start, cycle_end,
                      created_at, updated_at
            "#,
        )
        .bind(tenant_id)
        .bind(preview.new_plan.as_str())
        .fetch_optional(&self.pool)
        .await?;

        let subscription = match updated {
            Some(sub) => sub,
            None => {
                // No active subscription yet: open a fresh cycle
                let cycle_start = Utc::now();
                let cycle_end = cycle_start + Duration::days(DEFAULT_CYCLE_DAYS);

                sqlx::query_as::<_, Subscription>(
                    r#"
                    INSERT INTO subscriptions
                        (id, tenant_id, plan_code, status, cycle_start, cycle_end,
                         created_at, updated_at)
                    VALUES ($1, $2, $3, 'active', $4, $5, NOW(), NOW())
                    RETURNING id, tenant_id, plan_code, status, cycle_start, cycle_end,
                              created_at, updated_at
                    "#,
                )
                .bind(Uuid::new_v4())
                .bind(tenant_id)
                .bind(preview.new_plan.as_str())
                .bind(cycle_start)
                .bind(cycle_end)
                .fetch_one(&self.pool)
                .await?
            }
        };

        tracing::info!(
            tenant_id = %tenant_id,
            from = preview.current_plan.as_str(),
            to = preview.new_plan.as_str(),
            amount_due = %preview.quote.amount_due,
            credit = %preview.quote.credit,
            "plan changed"
        );

        Ok((subscription, preview))
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct PlanChangePreview {
    pub current_plan: PlanCode,
    pub new_plan: PlanCode,
    #[serde(flatten)]
    pub quote: ProrationQuote,
}
