use sqlx::PgPool;
use uuid::Uuid;

/// Per-tenant usage counts for limit evaluation.
///
/// Soft-deleted rows do not count against plan limits.
pub struct UsageService {
    pool: PgPool,
}

impl UsageService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Count live rows of a countable resource for one tenant.
    /// Resources the catalog does not track count as zero.
    pub async fn count(&self, tenant_id: Uuid, resource: &str) -> Result<i64, sqlx::Error> {
        let query = match resource {
            "athletes" => {
                "SELECT COUNT(*) FROM athletes
                 WHERE tenant_id = $1 AND trashed_at IS NULL AND deleted_at IS NULL"
            }
            "classes" => {
                "SELECT COUNT(*) FROM classes
                 WHERE tenant_id = $1 AND trashed_at IS NULL AND deleted_at IS NULL"
            }
            other => {
                tracing::debug!("No usage counter for resource '{}', counting 0", other);
                return Ok(0);
            }
        };

        let (count,): (i64,) = sqlx::query_as(query).bind(tenant_id).fetch_one(&self.pool).await?;
        Ok(count)
    }
}
