//! Plan limit evaluation.
//!
//! Pure decision function invoked by creation handlers before inserting
//! tenant resources. No I/O: the caller supplies the configured limit and
//! the current usage count.

use serde::Serialize;

use super::plan::PlanCode;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LimitDecision {
    pub exceeded: bool,
    /// Next tier up the ladder, regardless of whether the limit was hit,
    /// so clients can always render the upgrade path. None at the top tier.
    pub upgrade_to: Option<PlanCode>,
}

/// Decide whether creating one more `resource` would exceed the plan limit.
///
/// A limit of None means unlimited. At-capacity blocks the next creation:
/// usage >= limit is exceeded, so a free tier allowing up to N athletes
/// rejects the (N+1)th.
pub fn evaluate_limit(
    plan_code: &str,
    limit: Option<i64>,
    current_usage: i64,
    resource: &str,
) -> LimitDecision {
    let exceeded = match limit {
        None => false,
        Some(limit) => current_usage >= limit,
    };

    let upgrade_to = PlanCode::parse(plan_code).and_then(|p| p.upgrade_target());

    if exceeded {
        tracing::debug!(
            plan = plan_code,
            resource = resource,
            usage = current_usage,
            limit = ?limit,
            "plan limit reached"
        );
    }

    LimitDecision { exceeded, upgrade_to }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_limit_is_never_exceeded() {
        for usage in [0, 1, 1000, i64::MAX] {
            let decision = evaluate_limit("premium", None, usage, "athletes");
            assert!(!decision.exceeded, "usage {} should not exceed", usage);
        }
    }

    #[test]
    fn test_under_limit_allows() {
        let decision = evaluate_limit("free", Some(50), 49, "athletes");
        assert!(!decision.exceeded);
    }

    #[test]
    fn test_at_capacity_blocks_next_creation() {
        let decision = evaluate_limit("free", Some(50), 50, "athletes");
        assert!(decision.exceeded);
        assert_eq!(decision.upgrade_to, Some(PlanCode::Pro));
    }

    #[test]
    fn test_over_limit_blocks() {
        let decision = evaluate_limit("free", Some(50), 51, "athletes");
        assert!(decision.exceeded);
    }

    #[test]
    fn test_top_tier_has_no_upgrade() {
        let decision = evaluate_limit("premium", None, 1000, "athletes");
        assert!(!decision.exceeded);
        assert_eq!(decision.upgrade_to, None);
    }

    #[test]
    fn test_pro_upgrades_to_premium() {
        let decision = evaluate_limit("pro", Some(500), 500, "athletes");
        assert!(decision.exceeded);
        assert_eq!(decision.upgrade_to, Some(PlanCode::Premium));
    }

    #[test]
    fn test_unknown_plan_has_no_upgrade_path() {
        let decision = evaluate_limit("enterprise", Some(10), 10, "classes");
        assert!(decision.exceeded);
        assert_eq!(decision.upgrade_to, None);
    }

    #[test]
    fn test_zero_limit_blocks_immediately() {
        let decision = evaluate_limit("free", Some(0), 0, "classes");
        assert!(decision.exceeded);
    }
}
