//! Plan catalog: tiers, prices and per-resource limits.
//!
//! The ladder is fixed (free -> pro -> premium). Unknown plan codes never
//! fail billing math: callers fall back to price 0 and unlimited resources,
//! stricter validation belongs at the API boundary.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanCode {
    Free,
    Pro,
    Premium,
}

impl PlanCode {
    /// Lenient parse: unknown codes return None instead of an error
    pub fn parse(s: &str) -> Option<PlanCode> {
        match s {
            "free" => Some(PlanCode::Free),
            "pro" => Some(PlanCode::Pro),
            "premium" => Some(PlanCode::Premium),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanCode::Free => "free",
            PlanCode::Pro => "pro",
            PlanCode::Premium => "premium",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PlanCode::Free => "Free",
            PlanCode::Pro => "Pro",
            PlanCode::Premium => "Premium",
        }
    }

    /// Next tier up the ladder, or None at the top
    pub fn upgrade_target(&self) -> Option<PlanCode> {
        match self {
            PlanCode::Free => Some(PlanCode::Pro),
            PlanCode::Pro => Some(PlanCode::Premium),
            PlanCode::Premium => None,
        }
    }

    /// Monthly price in EUR
    pub fn monthly_price(&self) -> Decimal {
        match self {
            PlanCode::Free => Decimal::ZERO,
            PlanCode::Pro => dec!(19),
            PlanCode::Premium => dec!(49),
        }
    }

    /// Configured limit for a countable resource. None means unlimited.
    /// Resources the catalog does not track are unlimited on every plan.
    pub fn limit_for(&self, resource: &str) -> Option<i64> {
        match (self, resource) {
            (PlanCode::Free, "athletes") => Some(50),
            (PlanCode::Free, "classes") => Some(5),
            (PlanCode::Pro, "athletes") => Some(500),
            (PlanCode::Pro, "classes") => Some(50),
            (PlanCode::Premium, _) => None,
            _ => None,
        }
    }
}

/// Price of a plan referenced by raw code. Unknown codes are worth 0.
pub fn monthly_price_of(code: &str) -> Decimal {
    PlanCode::parse(code)
        .map(|p| p.monthly_price())
        .unwrap_or(Decimal::ZERO)
}

/// Catalog entry served by GET /api/billing/plans
#[derive(Debug, Clone, Serialize)]
pub struct PlanInfo {
    pub code: PlanCode,
    pub name: &'static str,
    pub monthly_price_eur: Decimal,
    pub athlete_limit: Option<i64>,
    pub class_limit: Option<i64>,
}

pub fn catalog() -> Vec<PlanInfo> {
    [PlanCode::Free, PlanCode::Pro, PlanCode::Premium]
        .into_iter()
        .map(|code| PlanInfo {
            code,
            name: code.display_name(),
            monthly_price_eur: code.monthly_price(),
            athlete_limit: code.limit_for("athletes"),
            class_limit: code.limit_for("classes"),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ladder_is_free_pro_premium() {
        assert_eq!(PlanCode::Free.upgrade_target(), Some(PlanCode::Pro));
        assert_eq!(PlanCode::Pro.upgrade_target(), Some(PlanCode::Premium));
        assert_eq!(PlanCode::Premium.upgrade_target(), None);
    }

    #[test]
    fn test_parse_is_lenient() {
        assert_eq!(PlanCode::parse("pro"), Some(PlanCode::Pro));
        assert_eq!(PlanCode::parse("enterprise"), None);
        assert_eq!(PlanCode::parse(""), None);
    }

    #[test]
    fn test_unknown_plan_is_worth_zero() {
        assert_eq!(monthly_price_of("enterprise"), Decimal::ZERO);
        assert_eq!(monthly_price_of("pro"), dec!(19));
    }

    #[test]
    fn test_premium_is_unlimited() {
        assert_eq!(PlanCode::Premium.limit_for("athletes"), None);
        assert_eq!(PlanCode::Premium.limit_for("classes"), None);
    }

    #[test]
    fn test_untracked_resource_is_unlimited() {
        assert_eq!(PlanCode::Free.limit_for("notifications"), None);
    }

    #[test]
    fn test_catalog_lists_all_tiers() {
        let plans = catalog();
        assert_eq!(plans.len(), 3);
        assert_eq!(plans[0].code, PlanCode::Free);
        assert_eq!(plans[0].athlete_limit, Some(50));
        assert_eq!(plans[2].monthly_price_eur, dec!(49));
    }
}
