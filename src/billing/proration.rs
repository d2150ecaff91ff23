//! Mid-cycle plan change proration.
//!
//! Both plans are valued at a flat per-day rate over the billing cycle. The
//! unused value of the old plan offsets the remaining-days cost of the new
//! one, so exactly one of amount_due / credit is non-zero for any change.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::plan::monthly_price_of;

const SECONDS_PER_DAY: i64 = 86_400;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProrationQuote {
    /// Amount to charge now for the upgrade, 2 decimal places
    pub amount_due: Decimal,
    /// Credit left over after a downgrade, 2 decimal places
    pub credit: Decimal,
    pub days_remaining: i64,
    pub total_days: i64,
    pub proration_date: DateTime<Utc>,
}

impl ProrationQuote {
    fn zero(at: DateTime<Utc>) -> Self {
        Self {
            amount_due: Decimal::ZERO,
            credit: Decimal::ZERO,
            days_remaining: 0,
            total_days: 0,
            proration_date: at,
        }
    }
}

/// Whole days from `from` to `to`, rounding any partial day up, never negative
fn whole_days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    let secs = to.signed_duration_since(from).num_seconds();
    if secs <= 0 {
        0
    } else {
        (secs + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY
    }
}

/// Quote a plan change effective `now`, within the given billing cycle.
///
/// Unknown plan codes are priced at zero rather than failing. A cycle that
/// has already ended (or has zero length) yields an all-zero quote.
pub fn quote_at(
    current_plan: &str,
    new_plan: &str,
    cycle_start: DateTime<Utc>,
    cycle_end: DateTime<Utc>,
    now: DateTime<Utc>,
) -> ProrationQuote {
    let total_days = whole_days_between(cycle_start, cycle_end);
    if total_days == 0 {
        return ProrationQuote::zero(now);
    }

    // Clamp so a quote taken before the cycle starts never credits more
    // than one full cycle of the old plan.
    let days_remaining = whole_days_between(now, cycle_end).min(total_days);
    if days_remaining == 0 {
        return ProrationQuote {
            total_days,
            ..ProrationQuote::zero(now)
        };
    }

    let total = Decimal::from(total_days);
    let remaining = Decimal::from(days_remaining);

    let credit_raw = monthly_price_of(current_plan) / total * remaining;
    let cost_raw = monthly_price_of(new_plan) / total * remaining;

    ProrationQuote {
        amount_due: (cost_raw - credit_raw).max(Decimal::ZERO).round_dp(2),
        credit: (credit_raw - cost_raw).max(Decimal::ZERO).round_dp(2),
        days_remaining,
        total_days,
        proration_date: now,
    }
}

/// Quote a plan change effective immediately
pub fn quote(
    current_plan: &str,
    new_plan: &str,
    cycle_start: DateTime<Utc>,
    cycle_end: DateTime<Utc>,
) -> ProrationQuote {
    quote_at(current_plan, new_plan, cycle_start, cycle_end, Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn utc(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_upgrade_free_to_pro_halfway() {
        // 30-day cycle, 15 days remaining: owe half of pro's monthly price
        let q = quote_at("free", "pro", utc(2026, 3, 1), utc(2026, 3, 31), utc(2026, 3, 16));
        assert_eq!(q.total_days, 30);
        assert_eq!(q.days_remaining, 15);
        assert_eq!(q.amount_due, dec!(9.50));
        assert_eq!(q.credit, dec!(0));
    }

    #[test]
    fn test_downgrade_produces_credit_only() {
        let q = quote_at("premium", "pro", utc(2026, 3, 1), utc(2026, 3, 31), utc(2026, 3, 16));
        assert_eq!(q.amount_due, dec!(0));
        // (49 - 19) / 30 * 15 = 15.00
        assert_eq!(q.credit, dec!(15.00));
    }

    #[test]
    fn test_exactly_one_side_nonzero() {
        let plans = ["free", "pro", "premium", "enterprise"];
        for current in plans {
            for new in plans {
                let q =
                    quote_at(current, new, utc(2026, 3, 1), utc(2026, 3, 31), utc(2026, 3, 10));
                assert_eq!(
                    q.amount_due * q.credit,
                    Decimal::ZERO,
                    "{} -> {} produced both amount_due {} and credit {}",
                    current,
                    new,
                    q.amount_due,
                    q.credit
                );
            }
        }
    }

    #[test]
    fn test_same_plan_is_all_zero() {
        let q = quote_at("pro", "pro", utc(2026, 3, 1), utc(2026, 3, 31), utc(2026, 3, 10));
        assert_eq!(q.amount_due, dec!(0));
        assert_eq!(q.credit, dec!(0));
    }

    #[test]
    fn test_after_cycle_end_is_all_zero() {
        let q = quote_at("free", "pro", utc(2026, 3, 1), utc(2026, 3, 31), utc(2026, 4, 5));
        assert_eq!(q.days_remaining, 0);
        assert_eq!(q.total_days, 30);
        assert_eq!(q.amount_due, dec!(0));
        assert_eq!(q.credit, dec!(0));
    }

    #[test]
    fn test_zero_length_cycle_is_all_zero() {
        let day = utc(2026, 3, 1);
        let q = quote_at("free", "pro", day, day, day);
        assert_eq!(q.total_days, 0);
        assert_eq!(q.amount_due, dec!(0));
        assert_eq!(q.credit, dec!(0));
    }

    #[test]
    fn test_partial_day_rounds_up() {
        // 30 days and one hour: counts as 31 whole days
        let end = utc(2026, 3, 31) + chrono::Duration::hours(1);
        let q = quote_at("free", "pro", utc(2026, 3, 1), end, utc(2026, 3, 1));
        assert_eq!(q.total_days, 31);
        assert_eq!(q.days_remaining, 31);
        // Full cycle remaining: owe the full monthly price
        assert_eq!(q.amount_due, dec!(19.00));
    }

    #[test]
    fn test_unknown_plan_priced_at_zero() {
        let q = quote_at("enterprise", "pro", utc(2026, 3, 1), utc(2026, 3, 31), utc(2026, 3, 16));
        // Old plan worth nothing, so this behaves like a free -> pro upgrade
        assert_eq!(q.amount_due, dec!(9.50));
        assert_eq!(q.credit, dec!(0));
    }

    #[test]
    fn test_idempotent_for_fixed_clock() {
        let now = utc(2026, 3, 16);
        let a = quote_at("free", "premium", utc(2026, 3, 1), utc(2026, 3, 31), now);
        let b = quote_at("free", "premium", utc(2026, 3, 1), utc(2026, 3, 31), now);
        assert_eq!(a, b);
    }

    #[test]
    fn test_quote_before_cycle_start_clamps_to_full_cycle() {
        let q = quote_at("free", "pro", utc(2026, 3, 1), utc(2026, 3, 31), utc(2026, 2, 20));
        assert_eq!(q.days_remaining, 30);
        assert_eq!(q.amount_due, dec!(19.00));
    }
}
