pub mod limits;
pub mod plan;
pub mod proration;

pub use limits::{evaluate_limit, LimitDecision};
pub use plan::{catalog, PlanCode, PlanInfo};
pub use proration::{quote, quote_at, ProrationQuote};
