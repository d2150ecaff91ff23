pub mod change;
pub mod plans;
pub mod subscription;

pub use change::{change_plan, preview_change};
pub use plans::list_plans;
pub use subscription::current_subscription;
