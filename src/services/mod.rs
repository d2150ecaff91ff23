pub mod billing_service;
pub mod usage_service;

pub use billing_service::{BillingService, BillingError};
pub use usage_service::UsageService;
