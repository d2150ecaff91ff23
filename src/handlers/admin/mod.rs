pub mod tenants;

pub use tenants::{create_tenant, list_tenants};
