pub mod auth;
pub mod require_role;
pub mod response;
pub mod tenant_gate;

pub use auth::{require_auth, AuthUser};
pub use require_role::require_super_admin;
pub use response::{ApiResponse, ApiResult};
pub use tenant_gate::{with_profile, with_tenant, ProfileContext, TenantContext};
