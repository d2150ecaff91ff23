pub mod athlete;
pub mod profile;
pub mod subscription;
pub mod tenant;

pub use athlete::Athlete;
pub use profile::Profile;
pub use subscription::Subscription;
pub use tenant::Tenant;
