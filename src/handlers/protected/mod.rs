pub mod athletes;
pub mod auth;
pub mod billing;
