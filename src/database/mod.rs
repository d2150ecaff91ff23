pub mod models;
pub mod pool;

pub use pool::{connect, connect_lazy, health_check, PoolError};
