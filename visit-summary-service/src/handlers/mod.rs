//! HTTP handlers for the visit summary service.

pub mod health;
pub mod hello;
pub mod summary;

pub use health::{health_check, metrics_endpoint, not_found, readiness_check};
pub use hello::hello;
pub use summary::generate_day_summary;
