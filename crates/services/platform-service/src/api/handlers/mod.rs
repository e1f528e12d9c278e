//! HTTP handlers.

mod health_handler;
mod system_handler;

pub use health_handler::{health_check, health_routes, HealthResponse};
pub use system_handler::{system_routes, ClearIndexResponse};
