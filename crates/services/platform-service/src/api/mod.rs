//! Admin HTTP surface - exposes the maintenance routines to test orchestration.

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::AppState;
