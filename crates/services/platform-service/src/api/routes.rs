//! Route configuration.

use axum::{middleware, Router};

use crate::api::handlers::{health_routes, system_routes};
use crate::api::middleware::admin_token_middleware;
use crate::api::state::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check (no token)
        .nest("/health", health_routes())
        // Maintenance routes (admin token when configured)
        .nest(
            "/api/system",
            system_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                admin_token_middleware,
            )),
        )
        .with_state(state)
}
