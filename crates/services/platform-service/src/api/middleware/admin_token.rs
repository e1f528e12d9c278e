//! Admin token middleware.

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};

use common::AppError;

use crate::api::state::AppState;

/// Header carrying the admin token.
pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Reject requests whose token does not match the configured one.
///
/// Routes stay open when no token is configured (local development).
pub async fn admin_token_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(expected) = state.config.admin_token() {
        let provided = request
            .headers()
            .get(ADMIN_TOKEN_HEADER)
            .and_then(|h| h.to_str().ok());

        if provided != Some(expected) {
            tracing::warn!(path = %request.uri().path(), "Rejected admin request");
            return Err(AppError::Unauthorized);
        }
    }

    Ok(next.run(request).await)
}
