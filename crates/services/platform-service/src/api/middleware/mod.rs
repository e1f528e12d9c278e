//! Middleware for the admin routes.

mod admin_token;

pub use admin_token::{admin_token_middleware, ADMIN_TOKEN_HEADER};
