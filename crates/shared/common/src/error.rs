//! Unified error handling.
//!
//! Provides a single error type that can be converted to an Axum HTTP
//! response for the admin surface and reported by the CLI.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::DomainError;
use serde::Serialize;
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication
    #[error("Authentication required")]
    Unauthorized,

    // Resource errors
    #[error("Resource not found")]
    NotFound,

    // Validation
    #[error("{0}")]
    Validation(String),

    // External service errors
    #[cfg(feature = "database")]
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    #[cfg(feature = "search")]
    #[error("Search index error")]
    Search(#[from] reqwest::Error),

    #[error("Search index error: {0}")]
    SearchIndex(String),

    /// A maintenance routine failed; `source` is the original cause
    #[error("{message}")]
    Operation {
        message: String,
        #[source]
        source: Box<AppError>,
    },

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body for HTTP
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::NotFound => "NOT_FOUND",
            AppError::Validation(_) => "VALIDATION_ERROR",
            #[cfg(feature = "database")]
            AppError::Database(_) => "DATABASE_ERROR",
            #[cfg(feature = "search")]
            AppError::Search(_) => "SEARCH_ERROR",
            AppError::SearchIndex(_) => "SEARCH_ERROR",
            AppError::Operation { .. } => "OPERATION_FAILED",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            #[cfg(feature = "search")]
            AppError::Search(_) => StatusCode::BAD_GATEWAY,
            AppError::SearchIndex(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),

            // The routine name is safe to show, its cause is only logged
            AppError::Operation { message, source } => {
                tracing::error!("{}: {}", message, source.chain());
                message.clone()
            }
            #[cfg(feature = "database")]
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            #[cfg(feature = "search")]
            AppError::Search(e) => {
                tracing::error!("Search error: {:?}", e);
                "A search index error occurred".to_string()
            }
            AppError::SearchIndex(msg) => {
                tracing::error!("Search index error: {}", msg);
                "A search index error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            // Use default message for others
            _ => self.to_string(),
        }
    }

    /// Render this error and all of its causes, outermost first.
    pub fn chain(&self) -> String {
        let mut out = self.detail();
        let mut current: Option<&(dyn std::error::Error + 'static)> = std::error::Error::source(self);
        while let Some(cause) = current {
            out.push_str(": ");
            // Nested causes are stored boxed
            let app = cause
                .downcast_ref::<Box<AppError>>()
                .map(|boxed| &**boxed)
                .or_else(|| cause.downcast_ref::<AppError>());
            match app {
                Some(app) => out.push_str(&app.detail()),
                None => out.push_str(&cause.to_string()),
            }
            current = cause.source();
        }
        out
    }

    /// Display text including the payload of opaque variants.
    fn detail(&self) -> String {
        match self {
            AppError::Internal(msg) => format!("Internal server error: {}", msg),
            _ => self.to_string(),
        }
    }
}

// =============================================================================
// HTTP Response (Axum)
// =============================================================================

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
            },
        };

        (status, Json(body)).into_response()
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => AppError::Validation(msg),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait wrapping a failure into an [`AppError::Operation`].
pub trait ResultExt<T> {
    fn context(self, message: impl Into<String>) -> AppResult<T>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<AppError>,
{
    fn context(self, message: impl Into<String>) -> AppResult<T> {
        self.map_err(|e| AppError::operation(message, e))
    }
}

/// Convenience constructors
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    pub fn search_index(msg: impl Into<String>) -> Self {
        AppError::SearchIndex(msg.into())
    }

    pub fn operation(message: impl Into<String>, source: impl Into<AppError>) -> Self {
        AppError::Operation {
            message: message.into(),
            source: Box::new(source.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_wraps_the_original_error() {
        let result: AppResult<()> = Err(AppError::search_index("boom"));
        let err = result.context("Unable to clear indexes").unwrap_err();

        assert_eq!(err.to_string(), "Unable to clear indexes");
        match &err {
            AppError::Operation { source, .. } => {
                assert!(matches!(**source, AppError::SearchIndex(_)))
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn chain_lists_every_cause() {
        let err = AppError::operation(
            "Fail to reset data",
            AppError::operation("Fail to remove manual rules", AppError::internal("disk full")),
        );

        assert_eq!(
            err.chain(),
            "Fail to reset data: Fail to remove manual rules: Internal server error: disk full"
        );
    }

    #[test]
    fn chain_keeps_internal_detail_at_the_top() {
        assert_eq!(
            AppError::internal("disk full").chain(),
            "Internal server error: disk full"
        );
    }

    #[test]
    fn domain_validation_becomes_bad_request() {
        let err: AppError = DomainError::validation("bad index").into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert_eq!(err.user_message(), "bad index");
    }

    #[test]
    fn operation_is_a_server_error_showing_only_its_message() {
        let err = AppError::operation("Fail to clear db", AppError::internal("secret detail"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "OPERATION_FAILED");
        assert_eq!(err.user_message(), "Fail to clear db");
    }

    #[test]
    fn search_failures_are_bad_gateway() {
        assert_eq!(
            AppError::search_index("503").status(),
            StatusCode::BAD_GATEWAY
        );
    }
}
