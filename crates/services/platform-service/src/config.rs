//! Platform service configuration.

use std::env;

use common::{DatabaseConfig, SearchConfig, ServiceConfig};

/// Platform service configuration.
#[derive(Clone)]
pub struct PlatformConfig {
    /// Relational store holding the platform tables
    pub database: DatabaseConfig,
    /// Search node holding the platform indices
    pub search: SearchConfig,
    /// Admin HTTP listener and logging
    pub service: ServiceConfig,
    /// Token required on admin routes (routes are open when unset)
    admin_token: Option<String>,
}

impl std::fmt::Debug for PlatformConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatformConfig")
            .field("database", &self.database)
            .field("search", &self.search)
            .field("service", &self.service)
            .field("admin_token", &self.admin_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl PlatformConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database_defaults = DatabaseConfig::default();
        let search_defaults = SearchConfig::default();
        let service_defaults = ServiceConfig::default();

        Self {
            database: DatabaseConfig {
                url: env::var("PLATFORM_DATABASE_URL")
                    .or_else(|_| env::var("DATABASE_URL"))
                    .unwrap_or(database_defaults.url),
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(database_defaults.max_connections),
                min_connections: env::var("DATABASE_MIN_CONNECTIONS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(database_defaults.min_connections),
            },
            search: SearchConfig {
                url: env::var("SEARCH_URL").unwrap_or(search_defaults.url),
                request_timeout_ms: env::var("SEARCH_REQUEST_TIMEOUT_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(search_defaults.request_timeout_ms),
            },
            service: ServiceConfig {
                service_name: "platform-service".to_string(),
                host: env::var("PLATFORM_HOST").unwrap_or(service_defaults.host),
                port: env::var("PLATFORM_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(service_defaults.port),
                log_level: env::var("LOG_LEVEL").unwrap_or(service_defaults.log_level),
            },
            admin_token: env::var("PLATFORM_ADMIN_TOKEN")
                .ok()
                .filter(|t| !t.is_empty()),
        }
    }

    /// Token expected in the `X-Admin-Token` header, if any.
    pub fn admin_token(&self) -> Option<&str> {
        self.admin_token.as_deref()
    }

    /// Require the given token on admin routes.
    pub fn with_admin_token(mut self, token: impl Into<String>) -> Self {
        self.admin_token = Some(token.into());
        self
    }
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            search: SearchConfig::default(),
            service: ServiceConfig {
                service_name: "platform-service".to_string(),
                ..ServiceConfig::default()
            },
            admin_token: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_open_admin_routes() {
        let config = PlatformConfig::default();
        assert_eq!(config.admin_token(), None);
        assert_eq!(config.service.service_name, "platform-service");
    }

    #[test]
    fn debug_output_hides_admin_token() {
        let config = PlatformConfig::default().with_admin_token("s3cret");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("s3cret"));
        assert_eq!(config.admin_token(), Some("s3cret"));
    }
}
