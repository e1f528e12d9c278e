//! Application state for dependency injection.

use std::sync::Arc;

use crate::config::PlatformConfig;
use crate::infra::SearchIndex;
use crate::repository::CleanupRepository;
use crate::service::BackendCleanupService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub cleanup: Arc<dyn BackendCleanupService>,
    pub repo: Arc<dyn CleanupRepository>,
    pub search: Arc<dyn SearchIndex>,
    pub config: PlatformConfig,
}

impl AppState {
    /// Create new app state.
    pub fn new(
        cleanup: Arc<dyn BackendCleanupService>,
        repo: Arc<dyn CleanupRepository>,
        search: Arc<dyn SearchIndex>,
        config: PlatformConfig,
    ) -> Self {
        Self {
            cleanup,
            repo,
            search,
            config,
        }
    }
}
