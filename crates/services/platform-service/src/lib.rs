//! Platform Service Library
//!
//! Backend maintenance for the platform: the schema migrations of the
//! relational store and the cleanup routines that bring the store and the
//! search indices back to a known state between test runs.
//!
//! Routines are reachable from the CLI and from an admin HTTP surface.

pub mod api;
pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::info;

use common::{AppError, AppResult};
use domain::IndexName;

use crate::api::{create_router, AppState};
use crate::config::PlatformConfig;
use crate::infra::{Database, EsClient};
use crate::repository::CleanupStore;
use crate::service::{BackendCleanup, BackendCleanupService};

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Cleanup routine to run from the command line.
#[derive(Debug, Clone)]
pub enum CleanupAction {
    All,
    Db,
    Indexes,
    Reset,
    Index(String),
}

/// Wired cleanup stack over one database pool.
struct Backend {
    repo: Arc<CleanupStore>,
    search: Arc<EsClient>,
    cleanup: Arc<BackendCleanup>,
}

impl Backend {
    fn open(database: Database, config: &PlatformConfig) -> AppResult<Self> {
        let repo = Arc::new(CleanupStore::new(database.into_connection()));
        let search = Arc::new(EsClient::new(&config.search)?);
        let cleanup = Arc::new(BackendCleanup::new(repo.clone(), search.clone()));
        Ok(Self {
            repo,
            search,
            cleanup,
        })
    }
}

/// Run the admin HTTP server with configuration from the environment.
///
/// `host` and `port` override `PLATFORM_HOST` and `PLATFORM_PORT`.
pub async fn run_embedded(host: Option<String>, port: Option<u16>) -> AppResult<()> {
    let config = PlatformConfig::from_env();
    let host = host.unwrap_or_else(|| config.service.host.clone());
    let port = port.unwrap_or(config.service.port);
    run_server_with_config(&host, port, config).await
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> AppResult<()> {
    let config = PlatformConfig::from_env();
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Run one cleanup routine (for CLI commands).
///
/// Statements run one after another, so the pool holds a single connection.
pub async fn run_cleanup(action: CleanupAction) -> AppResult<()> {
    let config = PlatformConfig::from_env();
    let database = config.database.single_connection();
    let db = Database::connect_without_migrations(&database).await?;
    let backend = Backend::open(db, &config)?;

    match &action {
        CleanupAction::All => backend.cleanup.clear_all().await?,
        CleanupAction::Db => backend.cleanup.clear_db().await?,
        CleanupAction::Indexes => backend.cleanup.clear_indexes().await?,
        CleanupAction::Reset => backend.cleanup.reset_data().await?,
        CleanupAction::Index(name) => {
            let index = IndexName::parse(name.as_str())?;
            let deleted = backend.cleanup.clear_index(&index).await?;
            println!("{} documents deleted from {}", deleted, index);
        }
    }

    info!(?action, "Cleanup finished");
    Ok(())
}

/// Run the HTTP server with the given configuration.
async fn run_server_with_config(host: &str, port: u16, config: PlatformConfig) -> AppResult<()> {
    // Initialize database
    let db = Database::connect(&config.database).await?;
    let backend = Backend::open(db, &config)?;

    if config.admin_token().is_none() {
        tracing::warn!("PLATFORM_ADMIN_TOKEN is not set, maintenance routes are open");
    }

    let state = AppState::new(backend.cleanup, backend.repo, backend.search, config);
    let app = create_router(state).layer(TraceLayer::new_for_http());

    // Build address
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|e| AppError::internal(format!("Invalid listen address: {}", e)))?;
    info!("Platform service listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;
    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}
