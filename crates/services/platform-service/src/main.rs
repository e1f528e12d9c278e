//! Platform Service - backend maintenance CLI and admin HTTP server.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use platform_service_lib::{config::PlatformConfig, CleanupAction, MigrateAction};

#[derive(Parser)]
#[command(name = "platform-service")]
#[command(about = "Platform backend maintenance")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the admin HTTP server
    Serve {
        /// Listen address (defaults to PLATFORM_HOST)
        #[arg(long)]
        host: Option<String>,
        /// Listen port (defaults to PLATFORM_PORT)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Database migration commands
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },
    /// Bring the database and the search indices back to a known state
    Cleanup {
        #[command(subcommand)]
        action: CleanupCommands,
    },
}

#[derive(Subcommand)]
enum MigrateCommands {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

#[derive(Subcommand)]
enum CleanupCommands {
    /// Clear every table and every index
    All,
    /// Clear every table, keeping the default rows
    Db,
    /// Clear every search index
    Indexes,
    /// Remove analysis data only
    Reset,
    /// Delete every document of one index
    Index {
        /// Index name
        name: String,
    },
}

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Serve { host, port } => platform_service_lib::run_embedded(host, port).await,
        Commands::Migrate { action } => {
            let migrate_action = match action {
                MigrateCommands::Up => MigrateAction::Up,
                MigrateCommands::Down => MigrateAction::Down,
                MigrateCommands::Status => MigrateAction::Status,
                MigrateCommands::Fresh => MigrateAction::Fresh,
            };
            platform_service_lib::run_migrations(migrate_action).await
        }
        Commands::Cleanup { action } => {
            let cleanup_action = match action {
                CleanupCommands::All => CleanupAction::All,
                CleanupCommands::Db => CleanupAction::Db,
                CleanupCommands::Indexes => CleanupAction::Indexes,
                CleanupCommands::Reset => CleanupAction::Reset,
                CleanupCommands::Index { name } => CleanupAction::Index(name),
            };
            platform_service_lib::run_cleanup(cleanup_action).await
        }
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {}", e.chain());
        std::process::exit(1);
    }
}

/// Initialize tracing subscriber (verbose mode sets debug level)
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| PlatformConfig::from_env().service.log_level)
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
