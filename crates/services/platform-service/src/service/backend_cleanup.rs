//! Backend cleanup - brings the database and search indices back to the
//! state of a fresh installation without dropping the schema or restarting
//! the server.
//!
//! External test orchestration drives these routines through the admin API;
//! keep their effects stable.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use common::{AppResult, ResultExt};
use domain::indices::RESET_INDICES;
use domain::tables::{INSPECTION_TABLES, RESOURCE_RELATED_TABLES, TABLES};
use domain::{
    cleaner_for, IndexName, TableCleaner, COLUMN_PLUGIN_NAME, COLUMN_RESOURCE_ID,
    MANUAL_RULES_PLUGIN, TABLE_RULES,
};

use crate::infra::SearchIndex;
use crate::repository::CleanupRepository;

/// Backend cleanup trait for dependency injection.
#[async_trait]
pub trait BackendCleanupService: Send + Sync {
    /// Clear every table, then every search index
    async fn clear_all(&self) -> AppResult<()>;

    /// Empty every catalog table, keeping sentinel rows and migration history
    async fn clear_db(&self) -> AppResult<()>;

    /// Delete the documents of every search index
    async fn clear_indexes(&self) -> AppResult<()>;

    /// Remove analysis data, project permissions and manual rules
    async fn reset_data(&self) -> AppResult<()>;

    /// Delete every document of a single index
    async fn clear_index(&self, index: &IndexName) -> AppResult<u64>;
}

/// Concrete implementation over the relational store and the search index.
pub struct BackendCleanup {
    repo: Arc<dyn CleanupRepository>,
    search: Arc<dyn SearchIndex>,
}

impl BackendCleanup {
    pub fn new(repo: Arc<dyn CleanupRepository>, search: Arc<dyn SearchIndex>) -> Self {
        Self { repo, search }
    }

    async fn clean_table(&self, table: &str) -> AppResult<()> {
        match cleaner_for(table) {
            TableCleaner::Truncate => self.repo.truncate(table).await,
            TableCleaner::DeleteExcept { column, keep } => {
                let deleted = self.repo.delete_except(table, column, keep).await?;
                debug!(table, deleted, "Kept {} = '{}'", column, keep);
                Ok(())
            }
            TableCleaner::Keep => {
                debug!(table, "Left untouched");
                Ok(())
            }
        }
    }

    async fn clean_tables(&self) -> AppResult<()> {
        for table in TABLES {
            self.clean_table(table).await?;
        }
        Ok(())
    }

    async fn delete_documents(&self, index: &str) -> AppResult<u64> {
        self.search.delete_all_documents(index).await
    }

    async fn clean_indices(&self) -> AppResult<()> {
        self.search.clear_cache().await?;

        for index in self.search.list_indices().await? {
            self.delete_documents(&index).await?;
        }
        Ok(())
    }

    async fn reset_tables_and_indices(&self) -> AppResult<()> {
        for table in INSPECTION_TABLES {
            self.repo.truncate(table).await?;
        }

        // Step messages below are wrapped again by "Fail to reset data"
        for table in RESOURCE_RELATED_TABLES {
            self.repo
                .delete_where_not_null(table, COLUMN_RESOURCE_ID)
                .await
                .context(format!("Fail to delete table: {}", table))?;
        }

        self.repo
            .delete_where_eq(TABLE_RULES, COLUMN_PLUGIN_NAME, MANUAL_RULES_PLUGIN)
            .await
            .context("Fail to remove manual rules")?;

        for index in RESET_INDICES {
            self.delete_documents(index).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl BackendCleanupService for BackendCleanup {
    async fn clear_all(&self) -> AppResult<()> {
        self.clear_db().await?;
        self.clear_indexes().await
    }

    async fn clear_db(&self) -> AppResult<()> {
        info!("Truncate database tables");
        self.clean_tables().await.context("Fail to clear db")
    }

    async fn clear_indexes(&self) -> AppResult<()> {
        info!("Truncate search indices");
        self.clean_indices().await.context("Unable to clear indexes")
    }

    async fn reset_data(&self) -> AppResult<()> {
        info!("Reset data to fresh installation state");
        self.reset_tables_and_indices()
            .await
            .context("Fail to reset data")
    }

    async fn clear_index(&self, index: &IndexName) -> AppResult<u64> {
        let deleted = self.delete_documents(index.as_str()).await?;
        info!(index = %index, deleted, "Index cleared");
        Ok(deleted)
    }
}
