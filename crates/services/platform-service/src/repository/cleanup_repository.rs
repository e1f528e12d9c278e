//! Row removal statements over the platform tables.

use async_trait::async_trait;
use sea_orm::sea_query::{Alias, Expr, Query, Table};
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};

use common::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Cleanup repository trait for dependency injection.
///
/// Table and column names are identifiers from the static table catalog;
/// compared values are always bound as parameters.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CleanupRepository: Send + Sync {
    /// Check that the database answers
    async fn ping(&self) -> AppResult<()>;

    /// Remove every row of a table
    async fn truncate(&self, table: &str) -> AppResult<()>;

    /// Remove every row whose `column` differs from `keep`
    async fn delete_except(&self, table: &str, column: &str, keep: &str) -> AppResult<u64>;

    /// Remove every row whose `column` is set
    async fn delete_where_not_null(&self, table: &str, column: &str) -> AppResult<u64>;

    /// Remove every row whose `column` equals `value`
    async fn delete_where_eq(&self, table: &str, column: &str, value: &str) -> AppResult<u64>;
}

/// SeaORM implementation of CleanupRepository
pub struct CleanupStore {
    db: DatabaseConnection,
}

impl CleanupStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Underlying connection, for reads outside the cleanup statements.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    #[cfg(test)]
    fn into_connection(self) -> DatabaseConnection {
        self.db
    }

    fn backend(&self) -> DatabaseBackend {
        self.db.get_database_backend()
    }

    async fn execute(&self, statement: Statement) -> AppResult<u64> {
        tracing::debug!("{}", statement.sql);
        let result = self.db.execute(statement).await.map_err(AppError::from)?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl CleanupRepository for CleanupStore {
    async fn ping(&self) -> AppResult<()> {
        self.execute(Statement::from_string(self.backend(), "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    async fn truncate(&self, table: &str) -> AppResult<()> {
        let backend = self.backend();
        let table = Alias::new(table.to_lowercase());

        // SQLite has no TRUNCATE
        let statement = match backend {
            DatabaseBackend::Sqlite => backend.build(&Query::delete().from_table(table).to_owned()),
            _ => backend.build(&Table::truncate().table(table).to_owned()),
        };

        self.execute(statement).await?;
        Ok(())
    }

    async fn delete_except(&self, table: &str, column: &str, keep: &str) -> AppResult<u64> {
        let delete = Query::delete()
            .from_table(Alias::new(table))
            .and_where(Expr::col(Alias::new(column)).ne(keep))
            .to_owned();

        self.execute(self.backend().build(&delete)).await
    }

    async fn delete_where_not_null(&self, table: &str, column: &str) -> AppResult<u64> {
        let delete = Query::delete()
            .from_table(Alias::new(table))
            .and_where(Expr::col(Alias::new(column)).is_not_null())
            .to_owned();

        self.execute(self.backend().build(&delete)).await
    }

    async fn delete_where_eq(&self, table: &str, column: &str, value: &str) -> AppResult<u64> {
        let delete = Query::delete()
            .from_table(Alias::new(table))
            .and_where(Expr::col(Alias::new(column)).eq(value))
            .to_owned();

        self.execute(self.backend().build(&delete)).await
    }
}
