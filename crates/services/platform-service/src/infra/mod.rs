//! Infrastructure layer - database, migrations and search index client.

mod db;
pub mod migrations;
pub mod search;

pub use db::Database;
pub use migrations::Migrator;
pub use search::{EsClient, SearchIndex};

#[cfg(any(test, feature = "test-utils"))]
pub use search::MockSearchIndex;
