//! Database migrations.
//!
//! Each migration is a separate module following SeaORM conventions.
//! Migration names follow the pattern: m{YYYYMMDD}_{NNNNNN}_{description}

use sea_orm_migration::prelude::*;

mod m20160901_000001_create_core_tables;
mod m20160901_000002_populate_default_rows;
mod m20160915_000001_drop_indices_on_tree_columns_of_snapshots;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20160901_000001_create_core_tables::Migration),
            Box::new(m20160901_000002_populate_default_rows::Migration),
            Box::new(m20160915_000001_drop_indices_on_tree_columns_of_snapshots::Migration),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_listed_in_version_order() {
        let names: Vec<String> = Migrator::migrations()
            .iter()
            .map(|m| m.name().to_string())
            .collect();

        assert_eq!(
            names,
            [
                "m20160901_000001_create_core_tables",
                "m20160901_000002_populate_default_rows",
                "m20160915_000001_drop_indices_on_tree_columns_of_snapshots",
            ]
        );
    }
}
