//! Migration: Create the platform tables.

use domain::tables::TABLES;
use domain::{
    COLUMN_KEE, COLUMN_LOGIN, COLUMN_PLUGIN_NAME, COLUMN_RESOURCE_ID, TABLE_INTERNAL_PROPERTIES,
    TABLE_MIGRATION_HISTORY, TABLE_ORGANIZATIONS, TABLE_RULES, TABLE_SNAPSHOTS, TABLE_USERS,
};
use sea_orm_migration::prelude::*;

use super::m20160915_000001_drop_indices_on_tree_columns_of_snapshots::{Snapshots, TREE_INDICES};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in owned_tables() {
            manager.create_table(table_definition(table)).await?;
        }

        for (name, column) in TREE_INDICES {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(Snapshots::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in owned_tables().rev() {
            manager
                .drop_table(Table::drop().table(Alias::new(table)).if_exists().to_owned())
                .await?;
        }
        Ok(())
    }
}

/// Catalog tables created here (the history table belongs to the migrator).
fn owned_tables() -> impl DoubleEndedIterator<Item = &'static str> {
    TABLES
        .iter()
        .copied()
        .filter(|table| *table != TABLE_MIGRATION_HISTORY)
}

fn table_definition(name: &str) -> TableCreateStatement {
    let mut table = Table::create();
    table.table(Alias::new(name)).if_not_exists().col(
        ColumnDef::new(Alias::new("id"))
            .big_integer()
            .not_null()
            .auto_increment()
            .primary_key(),
    );

    for mut column in extra_columns(name) {
        table.col(&mut column);
    }

    table.to_owned()
}

/// Columns beyond the `id` key. Tables the maintenance routines filter on
/// carry the filtered columns; the others only record a creation time.
fn extra_columns(table: &str) -> Vec<ColumnDef> {
    match table {
        TABLE_ORGANIZATIONS => vec![
            string_col("uuid", 40).unique_key().to_owned(),
            string_col(COLUMN_KEE, 32).unique_key().to_owned(),
            string_col("name", 64),
            created_at(),
        ],
        TABLE_USERS => vec![
            string_col(COLUMN_LOGIN, 255).unique_key().to_owned(),
            ColumnDef::new(Alias::new("name")).string_len(200).null().to_owned(),
            ColumnDef::new(Alias::new("active"))
                .boolean()
                .not_null()
                .default(true)
                .to_owned(),
            created_at(),
        ],
        TABLE_INTERNAL_PROPERTIES => vec![
            string_col(COLUMN_KEE, 20).unique_key().to_owned(),
            ColumnDef::new(Alias::new("text_value")).text().null().to_owned(),
            created_at(),
        ],
        "properties" => vec![
            string_col("prop_key", 512),
            resource_id(),
            ColumnDef::new(Alias::new("user_id")).big_integer().null().to_owned(),
            ColumnDef::new(Alias::new("text_value")).text().null().to_owned(),
        ],
        "group_roles" => vec![
            ColumnDef::new(Alias::new("group_id")).big_integer().null().to_owned(),
            resource_id(),
            string_col("role", 64),
        ],
        "user_roles" => vec![
            ColumnDef::new(Alias::new("user_id")).big_integer().null().to_owned(),
            resource_id(),
            string_col("role", 64),
        ],
        TABLE_RULES => vec![
            string_col("plugin_rule_key", 200),
            string_col(COLUMN_PLUGIN_NAME, 255),
            ColumnDef::new(Alias::new("name")).string_len(200).null().to_owned(),
            created_at(),
        ],
        TABLE_SNAPSHOTS => vec![
            string_col("component_uuid", 50),
            string_col("root_component_uuid", 50),
            ColumnDef::new(Snapshots::RootSnapshotId).big_integer().null().to_owned(),
            ColumnDef::new(Snapshots::ParentSnapshotId).big_integer().null().to_owned(),
            ColumnDef::new(Snapshots::Qualifier).string_len(10).null().to_owned(),
            created_at(),
        ],
        _ => vec![created_at()],
    }
}

fn string_col(name: &str, len: u32) -> ColumnDef {
    ColumnDef::new(Alias::new(name))
        .string_len(len)
        .not_null()
        .to_owned()
}

fn resource_id() -> ColumnDef {
    ColumnDef::new(Alias::new(COLUMN_RESOURCE_ID))
        .big_integer()
        .null()
        .to_owned()
}

fn created_at() -> ColumnDef {
    ColumnDef::new(Alias::new("created_at"))
        .big_integer()
        .null()
        .to_owned()
}
