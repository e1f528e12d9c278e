//! Migration: Drop the indices on the tree columns of `snapshots`.
//!
//! Snapshots are no longer looked up through their position in the
//! component tree, so these indices only slow down analysis inserts.

use sea_orm_migration::prelude::*;

/// Tree indices of `snapshots`, in drop order.
pub(super) const TREE_INDICES: [(&str, Snapshots); 4] = [
    ("snapshots_qualifier", Snapshots::Qualifier),
    ("snapshots_root", Snapshots::RootSnapshotId),
    ("snapshots_parent", Snapshots::ParentSnapshotId),
    ("snapshot_root_component", Snapshots::RootComponentUuid),
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, _) in TREE_INDICES {
            manager
                .drop_index(Index::drop().name(name).table(Snapshots::Table).to_owned())
                .await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
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
}

#[derive(Iden, Clone, Copy)]
pub(super) enum Snapshots {
    Table,
    Qualifier,
    RootSnapshotId,
    ParentSnapshotId,
    RootComponentUuid,
}
