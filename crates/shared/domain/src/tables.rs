//! Table catalog and per-table cleanup rules.

use crate::constants::{
    ADMIN_LOGIN, COLUMN_KEE, COLUMN_LOGIN, DEFAULT_ORGANIZATION_KEY,
    INTERNAL_PROPERTY_DEFAULT_ORGANIZATION, TABLE_INTERNAL_PROPERTIES, TABLE_MIGRATION_HISTORY,
    TABLE_ORGANIZATIONS, TABLE_USERS,
};

/// Every table owned by the platform, in the order they are cleaned.
pub const TABLES: &[&str] = &[
    "active_rule_parameters",
    "active_rules",
    "authors",
    "ce_activity",
    "ce_queue",
    "duplications_index",
    "events",
    "file_sources",
    "group_roles",
    "groups",
    "groups_users",
    TABLE_INTERNAL_PROPERTIES,
    "issue_changes",
    "issues",
    "manual_measures",
    "metrics",
    "notifications",
    TABLE_ORGANIZATIONS,
    "permission_templates",
    "project_links",
    "project_measures",
    "projects",
    "properties",
    "resource_index",
    "rules",
    "rules_parameters",
    "rules_profiles",
    TABLE_MIGRATION_HISTORY,
    "snapshots",
    "user_roles",
    "user_tokens",
    TABLE_USERS,
];

/// Tables filled by project analyses, emptied by a data reset.
pub const INSPECTION_TABLES: &[&str] = &[
    "authors",
    "duplications_index",
    "events",
    "issues",
    "issue_changes",
    "manual_measures",
    "notifications",
    "project_links",
    "project_measures",
    "projects",
    "resource_index",
    "snapshots",
    "file_sources",
];

/// Tables mixing global rows and rows attached to a project (`resource_id`).
pub const RESOURCE_RELATED_TABLES: &[&str] = &["group_roles", "user_roles", "properties"];

/// How a table is emptied when the whole database is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableCleaner {
    /// Remove every row
    Truncate,
    /// Remove every row except the one whose `column` equals `keep`
    DeleteExcept {
        column: &'static str,
        keep: &'static str,
    },
    /// Leave the table as is
    Keep,
}

/// Cleanup rule for a table. Tables without a dedicated rule are truncated.
pub fn cleaner_for(table: &str) -> TableCleaner {
    match table {
        // Default organization must never be deleted
        TABLE_ORGANIZATIONS => TableCleaner::DeleteExcept {
            column: COLUMN_KEE,
            keep: DEFAULT_ORGANIZATION_KEY,
        },
        // Administrator must never be deleted
        TABLE_USERS => TableCleaner::DeleteExcept {
            column: COLUMN_LOGIN,
            keep: ADMIN_LOGIN,
        },
        TABLE_INTERNAL_PROPERTIES => TableCleaner::DeleteExcept {
            column: COLUMN_KEE,
            keep: INTERNAL_PROPERTY_DEFAULT_ORGANIZATION,
        },
        // Written by the migrator when the schema is created
        TABLE_MIGRATION_HISTORY => TableCleaner::Keep,
        _ => TableCleaner::Truncate,
    }
}

/// Check whether a table belongs to the catalog.
pub fn is_known_table(table: &str) -> bool {
    TABLES.contains(&table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_tables_keep_their_default_row() {
        assert_eq!(
            cleaner_for("organizations"),
            TableCleaner::DeleteExcept {
                column: "kee",
                keep: "default-organization"
            }
        );
        assert_eq!(
            cleaner_for("users"),
            TableCleaner::DeleteExcept {
                column: "login",
                keep: "admin"
            }
        );
        assert_eq!(
            cleaner_for("internal_properties"),
            TableCleaner::DeleteExcept {
                column: "kee",
                keep: "organization.default"
            }
        );
    }

    #[test]
    fn migration_history_is_left_alone() {
        assert_eq!(cleaner_for("seaql_migrations"), TableCleaner::Keep);
    }

    #[test]
    fn other_tables_are_truncated() {
        assert_eq!(cleaner_for("issues"), TableCleaner::Truncate);
        assert_eq!(cleaner_for("snapshots"), TableCleaner::Truncate);
        assert_eq!(cleaner_for("not_in_catalog"), TableCleaner::Truncate);
    }

    #[test]
    fn special_and_reset_tables_are_in_catalog() {
        for table in [
            TABLE_ORGANIZATIONS,
            TABLE_USERS,
            TABLE_INTERNAL_PROPERTIES,
            TABLE_MIGRATION_HISTORY,
        ] {
            assert!(is_known_table(table), "{} missing from catalog", table);
        }
        for table in INSPECTION_TABLES.iter().chain(RESOURCE_RELATED_TABLES) {
            assert!(is_known_table(table), "{} missing from catalog", table);
        }
    }

    #[test]
    fn catalog_has_no_duplicates() {
        let mut sorted = TABLES.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), TABLES.len());
    }

    #[test]
    fn names_are_lowercase() {
        assert!(TABLES.iter().all(|t| t.chars().all(|c| !c.is_ascii_uppercase())));
    }
}
