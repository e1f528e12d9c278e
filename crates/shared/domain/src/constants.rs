//! Domain-level constants.
//!
//! Table and column names, sentinel keys and search index names shared by the
//! schema migrations and the cleanup routines.

// =============================================================================
// Sentinel rows
// =============================================================================

/// Key of the organization every installation starts with
pub const DEFAULT_ORGANIZATION_KEY: &str = "default-organization";

/// Display name of the default organization
pub const DEFAULT_ORGANIZATION_NAME: &str = "Default Organization";

/// Login of the administrator account created at install time
pub const ADMIN_LOGIN: &str = "admin";

/// Internal property holding the uuid of the default organization
pub const INTERNAL_PROPERTY_DEFAULT_ORGANIZATION: &str = "organization.default";

// =============================================================================
// Tables
// =============================================================================

pub const TABLE_ORGANIZATIONS: &str = "organizations";
pub const TABLE_USERS: &str = "users";
pub const TABLE_INTERNAL_PROPERTIES: &str = "internal_properties";
pub const TABLE_RULES: &str = "rules";
pub const TABLE_SNAPSHOTS: &str = "snapshots";

/// Migration history table maintained by the schema migrator
pub const TABLE_MIGRATION_HISTORY: &str = "seaql_migrations";

// =============================================================================
// Columns
// =============================================================================

pub const COLUMN_KEE: &str = "kee";
pub const COLUMN_LOGIN: &str = "login";
pub const COLUMN_RESOURCE_ID: &str = "resource_id";
pub const COLUMN_PLUGIN_NAME: &str = "plugin_name";

/// Plugin name carried by rules created by hand
pub const MANUAL_RULES_PLUGIN: &str = "manual";

// =============================================================================
// Search indices
// =============================================================================

pub const INDEX_ISSUES: &str = "issues";
pub const INDEX_VIEWS: &str = "views";
pub const INDEX_PROJECT_MEASURES: &str = "projectmeasures";
