//! Service layer - maintenance use cases.

mod backend_cleanup;

pub use backend_cleanup::{BackendCleanup, BackendCleanupService};
