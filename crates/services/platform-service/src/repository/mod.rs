//! Repository layer for data access.

mod cleanup_repository;

pub use cleanup_repository::{CleanupRepository, CleanupStore};

#[cfg(any(test, feature = "test-utils"))]
pub use cleanup_repository::MockCleanupRepository;
