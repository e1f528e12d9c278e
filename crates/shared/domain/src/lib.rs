//! Domain layer - Platform tables, search indices and cleanup rules.
//!
//! This crate contains the static knowledge the maintenance routines run on:
//! which tables exist, how each one is emptied, which rows must survive a
//! reset and which search indices hold documents. It has no infrastructure
//! dependencies.

pub mod constants;
pub mod error;
pub mod indices;
pub mod tables;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use indices::IndexName;
pub use tables::{cleaner_for, TableCleaner};
