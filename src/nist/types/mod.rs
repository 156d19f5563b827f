//! Foundational data structures, error types, and the record-type catalog.

pub mod contents;
pub mod error;
pub mod file;
pub mod models;
pub mod record_types;
pub mod transaction;
