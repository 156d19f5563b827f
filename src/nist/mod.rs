//! Core ANSI/NIST-ITL codec module.
//!
//! # Architecture
//!
//! ```text
//! File Structure:
//! ┌──────────────────────┐
//! │  Type-1 transaction  │ ← format::tagged, always first
//! │  (CNT = contents)    │
//! ├──────────────────────┤
//! │  Record (CNT #1)     │ ← handler chosen from the record-type catalog
//! ├──────────────────────┤
//! │  Record (CNT #2)     │
//! │  ...                 │
//! └──────────────────────┘
//! ```

pub mod codec;
pub mod format;
pub mod reader;
pub mod types;
pub mod utils;
pub mod writer;

pub use reader::{NistReader, ReadOptions};
pub use types::error::{NistError, Result};
pub use writer::NistWriter;
