//! # ansi-nist
//!
//! A reader and writer for ANSI/NIST-ITL biometric interchange transactions:
//! the multi-record files used to exchange fingerprint, palm, facial, iris
//! and related data between agencies.
//!
//! Supports record types 1 through 17 (11 and 12 are reserved), in both the
//! delimited-text and the fixed-offset binary encodings. Binary payloads
//! are carried as opaque bytes; no image or minutiae content is interpreted.
pub mod nist;

// Re-export the main types for convenience
pub use nist::{
    NistError, NistReader, NistWriter, ReadOptions, Result,
    format::image::{ImageInfo, ImageInspector, attach_image},
    types::{
        contents::{ContentEntry, TableOfContents},
        file::NistFile,
        models::{Field, Record},
    },
};
