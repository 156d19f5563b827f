//! Record handlers, one per wire encoding.
//!
//! # Module Organization
//!
//! - [`tagged`]: delimited-text records (`type.field:value`)
//! - [`binary`]: fixed-offset binary records
//! - [`image`]: delimited-text records with a trailing image
//!
//! Dispatch is by [`HandlerKind`], looked up from the record-type catalog.

pub mod binary;
pub mod image;
pub mod tagged;

use crate::nist::codec::token::{Emitter, Token};
use crate::nist::types::error::Result;
use crate::nist::types::models::Record;
use crate::nist::types::record_types::HandlerKind;

/// Reads one record of `record_type` at the cursor.
pub fn read_record(kind: HandlerKind, record_type: u32, token: &mut Token<'_>) -> Result<Record> {
    match kind {
        HandlerKind::Tagged => tagged::read(token, record_type),
        HandlerKind::TaggedImage(_) => image::read(token, record_type),
        HandlerKind::Binary(layout) => binary::read(token, record_type, layout),
    }
}

/// Appends one record to the emitter.
pub fn write_record(kind: HandlerKind, emitter: &mut Emitter, record: &Record) -> Result<()> {
    match kind {
        HandlerKind::Tagged => tagged::write(emitter, record),
        HandlerKind::TaggedImage(_) => image::write(emitter, record),
        HandlerKind::Binary(layout) => binary::write(emitter, record, layout),
    }
}
