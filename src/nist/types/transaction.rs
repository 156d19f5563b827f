//! Field ids and validated setters for the transaction information record.

use crate::nist::codec::charset::Charset;
use crate::nist::codec::check_digit;
use crate::nist::types::error::{NistError, Result};
use crate::nist::types::models::Record;

pub const VERSION_FIELD: u32 = 2;
pub const CONTENT_FIELD: u32 = 3;
pub const TYPE_OF_TRANSACTION_FIELD: u32 = 4;
pub const DATE_FIELD: u32 = 5;
pub const PRIORITY_FIELD: u32 = 6;
pub const DESTINATION_AGENCY_FIELD: u32 = 7;
pub const ORIGINATING_AGENCY_FIELD: u32 = 8;
pub const CONTROL_NUMBER_FIELD: u32 = 9;
pub const CONTROL_REFERENCE_FIELD: u32 = 10;
pub const NATIVE_SCANNING_RESOLUTION_FIELD: u32 = 11;
pub const NOMINAL_TRANSMITTING_RESOLUTION_FIELD: u32 = 12;
pub const DOMAIN_FIELD: u32 = 13;
pub const GREENWICH_MEAN_TIME_FIELD: u32 = 14;
pub const CHARSET_FIELD: u32 = 15;

pub const MIN_PRIORITY: u8 = 1;
pub const MAX_PRIORITY: u8 = 9;

/// Sets PRY (1.006).
pub fn set_priority(record: &mut Record, priority: u8) -> Result<()> {
    if !(MIN_PRIORITY..=MAX_PRIORITY).contains(&priority) {
        return Err(NistError::PriorityOutOfRange(priority));
    }
    record.set_text(PRIORITY_FIELD, priority.to_string());
    Ok(())
}

/// Stores a ten-digit control number with its check character appended.
pub fn set_control_number(record: &mut Record, field_id: u32, digits: &str) -> Result<()> {
    let value = check_digit::with_check_digit(digits)?;
    record.set_text(field_id, value);
    Ok(())
}

/// The charset named by DCS (1.015), legacy when absent.
pub fn charset(record: &Record) -> Charset {
    record
        .text(CHARSET_FIELD)
        .map(Charset::from_selector)
        .unwrap_or_default()
}
