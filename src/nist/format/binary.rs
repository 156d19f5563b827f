//! Fixed-offset binary records (types 3-8).
//!
//! ```text
//! [4 bytes] LEN, big-endian
//! [n bytes] fixed header fields, 1/2/4-byte big-endian numbers or raw bytes
//! [LEN - header] payload
//! ```
//!
//! Numbers are held in the record as decimal text, wider fields (finger
//! positions) as raw bytes. Unset fields are written as all-0xFF.

use std::collections::BTreeMap;

use log::{debug, trace, warn};

use crate::nist::codec::token::{Emitter, Token};
use crate::nist::types::error::{NistError, Result};
use crate::nist::types::models::{Field, LENGTH_FIELD, Record};
use crate::nist::types::record_types::{BinaryField, BinaryLayout};
use crate::nist::utils;

const UNSET: u8 = 0xFF;

pub fn read(token: &mut Token<'_>, record_type: u32, layout: &BinaryLayout) -> Result<Record> {
    let start = token.position();
    let header_size = layout.header_size();
    let mut header = token.read_bytes(header_size, "binary record header")?;

    let mut fields = BTreeMap::new();
    for &BinaryField { field_id, width } in layout.fields {
        let field = if utils::is_number_width(width) {
            Field::Text(utils::read_number(&mut header, width)?.to_string())
        } else {
            let (bytes, rest) = header.split_at(width);
            header = rest;
            Field::Binary(bytes.to_vec())
        };
        trace!("{}.{:03}: {:?}", record_type, field_id, field);
        fields.insert(field_id, field);
    }

    let declared = fields
        .get(&LENGTH_FIELD)
        .and_then(Field::as_text)
        .and_then(|len| len.parse::<usize>().ok())
        .unwrap_or_default();
    let payload_size = declared
        .checked_sub(header_size)
        .ok_or_else(|| NistError::InvalidRecordLength {
            record_type,
            value: declared.to_string(),
        })?;

    let available = token.remaining();
    let payload_size = if payload_size > available {
        warn!(
            "Type-{} record at offset {} declares {} payload bytes but only {} remain; truncating",
            record_type, start, payload_size, available
        );
        available
    } else {
        payload_size
    };
    let payload = token.read_bytes(payload_size, "binary record payload")?;
    fields.insert(layout.payload_field, Field::Binary(payload.to_vec()));

    debug!("Read type-{} record: {} payload bytes", record_type, payload_size);
    Ok(Record::from_fields(record_type, fields))
}

pub fn write(emitter: &mut Emitter, record: &Record, layout: &BinaryLayout) -> Result<()> {
    let record_type = record.record_type();
    let mut header = Vec::with_capacity(layout.header_size());

    for &BinaryField { field_id, width } in layout.fields {
        let invalid = |reason: String| NistError::InvalidField {
            record_type,
            field_id,
            reason,
        };
        match record.field(field_id) {
            None => header.extend(std::iter::repeat_n(UNSET, width)),
            Some(Field::Text(value)) if utils::is_number_width(width) => {
                let number: u64 = value
                    .trim()
                    .parse()
                    .map_err(|_| invalid(format!("{:?} is not a number", value)))?;
                if !utils::write_number(&mut header, width, number)? {
                    return Err(invalid(format!("{} does not fit in {} bytes", number, width)));
                }
            }
            Some(Field::Binary(bytes)) if bytes.len() == width => header.extend_from_slice(bytes),
            Some(field) => {
                return Err(invalid(format!(
                    "{:?} does not fit a {}-byte header field",
                    field, width
                )));
            }
        }
    }
    emitter.write_raw(&header);

    match record.field(layout.payload_field) {
        Some(Field::Binary(payload)) => emitter.write_raw(payload),
        Some(Field::Text(_)) => {
            return Err(NistError::InvalidField {
                record_type,
                field_id: layout.payload_field,
                reason: "image payload must be binary".to_string(),
            });
        }
        None => {}
    }

    debug!("Wrote type-{} record", record_type);
    Ok(())
}
