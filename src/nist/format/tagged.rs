//! Delimited-text records.
//!
//! ```text
//! T.001:LEN<GS>T.002:IDC<GS> ... <GS>T.NNN:value<FS>
//! T.001:LEN<GS> ... <GS>T.999:<raw image bytes><FS>
//! ```
//!
//! Field 999 is copied verbatim: its size comes from the declared length,
//! since image bytes may contain separator values.

use std::collections::BTreeMap;

use log::{debug, trace, warn};

use crate::nist::codec::separators::{self, FIELD_NUMBER_WIDTH, FS, GS};
use crate::nist::codec::token::{Emitter, Token};
use crate::nist::types::error::{NistError, Result};
use crate::nist::types::models::{Field, Record};
use crate::nist::types::record_types::{TAGGED_PAYLOAD_FIELD, TRANSACTION};
use crate::nist::types::transaction::CHARSET_FIELD;

const MAX_FIELD_ID: u32 = 10u32.pow(FIELD_NUMBER_WIDTH as u32) - 1;

/// Reads one tagged record of `record_type` starting at the cursor.
pub fn read(token: &mut Token<'_>, record_type: u32) -> Result<Record> {
    let start = token.position();
    let mut fields = BTreeMap::new();
    let mut declared_length: Option<String> = None;

    loop {
        let tag = separators::read_tag(token)?;
        if tag.record_type != record_type {
            return Err(NistError::UnexpectedTagType {
                expected: record_type,
                found: tag.record_type,
            });
        }

        if tag.field_id == TAGGED_PAYLOAD_FIELD {
            let payload = read_payload(token, record_type, start, declared_length.as_deref())?;
            trace!("{}.{:03}: {} payload bytes", record_type, tag.field_id, payload.len());
            fields.insert(tag.field_id, Field::Binary(payload.to_vec()));
            match token.peek() {
                Some(FS) => token.advance(1),
                Some(byte) => warn!(
                    "Type-{} image payload ends at offset {} with 0x{:02X} instead of FS",
                    record_type,
                    token.position(),
                    byte
                ),
                None => warn!(
                    "Type-{} image payload runs to the end of the data without FS",
                    record_type
                ),
            }
            break;
        }

        let remaining = token.remaining();
        let value = token
            .read_delimited_word(&[GS, FS], remaining)
            .map_err(|source| NistError::Decode {
                record_type,
                field_id: tag.field_id,
                source,
            })?;
        trace!("{}.{:03}: {:?}", record_type, tag.field_id, value);

        if declared_length.is_none() {
            declared_length = Some(value.clone());
        }
        if record_type == TRANSACTION && tag.field_id == CHARSET_FIELD {
            token.set_decoder(&value);
        }
        fields.insert(tag.field_id, Field::Text(value));

        match token.peek() {
            Some(GS) => token.advance(1),
            Some(FS) => {
                token.advance(1);
                break;
            }
            _ => {
                return Err(NistError::UnexpectedEof {
                    context: "field separator",
                    offset: token.position(),
                });
            }
        }
    }

    debug!(
        "Read type-{} record: {} fields, {} bytes",
        record_type,
        fields.len(),
        token.position() - start
    );
    Ok(Record::from_fields(record_type, fields))
}

/// Takes the field-999 bytes: whatever the declared length leaves after
/// the bytes consumed so far and the closing FS.
fn read_payload<'a>(
    token: &mut Token<'a>,
    record_type: u32,
    record_start: usize,
    declared_length: Option<&str>,
) -> Result<&'a [u8]> {
    let invalid = || NistError::InvalidRecordLength {
        record_type,
        value: declared_length.unwrap_or_default().to_owned(),
    };
    let declared: usize = declared_length
        .and_then(|len| len.trim().parse().ok())
        .ok_or_else(invalid)?;
    let consumed = token.position() - record_start;
    let size = declared
        .checked_sub(consumed + 1)
        .ok_or_else(invalid)?;
    token.read_bytes(size, "image payload")
}

/// Writes fields in ascending id order, GS-separated and FS-terminated.
pub fn write(emitter: &mut Emitter, record: &Record) -> Result<()> {
    let record_type = record.record_type();
    let start = emitter.position();

    for (i, (field_id, field)) in record.fields().enumerate() {
        if field_id > MAX_FIELD_ID {
            return Err(NistError::InvalidField {
                record_type,
                field_id,
                reason: format!("field number exceeds {}", MAX_FIELD_ID),
            });
        }
        if i > 0 {
            emitter.push(GS);
        }
        separators::write_tag(emitter, record_type, field_id);

        match (field, field_id == TAGGED_PAYLOAD_FIELD) {
            (Field::Text(value), false) => {
                write_text(emitter, record_type, field_id, value)?;
                if record_type == TRANSACTION && field_id == CHARSET_FIELD {
                    emitter.set_encoder(value);
                }
            }
            (Field::Binary(bytes), true) => emitter.write_raw(bytes),
            (Field::Binary(_), false) => {
                return Err(NistError::InvalidField {
                    record_type,
                    field_id,
                    reason: "binary value outside the image payload field".to_string(),
                });
            }
            (Field::Text(_), true) => {
                return Err(NistError::InvalidField {
                    record_type,
                    field_id,
                    reason: "image payload must be binary".to_string(),
                });
            }
        }
    }
    emitter.push(FS);

    debug!(
        "Wrote type-{} record: {} fields, {} bytes",
        record_type,
        record.len(),
        emitter.position() - start
    );
    Ok(())
}

/// Encodes a text value with the active charset.
///
/// The reader splits values on FS and GS bytes, so an encoding that yields
/// either (UTF-16 code units such as U+4E1C, or the control characters
/// themselves) cannot be read back and is refused.
fn write_text(emitter: &mut Emitter, record_type: u32, field_id: u32, value: &str) -> Result<()> {
    let charset = emitter.charset();
    let bytes = charset
        .encode(value, emitter.position())
        .map_err(|err| NistError::Encode {
            record_type,
            field_id,
            charset: err.charset,
        })?;
    if let Some(byte) = bytes.iter().find(|byte| **byte == FS || **byte == GS) {
        return Err(NistError::InvalidField {
            record_type,
            field_id,
            reason: format!(
                "{} encoding contains separator byte 0x{:02X}",
                charset.name(),
                byte
            ),
        });
    }
    emitter.write_raw(&bytes);
    Ok(())
}
