//! Control-byte separators and the `type.field:` tag grammar.
//!
//! From innermost to outermost:
//!
//! ```text
//! US 0x1F  tag type/field split, table-of-contents key/value split
//! RS 0x1E  table-of-contents entries
//! GS 0x1D  fields within a record
//! FS 0x1C  end of record
//! ```

use log::trace;

use crate::nist::codec::token::{Emitter, Token};
use crate::nist::types::error::{NistError, Result};

pub const FS: u8 = 0x1C;
pub const GS: u8 = 0x1D;
pub const RS: u8 = 0x1E;
pub const US: u8 = 0x1F;

/// Upper bound on the digits of either tag component.
pub const MAX_TAG_COMPONENT_WIDTH: usize = 10;

/// Zero-padded width of the field number when writing tags.
pub const FIELD_NUMBER_WIDTH: usize = 3;

/// A parsed `type.field:` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag {
    pub record_type: u32,
    pub field_id: u32,
}

/// Reads a tag at the cursor and leaves the cursor on the first value byte.
pub fn read_tag(token: &mut Token<'_>) -> Result<Tag> {
    let start = token.position();
    if !token.is_within_bounds() {
        return Err(NistError::UnexpectedEof {
            context: "tag",
            offset: start,
        });
    }
    let record_type = read_tag_component(token, b'.', "record type")?;
    let field_id = read_tag_component(token, b':', "field number")?;
    trace!("Tag {}.{:03} at offset {}", record_type, field_id, start);
    Ok(Tag {
        record_type,
        field_id,
    })
}

/// Scans digits up to `stop`, parses them and steps over the stop byte.
fn read_tag_component(token: &mut Token<'_>, stop: u8, component: &str) -> Result<u32> {
    let offset = token.position();
    let digits = token.read_ascii_word(&[stop], MAX_TAG_COMPONENT_WIDTH);
    if token.peek() != Some(stop) {
        return Err(NistError::MalformedTag {
            offset,
            reason: format!("{} not terminated by {:?}", component, stop as char),
        });
    }
    token.advance(1);

    std::str::from_utf8(digits)
        .ok()
        .filter(|text| !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|text| text.parse().ok())
        .ok_or_else(|| NistError::MalformedTag {
            offset,
            reason: format!(
                "{} {:?} is not a number",
                component,
                String::from_utf8_lossy(digits)
            ),
        })
}

/// Writes `type.NNN:` to the emitter.
pub fn write_tag(emitter: &mut Emitter, record_type: u32, field_id: u32) {
    let tag = format!(
        "{}.{:0width$}:",
        record_type,
        field_id,
        width = FIELD_NUMBER_WIDTH
    );
    emitter.write_raw(tag.as_bytes());
}
