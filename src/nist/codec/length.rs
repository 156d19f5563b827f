//! Record length (`LEN`, field 1) computation.
//!
//! Lengths are byte counts on the wire. Binary records measure header plus
//! payload. Tagged records are self-referential: the length value's own
//! digits are part of the length, so the digit count is solved as a small
//! fixpoint. Text is measured in the charset it will be written with.

use std::collections::BTreeMap;

use crate::nist::codec::charset::Charset;
use crate::nist::types::models::{Field, LENGTH_FIELD};
use crate::nist::types::record_types::TRANSACTION;
use crate::nist::types::transaction::CHARSET_FIELD;

/// `".001:"`, the part of a length tag after the record type digits.
const LENGTH_TAG_SUFFIX_LEN: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthStrategy {
    /// Delimited-text record: tags, values and separators.
    Tagged,
    /// Fixed-offset binary record: header followed by one payload field.
    Binary {
        header_size: usize,
        payload_field: u32,
    },
}

/// Computes the value of field 1 for a record.
///
/// `charset` is the charset in effect where the record starts. The
/// transaction record always starts in the default charset.
pub fn calculate(
    strategy: LengthStrategy,
    record_type: u32,
    fields: &BTreeMap<u32, Field>,
    charset: Charset,
) -> usize {
    match strategy {
        LengthStrategy::Tagged => tagged_length(record_type, fields, charset),
        LengthStrategy::Binary {
            header_size,
            payload_field,
        } => header_size + fields.get(&payload_field).map_or(0, Field::byte_or_char_len),
    }
}

/// Per-field overhead: leading separator, record type digits, `.NNN:`.
pub fn tag_overhead(record_type: u32) -> usize {
    1 + decimal_digits(record_type as usize) + LENGTH_TAG_SUFFIX_LEN
}

/// Total encoded length of a tagged record, including field 1 itself.
pub fn tagged_length(record_type: u32, fields: &BTreeMap<u32, Field>, charset: Charset) -> usize {
    let start = if record_type == TRANSACTION {
        Charset::default()
    } else {
        charset
    };
    let overhead = tag_overhead(record_type);

    let mut active = start;
    let mut sum = 0;
    for (&field_id, field) in fields {
        if field_id != LENGTH_FIELD {
            sum += encoded_len(field, active) + overhead;
        }
        // Fields after DCS are written in the charset it selects.
        if record_type == TRANSACTION && field_id == CHARSET_FIELD {
            if let Field::Text(selector) = field {
                active = Charset::from_selector(selector);
            }
        }
    }

    let digit_width = start.encoded_len("0");
    let digits = decimal_digits(sum);
    let total = sum + digits * digit_width + overhead;
    // The length's own digits can push the total over a power of ten.
    if decimal_digits(total) > digits {
        total + digit_width
    } else {
        total
    }
}

fn encoded_len(field: &Field, charset: Charset) -> usize {
    match field {
        Field::Text(text) => charset.encoded_len(text),
        Field::Binary(bytes) => bytes.len(),
    }
}

pub fn decimal_digits(mut value: usize) -> usize {
    let mut digits = 1;
    while value >= 10 {
        value /= 10;
        digits += 1;
    }
    digits
}
