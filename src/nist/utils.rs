//! Low-level fixed-width number I/O for binary record headers.

use std::io::{Read, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::nist::types::error::{NistError, Result};

/// Read a 1, 2 or 4 byte big-endian number.
pub fn read_number(reader: &mut impl Read, number_width: usize) -> Result<u64> {
    match number_width {
        4 => Ok(reader.read_u32::<BigEndian>()? as u64),
        2 => Ok(reader.read_u16::<BigEndian>()? as u64),
        1 => Ok(reader.read_u8()? as u64),
        _ => Err(NistError::InvalidFormat(format!(
            "Invalid number width: {}",
            number_width
        ))),
    }
}

/// Write a 1, 2 or 4 byte big-endian number.
///
/// Returns `false` without writing when the value does not fit the width.
pub fn write_number(writer: &mut impl Write, number_width: usize, value: u64) -> Result<bool> {
    match number_width {
        4 => match u32::try_from(value) {
            Ok(v) => writer.write_u32::<BigEndian>(v)?,
            Err(_) => return Ok(false),
        },
        2 => match u16::try_from(value) {
            Ok(v) => writer.write_u16::<BigEndian>(v)?,
            Err(_) => return Ok(false),
        },
        1 => match u8::try_from(value) {
            Ok(v) => writer.write_u8(v)?,
            Err(_) => return Ok(false),
        },
        _ => {
            return Err(NistError::InvalidFormat(format!(
                "Invalid number width: {}",
                number_width
            )));
        }
    }
    Ok(true)
}

/// Whether a header field of this width holds a number (vs. raw bytes).
pub fn is_number_width(width: usize) -> bool {
    matches!(width, 1 | 2 | 4)
}
