//! Core data structures for ANSI/NIST-ITL records.
//!
//! - [`Field`]: a single text or binary value
//! - [`Record`]: an ordered field map tagged with its numeric record type

use std::collections::BTreeMap;
use std::fmt;

use crate::nist::codec::charset::Charset;
use crate::nist::codec::length;
use crate::nist::types::error::{NistError, Result};
use crate::nist::types::record_types::{self, TRANSACTION};

/// Field id of the record length (`LEN`) in every record.
pub const LENGTH_FIELD: u32 = 1;

/// Field id of the image designation character (`IDC`) in body records.
pub const IDC_FIELD: u32 = 2;

/// A single field value.
///
/// Text values measure their length in characters, binary values in bytes.
#[derive(Clone, PartialEq, Eq)]
pub enum Field {
    Text(String),
    Binary(Vec<u8>),
}

impl Field {
    /// Character count for text, byte count for binary.
    pub fn byte_or_char_len(&self) -> usize {
        match self {
            Field::Text(text) => text.chars().count(),
            Field::Binary(bytes) => bytes.len(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Field::Text(text) => Some(text),
            Field::Binary(_) => None,
        }
    }

    /// Returns a snapshot of the binary payload.
    ///
    /// Every call allocates a fresh copy; the stored buffer is never handed out.
    pub fn binary_data(&self) -> Option<Vec<u8>> {
        match self {
            Field::Binary(bytes) => Some(bytes.clone()),
            Field::Text(_) => None,
        }
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, Field::Binary(_))
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Text(text) => write!(f, "Text({:?})", text),
            Field::Binary(bytes) => write!(f, "Binary({} bytes)", bytes.len()),
        }
    }
}

impl From<&str> for Field {
    fn from(value: &str) -> Self {
        Field::Text(value.to_owned())
    }
}

impl From<String> for Field {
    fn from(value: String) -> Self {
        Field::Text(value)
    }
}

impl From<Vec<u8>> for Field {
    fn from(value: Vec<u8>) -> Self {
        Field::Binary(value)
    }
}

/// One logical record: a numeric record type and its fields in id order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    record_type: u32,
    fields: BTreeMap<u32, Field>,
}

impl Record {
    pub fn new(record_type: u32) -> Self {
        Self {
            record_type,
            fields: BTreeMap::new(),
        }
    }

    pub(crate) fn from_fields(record_type: u32, fields: BTreeMap<u32, Field>) -> Self {
        Self { record_type, fields }
    }

    pub fn record_type(&self) -> u32 {
        self.record_type
    }

    /// Display label from the record-type catalog.
    pub fn label(&self) -> &'static str {
        record_types::label(self.record_type)
    }

    pub fn field(&self, field_id: u32) -> Option<&Field> {
        self.fields.get(&field_id)
    }

    /// Text value of a field, `None` if absent or binary.
    pub fn text(&self, field_id: u32) -> Option<&str> {
        self.fields.get(&field_id).and_then(Field::as_text)
    }

    /// Iterates fields in ascending id order.
    pub fn fields(&self) -> impl Iterator<Item = (u32, &Field)> {
        self.fields.iter().map(|(id, field)| (*id, field))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn set_field(&mut self, field_id: u32, field: impl Into<Field>) -> &mut Self {
        self.fields.insert(field_id, field.into());
        self
    }

    pub fn set_text(&mut self, field_id: u32, value: impl Into<String>) -> &mut Self {
        self.set_field(field_id, Field::Text(value.into()))
    }

    pub fn set_binary(&mut self, field_id: u32, value: impl Into<Vec<u8>>) -> &mut Self {
        self.set_field(field_id, Field::Binary(value.into()))
    }

    pub fn remove_field(&mut self, field_id: u32) -> Option<Field> {
        self.fields.remove(&field_id)
    }

    /// The image designation character of a body record.
    ///
    /// Always `None` for the transaction record, which has no IDC.
    pub fn idc(&self) -> Option<u32> {
        if self.record_type == TRANSACTION {
            return None;
        }
        self.text(IDC_FIELD).and_then(|idc| idc.trim().parse().ok())
    }

    /// The length recorded in field 1, if present and numeric.
    pub fn declared_length(&self) -> Option<usize> {
        self.text(LENGTH_FIELD).and_then(|len| len.trim().parse().ok())
    }

    /// Recomputes field 1 from the current field set, measuring text in
    /// the default charset.
    ///
    /// Call this after the last field edit; the strategy depends on how the
    /// record type is encoded on the wire.
    pub fn update_length(&mut self) -> Result<usize> {
        self.update_length_for(Charset::default())
    }

    /// Recomputes field 1 for a record written under `charset`, the charset
    /// selected by the transaction record's DCS field.
    pub fn update_length_for(&mut self, charset: Charset) -> Result<usize> {
        let kind = record_types::handler(self.record_type)?
            .ok_or(NistError::UnsupportedRecordType(self.record_type))?;
        let total = length::calculate(
            kind.length_strategy(),
            self.record_type,
            &self.fields,
            charset,
        );
        self.fields.insert(LENGTH_FIELD, Field::Text(total.to_string()));
        Ok(total)
    }

    pub(crate) fn field_map(&self) -> &BTreeMap<u32, Field> {
        &self.fields
    }
}
