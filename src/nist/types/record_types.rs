//! Record-type catalog: which handler encodes each numeric record type.
//!
//! The catalog is a static table, read-only for the whole process, so
//! concurrent lookups need no synchronisation.

use crate::nist::codec::length::LengthStrategy;
use crate::nist::types::error::{NistError, Result};

/// Record type of the transaction information record.
pub const TRANSACTION: u32 = 1;

/// Highest record type in the catalogued range.
pub const MAX_CATALOGUED: u32 = 17;

/// Field id holding raw image bytes in delimited-text records.
pub const TAGGED_PAYLOAD_FIELD: u32 = 999;

/// A fixed-width field inside a binary record header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryField {
    pub field_id: u32,
    pub width: usize,
}

const fn bf(field_id: u32, width: usize) -> BinaryField {
    BinaryField { field_id, width }
}

/// Byte layout of a fixed-offset binary record.
///
/// Header fields are laid out back to back in the listed order, the first
/// being the 4-byte record length; the payload follows the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryLayout {
    pub fields: &'static [BinaryField],
    pub payload_field: u32,
}

impl BinaryLayout {
    pub const fn header_size(&self) -> usize {
        let mut total = 0;
        let mut i = 0;
        while i < self.fields.len() {
            total += self.fields[i].width;
            i += 1;
        }
        total
    }
}

/// LEN IDC IMP FGP ISR HLL VLL GCA, then image data.
pub static FINGER_LAYOUT: BinaryLayout = BinaryLayout {
    fields: &[
        bf(1, 4),
        bf(2, 1),
        bf(3, 1),
        bf(4, 6),
        bf(5, 1),
        bf(6, 2),
        bf(7, 2),
        bf(8, 1),
    ],
    payload_field: 9,
};

/// LEN IDC SIG SRT ISR HLL VLL, then signature data.
pub static SIGNATURE_LAYOUT: BinaryLayout = BinaryLayout {
    fields: &[bf(1, 4), bf(2, 1), bf(3, 1), bf(4, 1), bf(5, 1), bf(6, 2), bf(7, 2)],
    payload_field: 8,
};

pub static USER_DEFINED_IMAGE_LAYOUT: BinaryLayout = BinaryLayout {
    fields: &[bf(1, 4), bf(2, 1)],
    payload_field: 3,
};

/// Field ids that receive image metadata in delimited-text image records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageFields {
    pub width: u32,
    pub height: u32,
    pub scale_units: u32,
    pub horizontal_scale: u32,
    pub vertical_scale: u32,
    pub compression: u32,
    pub color_space: Option<u32>,
}

const FACIAL_IMAGE_FIELDS: ImageFields = ImageFields {
    width: 6,
    height: 7,
    scale_units: 8,
    horizontal_scale: 9,
    vertical_scale: 10,
    compression: 11,
    color_space: Some(12),
};

const FRICTION_RIDGE_IMAGE_FIELDS: ImageFields = ImageFields {
    width: 6,
    height: 7,
    scale_units: 8,
    horizontal_scale: 9,
    vertical_scale: 10,
    compression: 11,
    color_space: None,
};

const IRIS_IMAGE_FIELDS: ImageFields = ImageFields {
    color_space: Some(13),
    ..FRICTION_RIDGE_IMAGE_FIELDS
};

/// How a record type is laid out on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerKind {
    /// `type.field:value` pairs separated by GS, terminated by FS.
    Tagged,
    /// Fixed binary header followed by a payload.
    Binary(&'static BinaryLayout),
    /// Tagged record whose field 999 carries an image described by sibling fields.
    TaggedImage(&'static ImageFields),
}

impl HandlerKind {
    pub fn length_strategy(&self) -> LengthStrategy {
        match self {
            HandlerKind::Tagged | HandlerKind::TaggedImage(_) => LengthStrategy::Tagged,
            HandlerKind::Binary(layout) => LengthStrategy::Binary {
                header_size: layout.header_size(),
                payload_field: layout.payload_field,
            },
        }
    }
}

/// One catalog entry.
#[derive(Debug, Clone, Copy)]
pub struct RecordType {
    pub id: u32,
    pub label: &'static str,
    pub handler: Option<HandlerKind>,
}

const fn entry(id: u32, label: &'static str, handler: Option<HandlerKind>) -> RecordType {
    RecordType { id, label, handler }
}

static CATALOG: [RecordType; MAX_CATALOGUED as usize] = [
    entry(1, "Transaction information", Some(HandlerKind::Tagged)),
    entry(2, "User-defined descriptive text", Some(HandlerKind::Tagged)),
    entry(3, "Low-resolution grayscale fingerprint image", Some(HandlerKind::Binary(&FINGER_LAYOUT))),
    entry(4, "High-resolution grayscale fingerprint image", Some(HandlerKind::Binary(&FINGER_LAYOUT))),
    entry(5, "Low-resolution binary fingerprint image", Some(HandlerKind::Binary(&FINGER_LAYOUT))),
    entry(6, "High-resolution binary fingerprint image", Some(HandlerKind::Binary(&FINGER_LAYOUT))),
    entry(7, "User-defined image", Some(HandlerKind::Binary(&USER_DEFINED_IMAGE_LAYOUT))),
    entry(8, "Signature image", Some(HandlerKind::Binary(&SIGNATURE_LAYOUT))),
    entry(9, "Minutiae data", Some(HandlerKind::Tagged)),
    entry(10, "Facial and SMT image", Some(HandlerKind::TaggedImage(&FACIAL_IMAGE_FIELDS))),
    entry(11, "Reserved", None),
    entry(12, "Reserved", None),
    entry(13, "Variable-resolution latent image", Some(HandlerKind::TaggedImage(&FRICTION_RIDGE_IMAGE_FIELDS))),
    entry(14, "Variable-resolution fingerprint image", Some(HandlerKind::TaggedImage(&FRICTION_RIDGE_IMAGE_FIELDS))),
    entry(15, "Variable-resolution palmprint image", Some(HandlerKind::TaggedImage(&FRICTION_RIDGE_IMAGE_FIELDS))),
    entry(16, "User-defined variable-resolution testing image", Some(HandlerKind::TaggedImage(&FRICTION_RIDGE_IMAGE_FIELDS))),
    entry(17, "Iris image", Some(HandlerKind::TaggedImage(&IRIS_IMAGE_FIELDS))),
];

/// Catalog entry for a record type, `None` outside the catalogued range.
pub fn lookup(id: u32) -> Option<&'static RecordType> {
    match id {
        1..=MAX_CATALOGUED => CATALOG.get(id as usize - 1),
        _ => None,
    }
}

/// Display label for a record type.
pub fn label(id: u32) -> &'static str {
    lookup(id).map(|record_type| record_type.label).unwrap_or("Unknown")
}

/// Resolves the handler for a record type.
///
/// - `Ok(Some(_))`: catalogued and registered
/// - `Ok(None)`: outside the catalogued range (callers may skip it)
/// - `Err(UnsupportedRecordType)`: catalogued but no handler registered
pub fn handler(id: u32) -> Result<Option<HandlerKind>> {
    match lookup(id) {
        Some(record_type) => record_type
            .handler
            .map(Some)
            .ok_or(NistError::UnsupportedRecordType(id)),
        None => Ok(None),
    }
}
