//! Custom error types for the ansi-nist crate.

use thiserror::Error;

/// A text span could not be converted by the active character set.
#[derive(Debug, Error)]
#[error("invalid {charset} byte sequence at offset {offset}")]
pub struct CharsetError {
    /// Name of the character set that rejected the bytes.
    pub charset: &'static str,
    /// Absolute buffer offset where the rejected span starts.
    pub offset: usize,
}

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum NistError {
    /// An error originating from I/O operations.
    #[error("I/O error: {0:?}")]
    Io(#[from] std::io::Error),

    /// A tag's record-type component does not match the record being parsed.
    #[error("Unexpected type in tag: expected record type {expected}, found {found}")]
    UnexpectedTagType { expected: u32, found: u32 },

    /// A `type.field:` tag could not be parsed.
    #[error("Malformed tag at offset {offset}: {reason}")]
    MalformedTag { offset: usize, reason: String },

    /// The cursor ran past the end of the buffer while more data was required.
    #[error("Unexpected end of data while reading {context} at offset {offset}")]
    UnexpectedEof { context: &'static str, offset: usize },

    /// A declared record length is non-numeric or inconsistent with the record.
    #[error("Invalid record length for type {record_type}: {value:?}")]
    InvalidRecordLength { record_type: u32, value: String },

    /// The record type is inside the catalogued range but has no handler.
    #[error("Unsupported record type: {0}")]
    UnsupportedRecordType(u32),

    /// A record referenced by the table of contents is not present in the file.
    #[error("Missing record of type {record_type} with IDC {idc}")]
    MissingRecord { record_type: u32, idc: u32 },

    /// A field required by the codec is absent from a record.
    #[error("Missing field {record_type}.{field_id:03}")]
    MissingField { record_type: u32, field_id: u32 },

    /// A record was grouped under a record type other than its own.
    #[error("Record of type {record_type} filed under type {key}")]
    MisfiledRecord { key: u32, record_type: u32 },

    /// A file must hold exactly one transaction information record.
    #[error("Expected exactly one transaction record, found {0}")]
    TransactionRecordCount(usize),

    /// The content field of the transaction record is malformed.
    #[error("Invalid table of contents: {0}")]
    InvalidTableOfContents(String),

    /// A text field could not be decoded with the active character set.
    #[error("Failed to decode field {record_type}.{field_id:03}")]
    Decode {
        record_type: u32,
        field_id: u32,
        #[source]
        source: CharsetError,
    },

    /// A text field cannot be represented in the active character set.
    #[error("Failed to encode field {record_type}.{field_id:03} as {charset}")]
    Encode {
        record_type: u32,
        field_id: u32,
        charset: &'static str,
    },

    /// A field value does not fit the shape the codec needs to write it.
    #[error("Invalid value for field {record_type}.{field_id:03}: {reason}")]
    InvalidField {
        record_type: u32,
        field_id: u32,
        reason: String,
    },

    /// Control number input is not exactly ten decimal digits.
    #[error("Invalid control number {0:?}: expected exactly 10 decimal digits")]
    InvalidControlNumber(String),

    /// Transaction priority outside of the 1 to 9 range.
    #[error("Priority {0} is out of range (1-9)")]
    PriorityOutOfRange(u8),

    /// The data is structurally invalid in a way no other variant describes.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// The image-metadata collaborator rejected a payload.
    #[error("Image inspection failed: {0}")]
    ImageInspection(String),
}

/// A convenience `Result` type alias using the crate's `NistError` type.
pub type Result<T> = std::result::Result<T, NistError>;
