use std::collections::BTreeMap;
use std::path::Path;

use log::{debug, info, warn};

use crate::nist::codec::separators::{self, FS, GS};
use crate::nist::codec::token::Token;
use crate::nist::format::{self, tagged};
use crate::nist::types::error::{NistError, Result};
use crate::nist::types::file::NistFile;
use crate::nist::types::models::Record;
use crate::nist::types::record_types::{self, TRANSACTION};
use crate::nist::types::transaction::CONTENT_FIELD;

/// Per-read settings.
#[derive(Debug, Clone, Copy)]
pub struct ReadOptions {
    /// Skip records whose type lies outside the catalogued range instead of
    /// failing. Types inside the range without a handler always fail.
    pub skip_unknown_types: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            skip_unknown_types: true,
        }
    }
}

/// Parses complete ANSI/NIST-ITL transactions.
///
/// The transaction record is parsed first; its table of contents then
/// decides which handler reads each following span of bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NistReader {
    options: ReadOptions,
}

impl NistReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ReadOptions) -> Self {
        Self { options }
    }

    /// Reads a whole file into memory and decodes it.
    pub fn open(&self, path: impl AsRef<Path>) -> Result<NistFile> {
        let path = path.as_ref();
        info!("Opening ANSI/NIST file: {}", path.display());
        let bytes = std::fs::read(path)?;
        self.decode(&bytes)
    }

    /// Decodes a transaction from a complete in-memory buffer.
    ///
    /// # Errors
    /// Returns an error if:
    /// - a tag is malformed or names a different record type
    /// - the buffer ends while a record is still expected
    /// - a text field is invalid in the active character set
    /// - the table of contents names a reserved record type
    pub fn decode(&self, bytes: &[u8]) -> Result<NistFile> {
        info!("Decoding ANSI/NIST transaction ({} bytes)", bytes.len());
        let mut token = Token::new(bytes);

        let transaction = tagged::read(&mut token, TRANSACTION)?;
        let contents = transaction
            .text(CONTENT_FIELD)
            .ok_or(NistError::MissingField {
                record_type: TRANSACTION,
                field_id: CONTENT_FIELD,
            })?
            .to_owned();
        token.set_contents(contents);
        debug!("Transaction record parsed, charset {}", token.charset().name());

        let mut records: BTreeMap<u32, Vec<Record>> = BTreeMap::new();
        records.entry(TRANSACTION).or_default().push(transaction);

        while let Some(entry) = token.next_content_entry()? {
            let record_type = entry.record_type;
            if record_type <= TRANSACTION {
                continue;
            }
            match record_types::handler(record_type)? {
                Some(kind) => {
                    debug!(
                        "Reading type-{} record (IDC {}) at offset {}",
                        record_type,
                        entry.idc,
                        token.position()
                    );
                    let record = format::read_record(kind, record_type, &mut token)?;
                    records.entry(record_type).or_default().push(record);
                }
                None if self.options.skip_unknown_types => {
                    warn!(
                        "Skipping unsupported record type {} (IDC {}) at offset {}",
                        record_type,
                        entry.idc,
                        token.position()
                    );
                    skip_record(&mut token)?;
                }
                None => return Err(NistError::UnsupportedRecordType(record_type)),
            }
        }

        if token.is_within_bounds() {
            warn!(
                "Ignoring {} bytes after the last listed record (offset {})",
                token.remaining(),
                token.position()
            );
        }

        let file = NistFile::new(records)?;
        info!("Decoded {} records", file.record_count());
        Ok(file)
    }
}

/// Steps over the tagged record the table of contents just named, using its
/// leading length field.
fn skip_record(token: &mut Token<'_>) -> Result<()> {
    let record_type = token.current_record_type().unwrap_or_default();
    let start = token.position();
    let tag = separators::read_tag(token)?;
    let value = token.read_ascii_word(&[GS, FS], token.remaining());
    let length: usize = std::str::from_utf8(value)
        .ok()
        .and_then(|len| len.trim().parse().ok())
        .filter(|_| tag.field_id == 1)
        .ok_or_else(|| NistError::InvalidRecordLength {
            record_type,
            value: String::from_utf8_lossy(value).into_owned(),
        })?;
    token.seek(start + length)
}
