use std::io::Write;
use std::path::Path;

use log::{debug, info};

use crate::nist::codec::token::Emitter;
use crate::nist::format::{self, tagged};
use crate::nist::types::error::{NistError, Result};
use crate::nist::types::file::NistFile;
use crate::nist::types::record_types;

/// Serialises [`NistFile`]s.
///
/// The transaction record's table of contents is authoritative: records are
/// written in its order, and an entry with no matching record fails the
/// whole write before any byte reaches the sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct NistWriter;

impl NistWriter {
    pub fn new() -> Self {
        Self
    }

    /// Encodes a file into a fresh buffer.
    pub fn encode(&self, file: &NistFile) -> Result<Vec<u8>> {
        let mut emitter = Emitter::new();
        let transaction = file.transaction();
        tagged::write(&mut emitter, transaction)?;

        let contents = file.table_of_contents()?;
        for entry in contents.body_entries() {
            let idc = entry.idc_number()?;
            let record = file
                .get(entry.record_type, idc)
                .ok_or(NistError::MissingRecord {
                    record_type: entry.record_type,
                    idc,
                })?;
            let kind = record_types::handler(entry.record_type)?
                .ok_or(NistError::UnsupportedRecordType(entry.record_type))?;
            debug!("Writing type-{} record (IDC {})", entry.record_type, idc);
            format::write_record(kind, &mut emitter, record)?;
        }

        Ok(emitter.into_bytes())
    }

    /// Encodes a file and writes it to `sink` in one go.
    pub fn write<W: Write>(&self, file: &NistFile, sink: &mut W) -> Result<()> {
        let bytes = self.encode(file)?;
        sink.write_all(&bytes)?;
        sink.flush()?;
        info!("Wrote ANSI/NIST transaction ({} bytes)", bytes.len());
        Ok(())
    }

    pub fn write_to_path(&self, file: &NistFile, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.encode(file)?;
        std::fs::write(path, &bytes)?;
        info!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }
}
