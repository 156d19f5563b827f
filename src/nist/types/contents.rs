//! The transaction's table of contents (field 1.003, `CNT`).
//!
//! ```text
//! 1<US>count<RS>type<US>idc<RS>type<US>idc ...
//! ```
//!
//! The first entry carries the number of records that follow; every other
//! entry names one record by type and IDC, in file order.

use std::fmt;

use crate::nist::codec::separators::{RS, US};
use crate::nist::types::error::{NistError, Result};
use crate::nist::types::models::Record;
use crate::nist::types::record_types::TRANSACTION;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentEntry {
    pub record_type: u32,
    /// IDC as written; the first entry holds the record count instead.
    pub idc: String,
}

impl ContentEntry {
    pub fn new(record_type: u32, idc: impl Into<String>) -> Self {
        Self {
            record_type,
            idc: idc.into(),
        }
    }

    /// Parses one `type<US>idc` pair.
    pub fn parse(entry: &str) -> Result<Self> {
        let (record_type, idc) = entry.split_once(US as char).ok_or_else(|| {
            NistError::InvalidTableOfContents(format!("entry {:?} has no unit separator", entry))
        })?;
        let record_type = record_type.trim().parse().map_err(|_| {
            NistError::InvalidTableOfContents(format!("record type {:?} is not a number", record_type))
        })?;
        Ok(Self::new(record_type, idc))
    }

    pub fn idc_number(&self) -> Result<u32> {
        self.idc.trim().parse().map_err(|_| {
            NistError::InvalidTableOfContents(format!(
                "IDC {:?} of record type {} is not a number",
                self.idc, self.record_type
            ))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableOfContents {
    entries: Vec<ContentEntry>,
}

impl TableOfContents {
    pub fn parse(value: &str) -> Result<Self> {
        let entries = value
            .split(RS as char)
            .filter(|entry| !entry.is_empty())
            .map(ContentEntry::parse)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { entries })
    }

    /// Builds the table for body records in the order given.
    pub fn for_records<'a>(records: impl IntoIterator<Item = &'a Record>) -> Self {
        let body: Vec<ContentEntry> = records
            .into_iter()
            .filter(|record| record.record_type() != TRANSACTION)
            .map(|record| {
                let idc = record.idc().unwrap_or_default();
                ContentEntry::new(record.record_type(), format!("{:02}", idc))
            })
            .collect();

        let mut entries = Vec::with_capacity(body.len() + 1);
        entries.push(ContentEntry::new(TRANSACTION, body.len().to_string()));
        entries.extend(body);
        Self { entries }
    }

    pub fn entries(&self) -> &[ContentEntry] {
        &self.entries
    }

    /// Entries naming body records, i.e. everything after the count entry.
    pub fn body_entries(&self) -> impl Iterator<Item = &ContentEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.record_type > TRANSACTION)
    }

    /// The record count declared by the first entry.
    pub fn declared_count(&self) -> Option<usize> {
        self.entries
            .first()
            .filter(|entry| entry.record_type == TRANSACTION)
            .and_then(|entry| entry.idc.trim().parse().ok())
    }
}

impl fmt::Display for TableOfContents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", RS as char)?;
            }
            write!(f, "{}{}{}", entry.record_type, US as char, entry.idc)?;
        }
        Ok(())
    }
}
