//! The in-memory transaction: records grouped by record type.

use std::collections::BTreeMap;

use crate::nist::types::contents::TableOfContents;
use crate::nist::types::error::{NistError, Result};
use crate::nist::types::models::Record;
use crate::nist::types::record_types::TRANSACTION;
use crate::nist::types::transaction::{CONTENT_FIELD, charset as selected_charset};

/// A complete ANSI/NIST-ITL transaction.
///
/// Records of each type keep the order in which they appear in the file.
/// A file always holds exactly one transaction record; that is checked on
/// construction and the file cannot be mutated afterwards. Edit by taking
/// the records out with [`into_records`](Self::into_records) and building a
/// new file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NistFile {
    records: BTreeMap<u32, Vec<Record>>,
}

impl NistFile {
    pub fn new(records: BTreeMap<u32, Vec<Record>>) -> Result<Self> {
        for (key, group) in &records {
            if let Some(record) = group.iter().find(|record| record.record_type() != *key) {
                return Err(NistError::MisfiledRecord {
                    key: *key,
                    record_type: record.record_type(),
                });
            }
        }
        let transactions = records.get(&TRANSACTION).map_or(0, Vec::len);
        if transactions != 1 {
            return Err(NistError::TransactionRecordCount(transactions));
        }
        Ok(Self { records })
    }

    /// Groups records by type, keeping their relative order.
    pub fn from_records(records: impl IntoIterator<Item = Record>) -> Result<Self> {
        let mut grouped: BTreeMap<u32, Vec<Record>> = BTreeMap::new();
        for record in records {
            grouped.entry(record.record_type()).or_default().push(record);
        }
        Self::new(grouped)
    }

    /// Assembles a file from a transaction record and its body records.
    ///
    /// Writes the table of contents from `body` in order, then recomputes the
    /// length of every record in the charset the transaction selects.
    pub fn build(mut transaction: Record, body: Vec<Record>) -> Result<Self> {
        if transaction.record_type() != TRANSACTION {
            return Err(NistError::MisfiledRecord {
                key: TRANSACTION,
                record_type: transaction.record_type(),
            });
        }
        let contents = TableOfContents::for_records(&body);
        transaction.set_text(CONTENT_FIELD, contents.to_string());
        transaction.update_length()?;
        let charset = selected_charset(&transaction);

        let mut records = Vec::with_capacity(body.len() + 1);
        records.push(transaction);
        for mut record in body {
            record.update_length_for(charset)?;
            records.push(record);
        }
        Self::from_records(records)
    }

    /// The transaction information record.
    pub fn transaction(&self) -> &Record {
        // Construction guarantees exactly one.
        &self.records[&TRANSACTION][0]
    }

    /// Looks a record up by type and IDC.
    ///
    /// The transaction record has no IDC and matches any query.
    pub fn get(&self, record_type: u32, idc: u32) -> Option<&Record> {
        if record_type == TRANSACTION {
            return Some(self.transaction());
        }
        self.records(record_type)
            .iter()
            .find(|record| record.idc() == Some(idc))
    }

    /// All records of one type, in file order.
    pub fn records(&self, record_type: u32) -> &[Record] {
        self.records
            .get(&record_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn record_types(&self) -> impl Iterator<Item = u32> + '_ {
        self.records.keys().copied()
    }

    /// Every record, grouped by ascending record type.
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.values().flatten()
    }

    pub fn record_count(&self) -> usize {
        self.records.values().map(Vec::len).sum()
    }

    /// Parses the transaction record's content field.
    pub fn table_of_contents(&self) -> Result<TableOfContents> {
        let contents = self
            .transaction()
            .text(CONTENT_FIELD)
            .ok_or(NistError::MissingField {
                record_type: TRANSACTION,
                field_id: CONTENT_FIELD,
            })?;
        TableOfContents::parse(contents)
    }

    pub fn into_records(self) -> BTreeMap<u32, Vec<Record>> {
        self.records
    }
}
