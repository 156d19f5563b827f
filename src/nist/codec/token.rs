//! Per-pass cursor state.
//!
//! A [`Token`] walks one immutable input buffer. Besides the cursor it holds
//! the active [`Charset`] and the unconsumed remainder of the table of
//! contents, both of which change as the transaction record is parsed.
//! [`Emitter`] is the write-side counterpart.
//!
//! Neither type is `Send`: one pass owns its cursor exclusively.

use std::marker::PhantomData;
use std::rc::Rc;

use log::debug;

use crate::nist::codec::charset::Charset;
use crate::nist::codec::separators::RS;
use crate::nist::types::contents::ContentEntry;
use crate::nist::types::error::{CharsetError, NistError, Result};

/// Read cursor over a complete transaction buffer.
#[derive(Debug)]
pub struct Token<'a> {
    buffer: &'a [u8],
    pos: usize,
    charset: Charset,
    contents: String,
    current_record_type: Option<u32>,
    _not_send: PhantomData<Rc<()>>,
}

impl<'a> Token<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            pos: 0,
            charset: Charset::default(),
            contents: String::new(),
            current_record_type: None,
            _not_send: PhantomData,
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn is_within_bounds(&self) -> bool {
        self.pos < self.buffer.len()
    }

    /// Bytes left between the cursor and the end of the buffer.
    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.pos)
    }

    pub fn peek(&self) -> Option<u8> {
        self.buffer.get(self.pos).copied()
    }

    pub fn advance(&mut self, count: usize) {
        self.pos = self.pos.saturating_add(count).min(self.buffer.len());
    }

    /// Moves the cursor to an absolute offset inside the buffer.
    pub fn seek(&mut self, offset: usize) -> Result<()> {
        if offset > self.buffer.len() {
            return Err(NistError::UnexpectedEof {
                context: "record skip",
                offset,
            });
        }
        self.pos = offset;
        Ok(())
    }

    /// Scans until a stop byte or `max_len` bytes, without decoding.
    ///
    /// The cursor is left on the stop byte.
    pub fn read_ascii_word(&mut self, stop: &[u8], max_len: usize) -> &'a [u8] {
        let start = self.pos;
        let end = self.scan(stop, max_len);
        self.pos = end;
        &self.buffer[start..end]
    }

    /// Scans like [`read_ascii_word`](Self::read_ascii_word) and decodes the
    /// span with the active charset.
    pub fn read_delimited_word(
        &mut self,
        stop: &[u8],
        max_len: usize,
    ) -> std::result::Result<String, CharsetError> {
        let start = self.pos;
        let bytes = self.read_ascii_word(stop, max_len);
        self.charset.decode(bytes, start)
    }

    /// Takes exactly `count` raw bytes.
    pub fn read_bytes(&mut self, count: usize, context: &'static str) -> Result<&'a [u8]> {
        if count > self.remaining() {
            return Err(NistError::UnexpectedEof {
                context,
                offset: self.buffer.len(),
            });
        }
        let bytes = &self.buffer[self.pos..self.pos + count];
        self.pos += count;
        Ok(bytes)
    }

    fn scan(&self, stop: &[u8], max_len: usize) -> usize {
        let limit = self.pos.saturating_add(max_len).min(self.buffer.len());
        self.buffer[self.pos..limit]
            .iter()
            .position(|byte| stop.contains(byte))
            .map_or(limit, |idx| self.pos + idx)
    }

    pub fn charset(&self) -> Charset {
        self.charset
    }

    /// Switches the text decoder from a DCS field value.
    pub fn set_decoder(&mut self, selector: &str) {
        let charset = Charset::from_selector(selector);
        if charset != self.charset {
            debug!("Switching text decoder: {} -> {}", self.charset.name(), charset.name());
        }
        self.charset = charset;
    }

    /// Loads the table of contents that drives the rest of the pass.
    pub fn set_contents(&mut self, contents: impl Into<String>) {
        self.contents = contents.into();
    }

    /// Pops the next table-of-contents entry.
    pub fn next_content_entry(&mut self) -> Result<Option<ContentEntry>> {
        if self.contents.is_empty() {
            return Ok(None);
        }
        let (head, rest) = match self.contents.split_once(RS as char) {
            Some((head, rest)) => (head.to_owned(), rest.to_owned()),
            None => (std::mem::take(&mut self.contents), String::new()),
        };
        self.contents = rest;
        let entry = ContentEntry::parse(&head)?;
        self.current_record_type = Some(entry.record_type);
        Ok(Some(entry))
    }

    /// Record type of the entry most recently popped from the table of contents.
    pub fn current_record_type(&self) -> Option<u32> {
        self.current_record_type
    }
}

/// Write buffer for one serialisation pass.
///
/// Output is held in memory until the whole transaction is encoded.
#[derive(Debug, Default)]
pub struct Emitter {
    out: Vec<u8>,
    charset: Charset,
    _not_send: PhantomData<Rc<()>>,
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> usize {
        self.out.len()
    }

    pub fn push(&mut self, byte: u8) {
        self.out.push(byte);
    }

    pub fn write_raw(&mut self, bytes: &[u8]) {
        self.out.extend_from_slice(bytes);
    }

    pub fn charset(&self) -> Charset {
        self.charset
    }

    /// Switches the text encoder from a DCS field value.
    pub fn set_encoder(&mut self, selector: &str) {
        self.charset = Charset::from_selector(selector);
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contents_entries_track_the_current_record_type() {
        let mut token = Token::new(&[]);
        token.set_contents("1\u{1f}2\u{1e}14\u{1f}01\u{1e}99\u{1f}02");
        assert_eq!(token.current_record_type(), None);

        let mut seen = Vec::new();
        while let Some(entry) = token.next_content_entry().unwrap() {
            assert_eq!(token.current_record_type(), Some(entry.record_type));
            seen.push(entry.idc);
        }
        assert_eq!(seen, vec!["2", "01", "02"]);
        assert_eq!(token.current_record_type(), Some(99));
    }

    #[test]
    fn emitter_follows_the_selected_charset() {
        let mut emitter = Emitter::new();
        assert_eq!(emitter.charset(), Charset::Legacy);
        emitter.set_encoder("002");
        assert_eq!(emitter.charset(), Charset::Utf16);
    }
}
