//! Character sets for text field values.
//!
//! The transaction record's DCS field selects the character set by its
//! three-digit prefix:
//!
//! | prefix | charset |
//! |--------|---------|
//! | `002`  | UTF-16 (big-endian) |
//! | `003`  | UTF-8 |
//! | other  | legacy single-byte (windows-1252) |

use encoding_rs::{Encoding, UTF_16BE, UTF_8, WINDOWS_1252};

use crate::nist::types::error::CharsetError;

const UTF16_SELECTOR: &str = "002";
const UTF8_SELECTOR: &str = "003";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Charset {
    #[default]
    Legacy,
    Utf16,
    Utf8,
}

impl Charset {
    /// Picks the charset named by a DCS field value.
    pub fn from_selector(selector: &str) -> Self {
        let selector = selector.trim_start();
        if selector.starts_with(UTF16_SELECTOR) {
            Charset::Utf16
        } else if selector.starts_with(UTF8_SELECTOR) {
            Charset::Utf8
        } else {
            Charset::Legacy
        }
    }

    fn encoding(&self) -> &'static Encoding {
        match self {
            Charset::Legacy => WINDOWS_1252,
            Charset::Utf16 => UTF_16BE,
            Charset::Utf8 => UTF_8,
        }
    }

    pub fn name(&self) -> &'static str {
        self.encoding().name()
    }

    /// Bytes `text` occupies once encoded.
    ///
    /// Legacy text is one byte per character; characters it cannot map are
    /// rejected on write, not here.
    pub fn encoded_len(&self, text: &str) -> usize {
        match self {
            Charset::Legacy => text.chars().count(),
            Charset::Utf16 => text.encode_utf16().count() * 2,
            Charset::Utf8 => text.len(),
        }
    }

    /// Decodes a span without replacement characters.
    ///
    /// `offset` is the span's position in the source buffer, used for errors.
    pub fn decode(&self, bytes: &[u8], offset: usize) -> Result<String, CharsetError> {
        self.encoding()
            .decode_without_bom_handling_and_without_replacement(bytes)
            .map(|text| text.into_owned())
            .ok_or(CharsetError {
                charset: self.name(),
                offset,
            })
    }

    /// Encodes text, failing on characters the charset cannot represent.
    pub fn encode(&self, text: &str, offset: usize) -> Result<Vec<u8>, CharsetError> {
        match self {
            // encoding_rs only decodes UTF-16; its encoder emits UTF-8.
            Charset::Utf16 => Ok(text.encode_utf16().flat_map(u16::to_be_bytes).collect()),
            Charset::Utf8 => Ok(text.as_bytes().to_vec()),
            Charset::Legacy => {
                let (bytes, _, had_errors) = WINDOWS_1252.encode(text);
                if had_errors {
                    Err(CharsetError {
                        charset: self.name(),
                        offset,
                    })
                } else {
                    Ok(bytes.into_owned())
                }
            }
        }
    }
}
