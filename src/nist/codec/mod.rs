//! Byte-level codec primitives shared by every record handler.
//!
//! # Submodules
//!
//! - [`separators`]: control-byte separators and `type.field:` tags
//! - [`charset`]: text decoders selected by the transaction record
//! - [`token`]: read cursor and write buffer for one pass
//! - [`length`]: record length arithmetic
//! - [`check_digit`]: control number check characters

pub mod charset;
pub mod check_digit;
pub mod length;
pub mod separators;
pub mod token;
