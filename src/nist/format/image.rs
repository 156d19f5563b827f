//! Delimited-text records carrying an image in field 999 (types 10, 13-17).
//!
//! On the wire these are ordinary tagged records. The difference is on the
//! construction side: [`attach_image`] fills in the image description fields
//! from an [`ImageInspector`] before the payload is stored.

use std::error::Error;

use log::debug;

use crate::nist::codec::token::{Emitter, Token};
use crate::nist::format::tagged;
use crate::nist::types::error::{NistError, Result};
use crate::nist::types::models::Record;
use crate::nist::types::record_types::{self, HandlerKind, ImageFields, TAGGED_PAYLOAD_FIELD};

/// Scale units value for pixels per inch.
const PIXELS_PER_INCH: &str = "1";

/// What an image inspector reports about a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub compression_code: String,
    pub dpi_x: u32,
    pub dpi_y: u32,
    pub color_space: Option<String>,
}

/// Extracts image metadata from raw image bytes (JPEG, PNG, WSQ, ...).
pub trait ImageInspector {
    fn inspect(&self, bytes: &[u8]) -> std::result::Result<ImageInfo, Box<dyn Error + Send + Sync>>;
}

impl<F> ImageInspector for F
where
    F: Fn(&[u8]) -> std::result::Result<ImageInfo, Box<dyn Error + Send + Sync>>,
{
    fn inspect(&self, bytes: &[u8]) -> std::result::Result<ImageInfo, Box<dyn Error + Send + Sync>> {
        self(bytes)
    }
}

pub fn read(token: &mut Token<'_>, record_type: u32) -> Result<Record> {
    tagged::read(token, record_type)
}

pub fn write(emitter: &mut Emitter, record: &Record) -> Result<()> {
    tagged::write(emitter, record)
}

/// Stores `image` in field 999 with its description fields, then
/// recomputes the record length in the default charset. Files using another
/// charset get their lengths redone by [`NistFile::build`].
///
/// [`NistFile::build`]: crate::nist::types::file::NistFile::build
pub fn attach_image(
    record: &mut Record,
    image: Vec<u8>,
    inspector: &dyn ImageInspector,
) -> Result<()> {
    let record_type = record.record_type();
    let fields = match record_types::handler(record_type)? {
        Some(HandlerKind::TaggedImage(fields)) => fields,
        _ => {
            return Err(NistError::InvalidField {
                record_type,
                field_id: TAGGED_PAYLOAD_FIELD,
                reason: "record type does not carry a tagged image".to_string(),
            });
        }
    };

    let info = inspector
        .inspect(&image)
        .map_err(|err| NistError::ImageInspection(err.to_string()))?;
    debug!(
        "Attaching {}x{} {} image ({} bytes) to type-{} record",
        info.width,
        info.height,
        info.compression_code,
        image.len(),
        record_type
    );

    apply_image_info(record, fields, &info);
    record.set_binary(TAGGED_PAYLOAD_FIELD, image);
    record.update_length()?;
    Ok(())
}

fn apply_image_info(record: &mut Record, fields: &ImageFields, info: &ImageInfo) {
    record
        .set_text(fields.width, info.width.to_string())
        .set_text(fields.height, info.height.to_string())
        .set_text(fields.scale_units, PIXELS_PER_INCH)
        .set_text(fields.horizontal_scale, info.dpi_x.to_string())
        .set_text(fields.vertical_scale, info.dpi_y.to_string())
        .set_text(fields.compression, info.compression_code.clone());
    if let (Some(field_id), Some(color_space)) = (fields.color_space, &info.color_space) {
        record.set_text(field_id, color_space.clone());
    }
}
