mod common;

use ansi_nist::nist::codec::charset::Charset;
use ansi_nist::nist::types::transaction::{self as tx, CHARSET_FIELD};
use ansi_nist::{Field, NistError, NistFile, NistReader, NistWriter, Record};
use common::*;
use rstest::rstest;

/// Type-2 record whose values are UTF-16BE: LEN "33", IDC "00", 2.003 "AB".
fn utf16_descriptive() -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(b"2.001:");
    out.extend_from_slice(&[0x00, b'3', 0x00, b'3']);
    out.push(GS);
    out.extend_from_slice(b"2.002:");
    out.extend_from_slice(&[0x00, b'0', 0x00, b'0']);
    out.push(GS);
    out.extend_from_slice(b"2.003:");
    out.extend_from_slice(&[0x00, b'A', 0x00, b'B']);
    out.push(FS);
    out
}

fn file_with_charset(charset: &str, body: &[u8]) -> Vec<u8> {
    concat(&[&transaction(&[(2, "00")], Some(charset)), body])
}

#[test]
fn utf16_selector_switches_decoder_after_the_transaction_record() {
    let bytes = file_with_charset("002", &utf16_descriptive());
    assert_eq!(utf16_descriptive().len(), 33);

    let file = NistReader::new().decode(&bytes).unwrap();
    assert_eq!(tx::charset(file.transaction()), Charset::Utf16);

    let record = file.get(2, 0).unwrap();
    assert_eq!(record.text(1), Some("33"));
    assert_eq!(record.text(2), Some("00"));
    assert_eq!(record.text(3), Some("AB"));
    assert_eq!(record.clone().update_length_for(Charset::Utf16).unwrap(), 33);
}

#[test]
fn same_bytes_under_legacy_charset_keep_the_nul_bytes() {
    let bytes = file_with_charset("000", &utf16_descriptive());

    let file = NistReader::new().decode(&bytes).unwrap();
    assert_eq!(tx::charset(file.transaction()), Charset::Legacy);
    let record = &file.records(2)[0];
    assert_eq!(record.text(3), Some("\0A\0B"));
    assert_eq!(record.idc(), None);
}

#[test]
fn utf16_file_round_trips() {
    let bytes = file_with_charset("002", &utf16_descriptive());
    let file = NistReader::new().decode(&bytes).unwrap();

    assert_eq!(NistWriter::new().encode(&file).unwrap(), bytes);
}

#[test]
fn invalid_utf8_names_the_field() {
    let record = tagged_record(2, &[(2, b"00"), (3, &[b'A', 0xFF, b'B'])]);
    let bytes = file_with_charset("003", &record);

    let err = NistReader::new().decode(&bytes).unwrap_err();
    assert!(matches!(
        err,
        NistError::Decode {
            record_type: 2,
            field_id: 3,
            ..
        }
    ));
}

#[test]
fn charset_applies_only_after_its_own_field() {
    // 0xE9 is valid windows-1252 but invalid UTF-8; the type-1 record before
    // the switch is still decoded as legacy text.
    let transaction_record = tagged_record(
        1,
        &[
            (2, b"0400"),
            (3, contents(&[(2, "00")]).as_slice()),
            (9, &[b'T', 0xE9]),
            (15, b"003"),
        ],
    );
    let bytes = concat(&[&transaction_record, &descriptive("00", "caf\u{e9}")]);

    let file = NistReader::new().decode(&bytes).unwrap();
    assert_eq!(file.transaction().text(9), Some("T\u{e9}"));
    assert_eq!(file.get(2, 0).and_then(|r| r.text(3)), Some("caf\u{e9}"));
}

fn transaction_with(charset: Option<&str>) -> Record {
    let mut record = Record::new(1);
    record.set_text(2, "0500").set_text(4, "CAR");
    if let Some(charset) = charset {
        record.set_text(CHARSET_FIELD, charset);
    }
    record
}

fn wide_text_record() -> Record {
    let mut record = Record::new(2);
    record.set_text(2, "0").set_text(3, "\u{4e2d}\u{6587}");
    record
}

#[test]
fn legacy_encoder_rejects_unmappable_text() {
    let file = NistFile::build(transaction_with(None), vec![wide_text_record()]).unwrap();

    let mut sink = Vec::new();
    let err = NistWriter::new().write(&file, &mut sink).unwrap_err();
    assert!(matches!(
        err,
        NistError::Encode {
            record_type: 2,
            field_id: 3,
            charset: "windows-1252",
        }
    ));
    assert!(sink.is_empty());
}

#[test]
fn utf8_selector_carries_wide_text() {
    let file = NistFile::build(transaction_with(Some("003")), vec![wide_text_record()]).unwrap();

    let bytes = NistWriter::new().encode(&file).unwrap();
    let decoded = NistReader::new().decode(&bytes).unwrap();
    assert_eq!(decoded.get(2, 0).and_then(|r| r.text(3)), Some("\u{4e2d}\u{6587}"));
}

#[test]
fn utf16_selector_round_trips_built_records() {
    let file = NistFile::build(transaction_with(Some("002")), vec![wide_text_record()]).unwrap();

    let bytes = NistWriter::new().encode(&file).unwrap();
    let decoded = NistReader::new().decode(&bytes).unwrap();
    assert_eq!(decoded, file);
}

fn image_transaction(charset: Option<&str>) -> NistFile {
    let mut text = Record::new(2);
    text.set_text(2, "0").set_text(3, "caf\u{e9} \u{20ac}5");

    let mut face = Record::new(10);
    face.set_text(2, "1")
        .set_text(3, "FACE")
        .set_binary(999, SEPARATOR_LADEN_IMAGE.to_vec());

    let mut finger = Record::new(14);
    finger
        .set_text(2, "2")
        .set_text(11, "NONE")
        .set_binary(999, vec![0xAB; 16]);

    NistFile::build(transaction_with(charset), vec![text, face, finger]).unwrap()
}

#[rstest]
#[case::legacy(None)]
#[case::utf16(Some("002"))]
#[case::utf8(Some("003"))]
fn image_records_round_trip_under_every_charset(#[case] charset: Option<&str>) {
    let file = image_transaction(charset);

    let bytes = NistWriter::new().encode(&file).unwrap();
    let declared: usize = file.iter().map(|r| r.declared_length().unwrap()).sum();
    assert_eq!(declared, bytes.len());

    let decoded = NistReader::new().decode(&bytes).unwrap();
    assert_eq!(
        decoded.get(10, 1).and_then(|r| r.field(999)).and_then(Field::binary_data),
        Some(SEPARATOR_LADEN_IMAGE.to_vec())
    );
    assert_eq!(decoded, file);
}

#[rstest]
#[case::utf16("002")]
#[case::utf8("003")]
fn decoded_lengths_recompute_in_the_file_charset(#[case] charset: &str) {
    let bytes = NistWriter::new().encode(&image_transaction(Some(charset))).unwrap();
    let decoded = NistReader::new().decode(&bytes).unwrap();
    let active = tx::charset(decoded.transaction());

    for record in decoded.iter() {
        let mut recomputed = record.clone();
        assert_eq!(
            recomputed.update_length_for(active).ok(),
            record.declared_length(),
            "type-{} record",
            record.record_type()
        );
    }
}

#[rstest]
#[case::utf16_fs_low_byte(Some("002"), "\u{4e1c}")]
#[case::utf16_gs_low_byte(Some("002"), "\u{11d}")]
#[case::legacy_control_character(None, "A\u{1d}B")]
#[case::utf8_control_character(Some("003"), "\u{1c}")]
fn text_encoding_to_a_separator_byte_is_refused(
    #[case] charset: Option<&str>,
    #[case] value: &str,
) {
    let mut text = Record::new(2);
    text.set_text(2, "0").set_text(3, value);
    let file = NistFile::build(transaction_with(charset), vec![text]).unwrap();

    let mut sink = Vec::new();
    let err = NistWriter::new().write(&file, &mut sink).unwrap_err();
    assert!(matches!(
        err,
        NistError::InvalidField {
            record_type: 2,
            field_id: 3,
            ..
        }
    ));
    assert!(sink.is_empty());
}
