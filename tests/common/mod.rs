#![allow(dead_code)]

//! Hand-built wire fixtures.
//!
//! Lengths are found by iterating until the length value's own width is
//! stable, independently of the crate's arithmetic.

pub const FS: u8 = 0x1C;
pub const GS: u8 = 0x1D;
pub const RS: u8 = 0x1E;
pub const US: u8 = 0x1F;

/// Tagged record bytes with a self-consistent `T.001:` length.
pub fn tagged_record(record_type: u32, fields: &[(u32, &[u8])]) -> Vec<u8> {
    let body = tagged_body(record_type, fields);
    let head = format!("{}.001:", record_type).len();
    let mut len = head + body.len() + 1;
    loop {
        let next = head + len.to_string().len() + body.len();
        if next == len {
            break;
        }
        len = next;
    }
    tagged_record_raw(record_type, len.to_string().as_bytes(), fields)
}

/// Tagged record bytes with a caller-supplied length value.
pub fn tagged_record_raw(record_type: u32, len_value: &[u8], fields: &[(u32, &[u8])]) -> Vec<u8> {
    let mut out = format!("{}.001:", record_type).into_bytes();
    out.extend_from_slice(len_value);
    out.extend(tagged_body(record_type, fields));
    out
}

fn tagged_body(record_type: u32, fields: &[(u32, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (field_id, value) in fields {
        body.push(GS);
        body.extend_from_slice(format!("{}.{:03}:", record_type, field_id).as_bytes());
        body.extend_from_slice(value);
    }
    body.push(FS);
    body
}

/// CNT value for the given body entries.
pub fn contents(entries: &[(u32, &str)]) -> Vec<u8> {
    let mut out = format!("1{}{}", US as char, entries.len()).into_bytes();
    for (record_type, idc) in entries {
        out.push(RS);
        out.extend_from_slice(format!("{}{}{}", record_type, US as char, idc).as_bytes());
    }
    out
}

/// A type-1 record listing `entries`, with an optional DCS (1.015) value.
pub fn transaction(entries: &[(u32, &str)], charset: Option<&str>) -> Vec<u8> {
    let cnt = contents(entries);
    let mut fields: Vec<(u32, &[u8])> = vec![
        (2, &b"0400"[..]),
        (3, &cnt[..]),
        (4, &b"CAR"[..]),
        (5, &b"20240101"[..]),
        (7, &b"DAI000000"[..]),
        (8, &b"ORI000000"[..]),
        (9, &b"TCN0001"[..]),
        (11, &b"00.00"[..]),
        (12, &b"00.00"[..]),
    ];
    if let Some(charset) = charset {
        fields.push((15, charset.as_bytes()));
    }
    tagged_record(1, &fields)
}

/// A type-2 record with IDC and one descriptive field.
pub fn descriptive(idc: &str, value: &str) -> Vec<u8> {
    tagged_record(2, &[(2, idc.as_bytes()), (3, value.as_bytes())])
}

/// A type-3..6 record: LEN IDC IMP FGP ISR HLL VLL GCA, then payload.
pub fn finger_record(idc: u8, payload: &[u8]) -> Vec<u8> {
    finger_record_declaring(idc, (18 + payload.len()) as u32, payload)
}

/// Like [`finger_record`] but with an arbitrary declared length.
pub fn finger_record_declaring(idc: u8, declared: u32, payload: &[u8]) -> Vec<u8> {
    let mut out = declared.to_be_bytes().to_vec();
    out.push(idc);
    out.push(0); // IMP
    out.extend_from_slice(&[1, 255, 255, 255, 255, 255]); // FGP
    out.push(1); // ISR
    out.extend_from_slice(&500u16.to_be_bytes()); // HLL
    out.extend_from_slice(&400u16.to_be_bytes()); // VLL
    out.push(1); // GCA
    out.extend_from_slice(payload);
    out
}

/// A type-8 record: LEN IDC SIG SRT ISR HLL VLL, then payload.
pub fn signature_record(idc: u8, payload: &[u8]) -> Vec<u8> {
    let mut out = ((12 + payload.len()) as u32).to_be_bytes().to_vec();
    out.extend_from_slice(&[idc, 0, 1, 0]);
    out.extend_from_slice(&200u16.to_be_bytes());
    out.extend_from_slice(&80u16.to_be_bytes());
    out.extend_from_slice(payload);
    out
}

/// A type-7 record: LEN IDC, then payload.
pub fn user_defined_image(idc: u8, payload: &[u8]) -> Vec<u8> {
    let mut out = ((5 + payload.len()) as u32).to_be_bytes().to_vec();
    out.push(idc);
    out.extend_from_slice(payload);
    out
}

/// Image bytes that contain every separator value.
pub const SEPARATOR_LADEN_IMAGE: &[u8] = &[0xFF, 0xD8, FS, GS, RS, US, 0x00, 0x1C, 0x1C, 0xFF, 0xD9];

/// A type-14 record with descriptive fields and a field-999 image.
pub fn fingerprint_image(idc: &str, image: &[u8]) -> Vec<u8> {
    tagged_record(
        14,
        &[
            (2, idc.as_bytes()),
            (3, b"0"),
            (4, b"ORI000000"),
            (5, b"20240101"),
            (6, b"4"),
            (7, b"2"),
            (8, b"1"),
            (9, b"500"),
            (10, b"500"),
            (11, b"NONE"),
            (12, b"8"),
            (13, b"1"),
            (999, image),
        ],
    )
}

pub fn concat(parts: &[&[u8]]) -> Vec<u8> {
    parts.concat()
}
