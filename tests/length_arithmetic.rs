mod common;

use ansi_nist::nist::codec::token::Emitter;
use ansi_nist::nist::format::tagged;
use ansi_nist::{NistReader, Record};
use common::*;
use rstest::rstest;

fn descriptive_with_filler(filler: usize) -> Record {
    let mut record = Record::new(2);
    record.set_text(2, "0").set_text(3, "x".repeat(filler));
    record
}

fn encoded_len(record: &Record) -> usize {
    let mut emitter = Emitter::new();
    tagged::write(&mut emitter, record).expect("write");
    emitter.into_bytes().len()
}

#[rstest]
#[case::two_digits(74, 98)]
#[case::last_two_digit_length(75, 99)]
#[case::rolls_over_to_three_digits(76, 101)]
#[case::three_digits(77, 102)]
#[case::last_three_digit_length(974, 999)]
#[case::rolls_over_to_four_digits(975, 1001)]
#[case::four_digits(976, 1002)]
fn length_accounts_for_its_own_digits(#[case] filler: usize, #[case] expected: usize) {
    let mut record = descriptive_with_filler(filler);

    assert_eq!(record.update_length().unwrap(), expected);
    assert_eq!(record.declared_length(), Some(expected));
    assert_eq!(encoded_len(&record), expected);
}

#[rstest]
#[case(74)]
#[case(76)]
#[case(975)]
fn calculator_agrees_with_hand_built_records(#[case] filler: usize) {
    let value = "x".repeat(filler);
    let bytes = tagged_record(2, &[(2, b"0"), (3, value.as_bytes())]);

    let mut record = descriptive_with_filler(filler);
    assert_eq!(record.update_length().unwrap(), bytes.len());
}

#[test]
fn two_digit_record_types_carry_wider_tags() {
    let mut record = Record::new(10);
    record.set_text(2, "1").set_binary(999, vec![0xAB; 20]);

    assert_eq!(record.update_length().unwrap(), 47);
    assert_eq!(encoded_len(&record), 47);
}

#[test]
fn stale_length_is_replaced() {
    let mut record = descriptive_with_filler(10);
    record.set_text(1, "99999");

    let total = record.update_length().unwrap();
    assert_eq!(record.text(1), Some(total.to_string().as_str()));
    assert_eq!(encoded_len(&record), total);
}

#[test]
fn binary_length_is_header_plus_payload() {
    let mut finger = Record::new(4);
    finger.set_text(2, "1").set_binary(9, vec![0; 100]);
    assert_eq!(finger.update_length().unwrap(), 118);

    let mut signature = Record::new(8);
    signature.set_text(2, "1");
    assert_eq!(signature.update_length().unwrap(), 12);

    let mut user_defined = Record::new(7);
    user_defined.set_text(2, "1").set_binary(3, vec![0; 3]);
    assert_eq!(user_defined.update_length().unwrap(), 8);
}

#[test]
fn reserved_and_unknown_types_have_no_length() {
    assert!(Record::new(11).update_length().is_err());
    assert!(Record::new(99).update_length().is_err());
}

#[test]
fn transaction_length_survives_a_read() {
    let bytes = concat(&[&transaction(&[(2, "00")], None), &descriptive("00", "A")]);
    let file = NistReader::new().decode(&bytes).unwrap();

    let mut transaction = file.transaction().clone();
    let declared = transaction.declared_length();
    assert_eq!(transaction.update_length().ok(), declared);
}
