//! # Codec Round-Trip Tests
//!
//! For every supported column type and a set of representative values —
//! including type minimums and maximums, and empty/max-length strings —
//! `decode(encode(v))` must reproduce `v` exactly. These tests exercise
//! the codec through its public API only; the engine tests cover the
//! same bytes indirectly through whole files.

use std::io::Cursor;

use wrendb::types::{codec, ColumnType, Value};

fn roundtrip(ty: ColumnType, value: Value) {
    let mut buf = Vec::new();
    codec::encode(&value, &mut buf).unwrap();
    let decoded = codec::decode(ty, &mut Cursor::new(&buf)).unwrap();
    assert_eq!(decoded, value, "round-trip mismatch for {:?} {:?}", ty, value);
}

#[test]
fn byte_extremes_round_trip() {
    for v in [i8::MIN, -1, 0, 1, i8::MAX] {
        roundtrip(ColumnType::Byte, Value::Byte(v));
    }
}

#[test]
fn short_extremes_round_trip() {
    for v in [i16::MIN, -1, 0, 1, i16::MAX] {
        roundtrip(ColumnType::Short, Value::Short(v));
    }
}

#[test]
fn int_extremes_round_trip() {
    for v in [i32::MIN, -1, 0, 1, i32::MAX] {
        roundtrip(ColumnType::Int, Value::Int(v));
    }
}

#[test]
fn long_extremes_round_trip() {
    for v in [i64::MIN, -1, 0, 1, i64::MAX] {
        roundtrip(ColumnType::Long, Value::Long(v));
    }
}

#[test]
fn float_representative_values_round_trip() {
    for v in [f32::MIN, -1.5, 0.0, 1.5, f32::MAX, f32::EPSILON] {
        roundtrip(ColumnType::Float, Value::Float(v));
    }
}

#[test]
fn double_representative_values_round_trip() {
    for v in [f64::MIN, -1.5, 0.0, 1.5, f64::MAX, f64::EPSILON] {
        roundtrip(ColumnType::Double, Value::Double(v));
    }
}

#[test]
fn date_and_datetime_round_trip() {
    for v in [i64::MIN, -1, 0, 1_700_000_000_000, i64::MAX] {
        roundtrip(ColumnType::DateTime, Value::DateTime(v));
        roundtrip(ColumnType::Date, Value::Date(v));
    }
}

#[test]
fn char_round_trips_at_exact_width() {
    roundtrip(ColumnType::Char(1), Value::Char("x".to_string()));
    roundtrip(ColumnType::Char(8), Value::Char("ab\0\0\0\0\0\0".to_string()));
    // All-zero buffer: the Char null sentinel.
    roundtrip(ColumnType::Char(4), Value::null_sentinel(ColumnType::Char(4)));
}

#[test]
fn varchar_round_trips_empty_and_max_length() {
    roundtrip(ColumnType::Varchar(255), Value::Varchar(String::new()));
    roundtrip(ColumnType::Varchar(8), Value::Varchar("wren".to_string()));
    roundtrip(
        ColumnType::Varchar(255),
        Value::Varchar("y".repeat(255)),
    );
}

#[test]
fn numeric_encoding_is_big_endian() {
    let mut buf = Vec::new();
    codec::encode(&Value::Int(1), &mut buf).unwrap();
    assert_eq!(buf, vec![0, 0, 0, 1]);

    buf.clear();
    codec::encode(&Value::Short(-2), &mut buf).unwrap();
    assert_eq!(buf, vec![0xFF, 0xFE]);
}

#[test]
fn null_sentinels_encode_as_type_minimums() {
    let mut buf = Vec::new();
    codec::encode(&Value::null_sentinel(ColumnType::Int), &mut buf).unwrap();
    assert_eq!(buf, i32::MIN.to_be_bytes());

    buf.clear();
    codec::encode(&Value::null_sentinel(ColumnType::Varchar(9)), &mut buf).unwrap();
    assert_eq!(buf, vec![0], "empty varchar is a lone zero-length prefix");

    buf.clear();
    codec::encode(&Value::null_sentinel(ColumnType::Char(3)), &mut buf).unwrap();
    assert_eq!(buf, vec![0, 0, 0]);
}

#[test]
fn a_literal_minimum_encodes_identically_to_null() {
    // The documented sentinel collision: a stored minimum and a stored
    // NULL are byte-identical.
    let mut null_bytes = Vec::new();
    codec::encode(&Value::null_sentinel(ColumnType::Long), &mut null_bytes).unwrap();

    let mut min_bytes = Vec::new();
    let literal = Value::parse_literal(ColumnType::Long, &i64::MIN.to_string()).unwrap();
    codec::encode(&literal, &mut min_bytes).unwrap();

    assert_eq!(null_bytes, min_bytes);
}

#[test]
fn calendar_literals_store_epoch_millis() {
    let v = Value::parse_literal(ColumnType::DateTime, "1970-01-01_00:00:01").unwrap();
    let mut buf = Vec::new();
    codec::encode(&v, &mut buf).unwrap();
    assert_eq!(buf, 1000i64.to_be_bytes());

    let v = Value::parse_literal(ColumnType::Date, "1970-01-02").unwrap();
    buf.clear();
    codec::encode(&v, &mut buf).unwrap();
    assert_eq!(buf, (86_400_000i64).to_be_bytes());
}
