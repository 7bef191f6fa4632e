//! # Binary Value Codec
//!
//! Encodes and decodes single typed values to and from byte streams. This
//! is the one place that knows the wire format; heap files, index files,
//! and the catalog's own files all delegate here, which is what keeps the
//! three independently-evolving file kinds layout-compatible.
//!
//! Fixed-width types are big-endian, matching their declared size.
//! `Char(n)` is exactly n bytes with no prefix (the `Value` invariant
//! guarantees padding). `Varchar(n)` is a one-byte length prefix followed
//! by that many bytes. Rows are fields encoded back-to-back with no
//! separators beyond the varchar prefixes.

use std::io::{self, Read, Write};

use crate::error::{Error, Result};
use crate::types::{ColumnType, Value};

/// Writes one value to a byte stream.
pub fn encode(value: &Value, w: &mut impl Write) -> Result<()> {
    match value {
        Value::Byte(v) => w.write_all(&v.to_be_bytes())?,
        Value::Short(v) => w.write_all(&v.to_be_bytes())?,
        Value::Int(v) => w.write_all(&v.to_be_bytes())?,
        Value::Long(v) | Value::DateTime(v) | Value::Date(v) => w.write_all(&v.to_be_bytes())?,
        Value::Float(v) => w.write_all(&v.to_be_bytes())?,
        Value::Double(v) => w.write_all(&v.to_be_bytes())?,
        Value::Char(s) => w.write_all(s.as_bytes())?,
        Value::Varchar(s) => {
            let len = u8::try_from(s.len()).map_err(|_| {
                Error::MalformedLiteral(format!("varchar value of {} bytes", s.len()))
            })?;
            w.write_all(&[len])?;
            w.write_all(s.as_bytes())?;
        }
    }
    Ok(())
}

/// Reads one value of the given type from a byte stream.
pub fn decode(ty: ColumnType, r: &mut impl Read) -> Result<Value> {
    match ty {
        ColumnType::Byte => Ok(Value::Byte(i8::from_be_bytes(read_array(r)?))),
        ColumnType::Short => Ok(Value::Short(i16::from_be_bytes(read_array(r)?))),
        ColumnType::Int => Ok(Value::Int(i32::from_be_bytes(read_array(r)?))),
        ColumnType::Long => Ok(Value::Long(i64::from_be_bytes(read_array(r)?))),
        ColumnType::Float => Ok(Value::Float(f32::from_be_bytes(read_array(r)?))),
        ColumnType::Double => Ok(Value::Double(f64::from_be_bytes(read_array(r)?))),
        ColumnType::DateTime => Ok(Value::DateTime(i64::from_be_bytes(read_array(r)?))),
        ColumnType::Date => Ok(Value::Date(i64::from_be_bytes(read_array(r)?))),
        ColumnType::Char(n) => {
            let mut buf = vec![0u8; n as usize];
            r.read_exact(&mut buf)?;
            Ok(Value::Char(into_utf8(buf)?))
        }
        ColumnType::Varchar(_) => {
            let mut len = [0u8; 1];
            r.read_exact(&mut len)?;
            let mut buf = vec![0u8; len[0] as usize];
            r.read_exact(&mut buf)?;
            Ok(Value::Varchar(into_utf8(buf)?))
        }
    }
}

/// Writes a whole row, fields back-to-back in ordinal order.
pub fn encode_row(values: &[Value], w: &mut impl Write) -> Result<()> {
    for value in values {
        encode(value, w)?;
    }
    Ok(())
}

/// Reads a whole row given the table's column types in ordinal order.
pub fn decode_row(types: &[ColumnType], r: &mut impl Read) -> Result<Vec<Value>> {
    types.iter().map(|ty| decode(*ty, r)).collect()
}

fn read_array<const N: usize>(r: &mut impl Read) -> Result<[u8; N]> {
    let mut buf = [0u8; N];
    r.read_exact(&mut buf)?;
    Ok(buf)
}

fn into_utf8(buf: Vec<u8>) -> Result<String> {
    String::from_utf8(buf).map_err(|e| {
        Error::Io(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("stored string is not valid UTF-8: {}", e),
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn roundtrip(ty: ColumnType, value: Value) {
        let mut buf = Vec::new();
        encode(&value, &mut buf).unwrap();
        let decoded = decode(ty, &mut Cursor::new(&buf)).unwrap();
        assert_eq!(decoded, value, "round-trip mismatch for {:?}", ty);
    }

    #[test]
    fn fixed_width_values_round_trip() {
        roundtrip(ColumnType::Byte, Value::Byte(i8::MAX));
        roundtrip(ColumnType::Short, Value::Short(-2));
        roundtrip(ColumnType::Int, Value::Int(i32::MIN));
        roundtrip(ColumnType::Long, Value::Long(i64::MAX));
        roundtrip(ColumnType::Float, Value::Float(1.5));
        roundtrip(ColumnType::Double, Value::Double(-0.25));
        roundtrip(ColumnType::DateTime, Value::DateTime(1_700_000_000_000));
        roundtrip(ColumnType::Date, Value::Date(0));
    }

    #[test]
    fn strings_round_trip_with_their_prefixes() {
        roundtrip(ColumnType::Char(4), Value::Char("ab\0\0".to_string()));
        roundtrip(ColumnType::Varchar(10), Value::Varchar("hello".to_string()));
        roundtrip(ColumnType::Varchar(10), Value::Varchar(String::new()));
    }

    #[test]
    fn fixed_width_encoding_matches_declared_size() {
        for (ty, value) in [
            (ColumnType::Byte, Value::Byte(1)),
            (ColumnType::Short, Value::Short(1)),
            (ColumnType::Int, Value::Int(1)),
            (ColumnType::Long, Value::Long(1)),
            (ColumnType::Float, Value::Float(1.0)),
            (ColumnType::Double, Value::Double(1.0)),
            (ColumnType::Char(6), Value::Char("ab\0\0\0\0".to_string())),
        ] {
            let mut buf = Vec::new();
            encode(&value, &mut buf).unwrap();
            assert_eq!(Some(buf.len()), ty.fixed_size());
        }
    }

    #[test]
    fn varchar_prefix_is_one_byte_of_length() {
        let mut buf = Vec::new();
        encode(&Value::Varchar("abc".to_string()), &mut buf).unwrap();
        assert_eq!(buf, vec![3, b'a', b'b', b'c']);
    }

    #[test]
    fn rows_decode_positionally() {
        let types = [ColumnType::Int, ColumnType::Varchar(8), ColumnType::Double];
        let row = vec![
            Value::Int(7),
            Value::Varchar("wren".to_string()),
            Value::Double(2.5),
        ];
        let mut buf = Vec::new();
        encode_row(&row, &mut buf).unwrap();
        let decoded = decode_row(&types, &mut Cursor::new(&buf)).unwrap();
        assert_eq!(decoded, row);
    }

    #[test]
    fn truncated_stream_is_an_io_error() {
        let buf = vec![0u8, 1];
        let err = decode(ColumnType::Int, &mut Cursor::new(&buf)).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
