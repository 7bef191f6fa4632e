//! # Runtime Value Representation
//!
//! `Value` is the typed runtime form of a single column value. Values are
//! produced in two places only: parsing a textual literal at the request
//! boundary, and decoding a binary field from a heap or index file. Both
//! paths go through the same variants, so the predicate evaluator never
//! sees raw bytes or raw text.
//!
//! ## Null Representation
//!
//! The storage format has no null bitmap. NULL is stored as a sentinel:
//! the type's minimum representable value for numeric and date types, an
//! all-`\0` buffer for `Char(n)`, and the empty string for `Varchar(n)`.
//! A legitimate value equal to the sentinel is indistinguishable from
//! NULL on read. That ambiguity is part of the on-disk contract and is
//! asserted as documented behavior by the test suite.
//!
//! ## Ordering
//!
//! Values of the same type order natively: numeric ascending (floats via
//! `total_cmp`), strings byte-lexicographically, dates by their millisecond
//! timestamp. `Ord` must be total for `BTreeMap` keys, so values of
//! different types fall back to a fixed variant rank; a single index file
//! only ever holds one type, so the fallback never decides a real
//! comparison.
//!
//! ## Text Boundary
//!
//! `DateTime` and `Date` values exist as epoch milliseconds everywhere
//! inside the engine. The calendar forms `yyyy-MM-dd_HH:mm:ss` and
//! `yyyy-MM-dd` appear only in `parse_literal` and `display_text`.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::{Error, Result};
use crate::types::ColumnType;

/// Calendar form of a `DateTime` literal.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d_%H:%M:%S";

/// Calendar form of a `Date` literal.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single typed column value.
#[derive(Debug, Clone)]
pub enum Value {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    /// Epoch milliseconds.
    DateTime(i64),
    /// Epoch milliseconds at midnight.
    Date(i64),
    /// Always exactly n bytes, `\0`-padded.
    Char(String),
    Varchar(String),
}

/// True if a textual literal denotes SQL NULL.
pub fn is_null_literal(text: &str) -> bool {
    text.trim().eq_ignore_ascii_case("null")
}

impl Value {
    /// Converts a textual literal into a typed value. Length bounds for
    /// `Char(n)`/`Varchar(n)` are enforced here, and `Char(n)` values are
    /// padded to exactly n bytes so that stored and compared byte strings
    /// always agree.
    pub fn parse_literal(ty: ColumnType, text: &str) -> Result<Self> {
        let text = text.trim();
        match ty {
            ColumnType::Byte => text
                .parse::<i8>()
                .map(Value::Byte)
                .map_err(|_| malformed(text, ty)),
            ColumnType::Short => text
                .parse::<i16>()
                .map(Value::Short)
                .map_err(|_| malformed(text, ty)),
            ColumnType::Int => text
                .parse::<i32>()
                .map(Value::Int)
                .map_err(|_| malformed(text, ty)),
            ColumnType::Long => text
                .parse::<i64>()
                .map(Value::Long)
                .map_err(|_| malformed(text, ty)),
            ColumnType::Float => text
                .parse::<f32>()
                .map(Value::Float)
                .map_err(|_| malformed(text, ty)),
            ColumnType::Double => text
                .parse::<f64>()
                .map(Value::Double)
                .map_err(|_| malformed(text, ty)),
            ColumnType::DateTime => NaiveDateTime::parse_from_str(text, DATETIME_FORMAT)
                .map(|dt| Value::DateTime(dt.and_utc().timestamp_millis()))
                .map_err(|_| malformed(text, ty)),
            ColumnType::Date => NaiveDate::parse_from_str(text, DATE_FORMAT)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|dt| Value::Date(dt.and_utc().timestamp_millis()))
                .ok_or_else(|| malformed(text, ty)),
            ColumnType::Char(n) => {
                if text.len() > n as usize {
                    return Err(Error::MalformedLiteral(format!(
                        "'{}' is longer than char({})",
                        text, n
                    )));
                }
                let mut padded = String::with_capacity(n as usize);
                padded.push_str(text);
                while padded.len() < n as usize {
                    padded.push('\0');
                }
                Ok(Value::Char(padded))
            }
            ColumnType::Varchar(n) => {
                if text.len() > n as usize {
                    return Err(Error::MalformedLiteral(format!(
                        "'{}' is longer than varchar({})",
                        text, n
                    )));
                }
                Ok(Value::Varchar(text.to_string()))
            }
        }
    }

    /// The sentinel that stands in for SQL NULL for the given type.
    pub fn null_sentinel(ty: ColumnType) -> Self {
        match ty {
            ColumnType::Byte => Value::Byte(i8::MIN),
            ColumnType::Short => Value::Short(i16::MIN),
            ColumnType::Int => Value::Int(i32::MIN),
            ColumnType::Long => Value::Long(i64::MIN),
            ColumnType::Float => Value::Float(f32::MIN),
            ColumnType::Double => Value::Double(f64::MIN),
            ColumnType::DateTime => Value::DateTime(i64::MIN),
            ColumnType::Date => Value::Date(i64::MIN),
            ColumnType::Char(n) => Value::Char("\0".repeat(n as usize)),
            ColumnType::Varchar(_) => Value::Varchar(String::new()),
        }
    }

    /// Total order between values. Same-type comparisons follow the
    /// native ordering of the decoded value; mixed types order by a
    /// fixed variant rank.
    pub fn compare(&self, other: &Value) -> Ordering {
        use Value::*;
        match (self, other) {
            (Byte(a), Byte(b)) => a.cmp(b),
            (Short(a), Short(b)) => a.cmp(b),
            (Int(a), Int(b)) => a.cmp(b),
            (Long(a), Long(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Double(a), Double(b)) => a.total_cmp(b),
            (DateTime(a), DateTime(b)) => a.cmp(b),
            (Date(a), Date(b)) => a.cmp(b),
            (Char(a), Char(b)) => a.as_bytes().cmp(b.as_bytes()),
            (Varchar(a), Varchar(b)) => a.as_bytes().cmp(b.as_bytes()),
            _ => self.type_rank().cmp(&other.type_rank()),
        }
    }

    /// Formats a value for tabular output. Calendar conversion and char
    /// padding removal happen here and nowhere else.
    pub fn display_text(&self) -> String {
        match self {
            Value::Byte(v) => v.to_string(),
            Value::Short(v) => v.to_string(),
            Value::Int(v) => v.to_string(),
            Value::Long(v) => v.to_string(),
            Value::Float(v) => v.to_string(),
            Value::Double(v) => v.to_string(),
            Value::DateTime(ms) => format_millis(*ms, DATETIME_FORMAT),
            Value::Date(ms) => format_millis(*ms, DATE_FORMAT),
            Value::Char(s) => s.trim_end_matches('\0').to_string(),
            Value::Varchar(s) => s.clone(),
        }
    }

    fn type_rank(&self) -> u8 {
        match self {
            Value::Byte(_) => 0,
            Value::Short(_) => 1,
            Value::Int(_) => 2,
            Value::Long(_) => 3,
            Value::Float(_) => 4,
            Value::Double(_) => 5,
            Value::DateTime(_) => 6,
            Value::Date(_) => 7,
            Value::Char(_) => 8,
            Value::Varchar(_) => 9,
        }
    }
}

fn malformed(text: &str, ty: ColumnType) -> Error {
    Error::MalformedLiteral(format!("'{}' is not a valid {}", text, ty))
}

fn format_millis(ms: i64, format: &str) -> String {
    match DateTime::from_timestamp_millis(ms) {
        Some(dt) => dt.naive_utc().format(format).to_string(),
        // Out of chrono's range (e.g. the i64::MIN sentinel): show raw millis.
        None => ms.to_string(),
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}
