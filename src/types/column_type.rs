//! # Column Type System
//!
//! The canonical `ColumnType` enum, used across the catalog, the codec,
//! and query evaluation. One closed enum replaces per-operation type-name
//! string matching: every encode/decode/compare decision dispatches on a
//! variant.
//!
//! ## Type Table
//!
//! | Type | Storage | Size |
//! |------|---------|------|
//! | Byte | big-endian i8 | 1 |
//! | Short | big-endian i16 | 2 |
//! | Int | big-endian i32 | 4 |
//! | Long | big-endian i64 | 8 |
//! | Float | big-endian f32 bits | 4 |
//! | Double | big-endian f64 bits | 8 |
//! | DateTime | epoch millis, big-endian i64 | 8 |
//! | Date | epoch millis, big-endian i64 | 8 |
//! | Char(n) | exactly n bytes, `\0`-padded | n |
//! | Varchar(n) | 1-byte length prefix + bytes | 1 + len |
//!
//! Type text is parsed case-insensitively; `SHORT`/`SHORT INT` and
//! `LONG`/`LONG INT` are aliases, matching the command surface. The
//! canonical display form (`short int`, `varchar(32)`, ...) is what the
//! catalog's `COLUMN_TYPE` column stores.

use std::fmt;

use crate::config::MAX_VARCHAR_LEN;
use crate::error::{Error, Result};

/// Canonical column type. Length parameters live on the variant so a
/// `ColumnType` value alone fully determines the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    DateTime,
    Date,
    Char(u16),
    Varchar(u16),
}

impl ColumnType {
    /// Parses a type declaration such as `"VARCHAR(32)"` or `"SHORT INT"`.
    /// Matching is case-insensitive; surrounding and internal whitespace is
    /// normalized. Unrecognized tokens are a validation error, never a
    /// silent default.
    pub fn parse(text: &str) -> Result<Self> {
        let normalized = text
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_ascii_lowercase();

        match normalized.as_str() {
            "byte" => Ok(ColumnType::Byte),
            "short" | "short int" => Ok(ColumnType::Short),
            "int" => Ok(ColumnType::Int),
            "long" | "long int" => Ok(ColumnType::Long),
            "float" => Ok(ColumnType::Float),
            "double" => Ok(ColumnType::Double),
            "datetime" => Ok(ColumnType::DateTime),
            "date" => Ok(ColumnType::Date),
            other => {
                if let Some(n) = parse_length(other, "char") {
                    return Ok(ColumnType::Char(n?));
                }
                if let Some(n) = parse_length(other, "varchar") {
                    let n = n?;
                    if n > MAX_VARCHAR_LEN {
                        return Err(Error::SyntaxRejected(format!(
                            "varchar({}) exceeds the maximum length of {}",
                            n, MAX_VARCHAR_LEN
                        )));
                    }
                    return Ok(ColumnType::Varchar(n));
                }
                Err(Error::SyntaxRejected(format!(
                    "unsupported column type '{}'",
                    text.trim()
                )))
            }
        }
    }

    /// Encoded size in bytes, or `None` for the one variable-width type.
    pub fn fixed_size(&self) -> Option<usize> {
        match self {
            ColumnType::Byte => Some(1),
            ColumnType::Short => Some(2),
            ColumnType::Int => Some(4),
            ColumnType::Long | ColumnType::DateTime | ColumnType::Date => Some(8),
            ColumnType::Float => Some(4),
            ColumnType::Double => Some(8),
            ColumnType::Char(n) => Some(*n as usize),
            ColumnType::Varchar(_) => None,
        }
    }

    /// True for `Char(n)` and `Varchar(n)`.
    pub fn is_text(&self) -> bool {
        matches!(self, ColumnType::Char(_) | ColumnType::Varchar(_))
    }
}

fn parse_length(normalized: &str, keyword: &str) -> Option<Result<u16>> {
    let rest = normalized.strip_prefix(keyword)?.trim();
    let inner = rest.strip_prefix('(')?.strip_suffix(')')?.trim();
    Some(match inner.parse::<u16>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(Error::SyntaxRejected(format!(
            "invalid {} length '{}'",
            keyword, inner
        ))),
    })
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Byte => write!(f, "byte"),
            ColumnType::Short => write!(f, "short int"),
            ColumnType::Int => write!(f, "int"),
            ColumnType::Long => write!(f, "long int"),
            ColumnType::Float => write!(f, "float"),
            ColumnType::Double => write!(f, "double"),
            ColumnType::DateTime => write!(f, "datetime"),
            ColumnType::Date => write!(f, "date"),
            ColumnType::Char(n) => write!(f, "char({})", n),
            ColumnType::Varchar(n) => write!(f, "varchar({})", n),
        }
    }
}
