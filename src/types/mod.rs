//! # Type System
//!
//! The shared type layer: `ColumnType` (catalog-declared types), `Value`
//! (runtime values), the binary codec, and the predicate operators. All
//! three stores (heap, index, catalog) and the query executor dispatch on
//! these types; none of them reimplements per-type logic.

pub mod codec;
pub mod column_type;
pub mod value;

pub use column_type::ColumnType;
pub use value::{is_null_literal, Value};

use std::cmp::Ordering;
use std::fmt;

use crate::error::{Error, Result};

/// The six predicate operators a `selectWhere` request may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl FilterOp {
    /// Parses the operator token of a predicate. Anything else is a
    /// malformed predicate from the front end.
    pub fn parse(text: &str) -> Result<Self> {
        match text.trim() {
            "=" => Ok(FilterOp::Eq),
            "<>" => Ok(FilterOp::Ne),
            "<" => Ok(FilterOp::Lt),
            "<=" => Ok(FilterOp::Le),
            ">" => Ok(FilterOp::Gt),
            ">=" => Ok(FilterOp::Ge),
            other => Err(Error::SyntaxRejected(format!(
                "unsupported operator '{}'",
                other
            ))),
        }
    }

    /// Whether a key with the given ordering relative to the literal
    /// satisfies this operator.
    pub fn matches(&self, ord: Ordering) -> bool {
        match self {
            FilterOp::Eq => ord == Ordering::Equal,
            FilterOp::Ne => ord != Ordering::Equal,
            FilterOp::Lt => ord == Ordering::Less,
            FilterOp::Le => ord != Ordering::Greater,
            FilterOp::Gt => ord == Ordering::Greater,
            FilterOp::Ge => ord != Ordering::Less,
        }
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FilterOp::Eq => "=",
            FilterOp::Ne => "<>",
            FilterOp::Lt => "<",
            FilterOp::Le => "<=",
            FilterOp::Gt => ">",
            FilterOp::Ge => ">=",
        };
        write!(f, "{}", s)
    }
}
