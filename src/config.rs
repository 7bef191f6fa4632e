//! # Configuration Constants
//!
//! This module centralizes the names and limits that define WrenDB's
//! on-disk layout. The file-naming constants are load-bearing: heap and
//! index files are located purely by convention
//! (`<schema>/<schema>.<table>.tbl`, `<schema>/<schema>.<table>.<column>.ndx`),
//! so every component that touches the filesystem derives paths from the
//! same constants.
//!
//! ## Usage
//!
//! Import constants from this module rather than defining them locally:
//!
//! ```ignore
//! use crate::config::{TABLE_FILE_EXTENSION, SYSTEM_SCHEMA};
//! ```

/// Extension for heap (row) files.
pub const TABLE_FILE_EXTENSION: &str = "tbl";

/// Extension for per-column index files.
pub const INDEX_FILE_EXTENSION: &str = "ndx";

/// The built-in schema whose tables describe all schemas, tables, and
/// columns. Always exists, never droppable.
pub const SYSTEM_SCHEMA: &str = "information_schema";

/// Default data directory when none is given on the command line.
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Upper bound on a `VARCHAR(n)` declaration. Values are stored with a
/// one-byte length prefix, so n can never exceed 255.
pub const MAX_VARCHAR_LEN: u16 = 255;

/// Catalog name columns are `varchar(64)`; schema/table/column identifiers
/// must fit.
pub const MAX_IDENTIFIER_LEN: usize = 64;

/// Environment variable overriding the REPL history file location.
pub const HISTORY_ENV_VAR: &str = "WRENDB_HISTORY";

/// Default REPL history file name (under `$HOME`).
pub const DEFAULT_HISTORY_FILE: &str = ".wrendb_history";
