//! # Data Directory Layout
//!
//! Path derivation for the file-per-table architecture. Every schema gets
//! a directory under the data root; every table gets one heap file and one
//! index file per column:
//!
//! ```text
//! data/
//! ├── information_schema/
//! │   ├── information_schema.schemata.tbl
//! │   ├── information_schema.tables.tbl
//! │   └── information_schema.columns.tbl
//! └── shop/
//!     ├── shop.items.tbl
//!     ├── shop.items.id.ndx
//!     └── shop.items.price.ndx
//! ```
//!
//! The catalog's own heap files carry no index files; that asymmetry is
//! part of the bootstrap design. Identifier matching is case-insensitive
//! throughout the engine, so path components are lowercased here to keep
//! `CREATE SCHEMA Shop` and `USE shop` resolving to the same directory on
//! case-sensitive filesystems.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{INDEX_FILE_EXTENSION, TABLE_FILE_EXTENSION};
use crate::error::Result;

/// Derives every on-disk path from the data root. Cheap to clone; holds
/// no open handles.
#[derive(Debug, Clone)]
pub struct Layout {
    data_dir: PathBuf,
}

impl Layout {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn schema_dir(&self, schema: &str) -> PathBuf {
        self.data_dir.join(schema.to_lowercase())
    }

    /// Heap file: `<schema>/<schema>.<table>.tbl`.
    pub fn table_file(&self, schema: &str, table: &str) -> PathBuf {
        self.schema_dir(schema).join(format!(
            "{}.{}.{}",
            schema.to_lowercase(),
            table.to_lowercase(),
            TABLE_FILE_EXTENSION
        ))
    }

    /// Index file: `<schema>/<schema>.<table>.<column>.ndx`.
    pub fn index_file(&self, schema: &str, table: &str, column: &str) -> PathBuf {
        self.schema_dir(schema).join(format!(
            "{}.{}.{}.{}",
            schema.to_lowercase(),
            table.to_lowercase(),
            column.to_lowercase(),
            INDEX_FILE_EXTENSION
        ))
    }

    /// Creates the schema's directory (and the data root) if absent.
    pub fn create_schema_dir(&self, schema: &str) -> Result<()> {
        fs::create_dir_all(self.schema_dir(schema))?;
        Ok(())
    }

    /// Creates an empty file if none exists; an existing file is left
    /// untouched.
    pub fn create_empty_file(path: &Path) -> Result<()> {
        fs::OpenOptions::new().create(true).append(true).open(path)?;
        Ok(())
    }
}
