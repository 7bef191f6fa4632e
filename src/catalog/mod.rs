//! # Catalog
//!
//! The self-describing system schema. Three fixed tables under
//! `information_schema` record every schema, table, and column:
//!
//! - `SCHEMATA` — one row per schema
//! - `TABLES` — one row per table with its cached row count
//! - `COLUMNS` — one row per column: name, ordinal, type, nullability,
//!   key-ness
//!
//! The catalog is the single source of truth for column order, type,
//! nullability, and primary-key flags; every encode/decode decision in
//! the engine starts with a lookup here.
//!
//! ## Access Pattern
//!
//! Lookups are linear scans over the catalog's own heap files, filtered
//! by case-insensitive name equality. The catalog has no indexes on
//! itself; its size is proportional to the number of tables and columns,
//! not rows, so scans stay small.
//!
//! ## Row Counts
//!
//! `TABLE_ROWS` is a denormalized counter. It is updated by overwriting
//! the 8-byte field in place at the offset discovered while scanning the
//! TABLES heap — never by rewriting the file and never through a
//! hard-coded byte offset. Creating a schema bumps SCHEMATA's count,
//! creating a table bumps TABLES' count plus COLUMNS' count per column,
//! and inserting a row bumps the target table's own count.

pub mod bootstrap;

use std::fs::{self, OpenOptions};
use std::io::{Cursor, Seek, SeekFrom, Write};
use std::path::PathBuf;

use tracing::debug;

use crate::config::SYSTEM_SCHEMA;
use crate::error::{Error, Result};
use crate::storage::{heap, Layout};
use crate::types::{codec, ColumnType, Value};

pub use bootstrap::{COLUMNS_TABLE, SCHEMATA_TABLE, TABLES_TABLE};

/// One column's metadata, as recorded in the COLUMNS table. Immutable
/// once its table is created.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDescriptor {
    name: String,
    column_type: ColumnType,
    ordinal: u32,
    nullable: bool,
    primary_key: bool,
}

impl ColumnDescriptor {
    /// A nullable, non-key column. Ordinals are 1-based and define the
    /// physical field order within a row.
    pub fn new(name: impl Into<String>, column_type: ColumnType, ordinal: u32) -> Self {
        Self {
            name: name.into(),
            column_type,
            ordinal,
            nullable: true,
            primary_key: false,
        }
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Marks the column as the primary key; primary keys are implicitly
    /// NOT NULL.
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    pub fn ordinal(&self) -> u32 {
        self.ordinal
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn is_primary_key(&self) -> bool {
        self.primary_key
    }

    /// The COLUMNS-table row that records this descriptor.
    pub fn to_catalog_row(&self, schema: &str, table: &str) -> Vec<Value> {
        vec![
            Value::Varchar(schema.to_string()),
            Value::Varchar(table.to_string()),
            Value::Varchar(self.name.clone()),
            Value::Int(self.ordinal as i32),
            Value::Varchar(self.column_type.to_string()),
            Value::Varchar(if self.nullable { "YES" } else { "NO" }.to_string()),
            Value::Varchar(if self.primary_key { "PRI" } else { "" }.to_string()),
        ]
    }
}

/// A TABLES-table row plus the discovered location of its counter field.
#[derive(Debug, Clone)]
pub struct TableRecord {
    /// Canonical (as-stored) schema spelling.
    pub schema: String,
    /// Canonical (as-stored) table spelling.
    pub table: String,
    pub row_count: i64,
    /// Byte offset of the TABLE_ROWS field within the TABLES heap file.
    counter_offset: u64,
}

/// Catalog accessor. Holds no open handles; every operation opens the
/// files it needs and releases them before returning.
#[derive(Debug, Clone)]
pub struct Catalog {
    layout: Layout,
}

impl Catalog {
    pub fn new(layout: Layout) -> Self {
        Self { layout }
    }

    /// Initializes the three catalog files if absent. Idempotent.
    pub fn bootstrap(&self) -> Result<bool> {
        bootstrap::bootstrap(&self.layout)
    }

    // -- SCHEMATA ---------------------------------------------------------

    /// All schema names in creation order.
    pub fn list_schemas(&self) -> Result<Vec<String>> {
        let rows = self.read_rows(SCHEMATA_TABLE, &schemata_types())?;
        rows.into_iter()
            .map(|(mut values, _)| take_text(values.remove(0)))
            .collect()
    }

    /// Case-insensitive existence check; returns the stored spelling so
    /// callers resolve paths consistently.
    pub fn schema_exists(&self, name: &str) -> Result<Option<String>> {
        Ok(self
            .list_schemas()?
            .into_iter()
            .find(|stored| stored.eq_ignore_ascii_case(name)))
    }

    /// Records a new schema: one SCHEMATA row, one SCHEMATA count bump,
    /// and the schema's on-disk directory.
    pub fn create_schema(&self, name: &str) -> Result<()> {
        if let Some(existing) = self.schema_exists(name)? {
            return Err(Error::AlreadyExists(format!("schema '{}'", existing)));
        }

        heap::append_row(
            &self.catalog_file(SCHEMATA_TABLE),
            &[Value::Varchar(name.to_string())],
        )?;
        self.increment_row_count(SYSTEM_SCHEMA, SCHEMATA_TABLE)?;
        self.layout.create_schema_dir(name)?;

        debug!(schema = name, "schema recorded in catalog");
        Ok(())
    }

    // -- TABLES -----------------------------------------------------------

    /// Table names of one schema, in creation order.
    pub fn list_tables(&self, schema: &str) -> Result<Vec<String>> {
        let rows = self.read_rows(TABLES_TABLE, &tables_types())?;
        let mut tables = Vec::new();
        for (mut values, _) in rows {
            let row_schema = take_text(values.remove(0))?;
            let table = take_text(values.remove(0))?;
            if row_schema.eq_ignore_ascii_case(schema) {
                tables.push(table);
            }
        }
        Ok(tables)
    }

    /// Locates a table's TABLES row, case-insensitively. The returned
    /// record carries the counter field's byte offset for in-place
    /// updates.
    pub fn find_table(&self, schema: &str, table: &str) -> Result<Option<TableRecord>> {
        let rows = self.read_rows(TABLES_TABLE, &tables_types())?;
        for (mut values, offsets) in rows {
            let row_schema = take_text(values.remove(0))?;
            let row_table = take_text(values.remove(0))?;
            if row_schema.eq_ignore_ascii_case(schema) && row_table.eq_ignore_ascii_case(table) {
                return Ok(Some(TableRecord {
                    schema: row_schema,
                    table: row_table,
                    row_count: take_long(values.remove(0))?,
                    counter_offset: offsets[2],
                }));
            }
        }
        Ok(None)
    }

    /// Records a new table: one TABLES row (count 0), an empty heap file,
    /// and per column one COLUMNS row plus an empty index file. The
    /// TABLES and COLUMNS counts are bumped alongside.
    pub fn create_table(
        &self,
        schema: &str,
        table: &str,
        columns: &[ColumnDescriptor],
    ) -> Result<()> {
        if let Some(existing) = self.find_table(schema, table)? {
            return Err(Error::AlreadyExists(format!(
                "table '{}' in schema '{}'",
                existing.table, existing.schema
            )));
        }

        heap::append_row(
            &self.catalog_file(TABLES_TABLE),
            &[
                Value::Varchar(schema.to_string()),
                Value::Varchar(table.to_string()),
                Value::Long(0),
            ],
        )?;
        self.increment_row_count(SYSTEM_SCHEMA, TABLES_TABLE)?;

        Layout::create_empty_file(&self.layout.table_file(schema, table))?;

        let columns_path = self.catalog_file(COLUMNS_TABLE);
        for column in columns {
            heap::append_row(&columns_path, &column.to_catalog_row(schema, table))?;
            self.increment_row_count(SYSTEM_SCHEMA, COLUMNS_TABLE)?;
            Layout::create_empty_file(&self.layout.index_file(schema, table, column.name()))?;
        }

        debug!(
            schema,
            table,
            columns = columns.len(),
            "table recorded in catalog"
        );
        Ok(())
    }

    /// Overwrites the cached row count in place: the 8-byte TABLE_ROWS
    /// field at the offset discovered during the TABLES scan. The file is
    /// never rewritten.
    pub fn increment_row_count(&self, schema: &str, table: &str) -> Result<()> {
        let record = self.find_table(schema, table)?.ok_or_else(|| {
            Error::NotFound(format!("table '{}' in schema '{}'", table, schema))
        })?;

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(self.catalog_file(TABLES_TABLE))?;
        file.seek(SeekFrom::Start(record.counter_offset))?;
        file.write_all(&(record.row_count + 1).to_be_bytes())?;
        Ok(())
    }

    // -- COLUMNS ----------------------------------------------------------

    /// The ordered column descriptors of a table, sorted by ordinal.
    pub fn columns_of(&self, schema: &str, table: &str) -> Result<Vec<ColumnDescriptor>> {
        let rows = self.read_rows(COLUMNS_TABLE, &columns_types())?;
        let mut columns = Vec::new();
        for (mut values, _) in rows {
            let row_schema = take_text(values.remove(0))?;
            let row_table = take_text(values.remove(0))?;
            if !row_schema.eq_ignore_ascii_case(schema) || !row_table.eq_ignore_ascii_case(table) {
                continue;
            }

            let name = take_text(values.remove(0))?;
            let ordinal = take_int(values.remove(0))? as u32;
            let type_text = take_text(values.remove(0))?;
            let nullable = take_text(values.remove(0))?.eq_ignore_ascii_case("YES");
            let key = take_text(values.remove(0))?;

            let mut descriptor =
                ColumnDescriptor::new(name, ColumnType::parse(&type_text)?, ordinal);
            if !nullable {
                descriptor = descriptor.not_null();
            }
            if key.eq_ignore_ascii_case("PRI") {
                descriptor = descriptor.primary_key();
            }
            columns.push(descriptor);
        }

        columns.sort_by_key(|c| c.ordinal());
        Ok(columns)
    }

    // -- internals --------------------------------------------------------

    fn catalog_file(&self, table: &str) -> PathBuf {
        self.layout.table_file(SYSTEM_SCHEMA, table)
    }

    /// Decodes every row of a catalog file, recording the byte offset of
    /// each field. Catalog files are small (proportional to table/column
    /// counts), so reading them whole is fine.
    fn read_rows(
        &self,
        table: &str,
        types: &[ColumnType],
    ) -> Result<Vec<(Vec<Value>, Vec<u64>)>> {
        let bytes = fs::read(self.catalog_file(table))?;
        let len = bytes.len() as u64;
        let mut cursor = Cursor::new(bytes);

        let mut rows = Vec::new();
        while cursor.position() < len {
            let mut offsets = Vec::with_capacity(types.len());
            let mut values = Vec::with_capacity(types.len());
            for ty in types {
                offsets.push(cursor.position());
                values.push(codec::decode(*ty, &mut cursor)?);
            }
            rows.push((values, offsets));
        }
        Ok(rows)
    }
}

fn schemata_types() -> Vec<ColumnType> {
    bootstrap::schemata_columns()
        .iter()
        .map(|c| c.column_type())
        .collect()
}

fn tables_types() -> Vec<ColumnType> {
    bootstrap::tables_columns()
        .iter()
        .map(|c| c.column_type())
        .collect()
}

fn columns_types() -> Vec<ColumnType> {
    bootstrap::columns_columns()
        .iter()
        .map(|c| c.column_type())
        .collect()
}

fn take_text(value: Value) -> Result<String> {
    match value {
        Value::Char(s) | Value::Varchar(s) => Ok(s),
        other => Err(corrupt("string", &other)),
    }
}

fn take_int(value: Value) -> Result<i32> {
    match value {
        Value::Int(v) => Ok(v),
        other => Err(corrupt("int", &other)),
    }
}

fn take_long(value: Value) -> Result<i64> {
    match value {
        Value::Long(v) => Ok(v),
        other => Err(corrupt("long", &other)),
    }
}

fn corrupt(expected: &str, got: &Value) -> Error {
    Error::Io(std::io::Error::new(
        std::io::ErrorKind::InvalidData,
        format!("catalog field should be a {}, found {:?}", expected, got),
    ))
}
