//! # Database — the Query Executor
//!
//! The request API the front end calls: one method per user-facing
//! command. Each request is a single transition with commit-or-reject
//! semantics — all validation happens before any file is touched, so a
//! rejected request leaves heap, index, and catalog files exactly as they
//! were. Callers never observe intermediate states.
//!
//! ## Insert Commit Order
//!
//! An insert validates and converts every literal, checks primary-key
//! uniqueness, and updates all in-memory index maps first. Only then does
//! it append the encoded row to the heap, persist every index map, and
//! increment the catalog row count. There is no multi-file atomicity: an
//! I/O failure between those writes leaves the table needing inspection,
//! which the error contract documents rather than hides.
//!
//! ## Resolution
//!
//! Unqualified table names resolve against the session's active schema.
//! All identifier matching is case-insensitive; resolution returns the
//! catalog's stored spelling so derived file paths stay stable.

use std::fs;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::catalog::{Catalog, ColumnDescriptor};
use crate::config::MAX_IDENTIFIER_LEN;
use crate::error::{Error, Result};
use crate::session::Session;
use crate::storage::{heap, index, ColumnIndex, Layout};
use crate::types::{is_null_literal, ColumnType, FilterOp, Value};

/// A tabular request result: header plus rows, already formatted as text.
/// Calendar conversion and char-padding removal happened on the way out
/// of the engine; the front end only aligns and prints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl QueryResult {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// One column of a CREATE TABLE request, as tokenized by the front end.
/// The type text is parsed (case-insensitively) by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: String,
    pub type_text: String,
    pub not_null: bool,
    pub primary_key: bool,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, type_text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_text: type_text.into(),
            not_null: false,
            primary_key: false,
        }
    }

    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }
}

/// The storage engine. Open one per data directory; every request runs
/// to completion before the next is accepted (single-threaded,
/// single-client model — no locking, no suspension points).
#[derive(Debug)]
pub struct Database {
    layout: Layout,
    catalog: Catalog,
}

impl Database {
    /// Opens a data directory, creating it and bootstrapping the catalog
    /// on first use. Reopening an existing directory is a no-op beyond
    /// the bootstrap probe.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let layout = Layout::new(data_dir);
        fs::create_dir_all(layout.data_dir())?;

        let catalog = Catalog::new(layout.clone());
        let initialized = catalog.bootstrap()?;
        info!(
            data_dir = %layout.data_dir().display(),
            initialized,
            "database opened"
        );

        Ok(Self { layout, catalog })
    }

    /// A fresh session for this database, positioned in the system schema.
    pub fn session(&self) -> Session {
        Session::new()
    }

    // -- requests ---------------------------------------------------------

    /// All schema names, one row each.
    pub fn list_schemas(&self) -> Result<QueryResult> {
        let rows = self
            .catalog
            .list_schemas()?
            .into_iter()
            .map(|name| vec![name])
            .collect();
        Ok(QueryResult {
            columns: vec!["SCHEMA_NAME".to_string()],
            rows,
        })
    }

    /// Switches the session's active schema; rejects unknown schemas.
    pub fn use_schema(&self, session: &mut Session, name: &str) -> Result<()> {
        let canonical = self
            .catalog
            .schema_exists(name)?
            .ok_or_else(|| Error::NotFound(format!("schema '{}'", name)))?;
        debug!(schema = %canonical, "active schema switched");
        session.set_active_schema(canonical);
        Ok(())
    }

    /// Table names of the active schema, one row each.
    pub fn list_tables(&self, session: &Session) -> Result<QueryResult> {
        let rows = self
            .catalog
            .list_tables(session.active_schema())?
            .into_iter()
            .map(|name| vec![name])
            .collect();
        Ok(QueryResult {
            columns: vec!["TABLE_NAME".to_string()],
            rows,
        })
    }

    /// Creates a schema: rejected if one with the same name (in any case)
    /// exists.
    pub fn create_schema(&self, name: &str) -> Result<()> {
        validate_identifier(name, "schema")?;
        self.catalog.create_schema(name)?;
        info!(schema = name, "schema created");
        Ok(())
    }

    /// Creates a table in the active schema: one TABLES row, an empty
    /// heap file, and per column one COLUMNS row plus an empty index
    /// file, treated as one unit.
    pub fn create_table(
        &self,
        session: &Session,
        name: &str,
        specs: &[ColumnSpec],
    ) -> Result<()> {
        validate_identifier(name, "table")?;
        if specs.is_empty() {
            return Err(Error::SyntaxRejected(
                "a table needs at least one column".to_string(),
            ));
        }

        let mut columns = Vec::with_capacity(specs.len());
        for (i, spec) in specs.iter().enumerate() {
            validate_identifier(&spec.name, "column")?;
            if specs[..i]
                .iter()
                .any(|prev| prev.name.eq_ignore_ascii_case(&spec.name))
            {
                return Err(Error::SyntaxRejected(format!(
                    "duplicate column '{}'",
                    spec.name
                )));
            }

            let mut descriptor = ColumnDescriptor::new(
                spec.name.clone(),
                ColumnType::parse(&spec.type_text)?,
                (i + 1) as u32,
            );
            if spec.not_null {
                descriptor = descriptor.not_null();
            }
            if spec.primary_key {
                descriptor = descriptor.primary_key();
            }
            columns.push(descriptor);
        }

        self.catalog
            .create_table(session.active_schema(), name, &columns)?;
        info!(
            schema = session.active_schema(),
            table = name,
            columns = columns.len(),
            "table created"
        );
        Ok(())
    }

    /// Inserts one row from textual literals. Missing trailing values are
    /// padded with NULL; more values than columns is rejected outright.
    /// Nothing is written unless every column validates.
    pub fn insert_row(
        &self,
        session: &Session,
        table: &str,
        literals: &[String],
    ) -> Result<()> {
        let record = self.resolve_table(session, table)?;
        let columns = self.catalog.columns_of(&record.schema, &record.table)?;

        if literals.len() > columns.len() {
            return Err(Error::SyntaxRejected(format!(
                "{} values for {} columns of '{}'",
                literals.len(),
                columns.len(),
                record.table
            )));
        }

        let heap_path = self.layout.table_file(&record.schema, &record.table);
        let offset = heap::end_offset(&heap_path)?;
        let offset = u32::try_from(offset).map_err(|_| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::Unsupported,
                "heap file exceeds the 4 GiB range addressable by index postings",
            ))
        })?;

        // Load every column's index up front; all maps are updated in
        // memory and only persisted after the whole row validates.
        let mut indexes = Vec::with_capacity(columns.len());
        for column in &columns {
            let path = self
                .layout
                .index_file(&record.schema, &record.table, column.name());
            indexes.push(ColumnIndex::load(&path, column.column_type())?);
        }

        let mut row = Vec::with_capacity(columns.len());
        for (i, column) in columns.iter().enumerate() {
            // Missing trailing values read as NULL.
            let value = match literals.get(i) {
                Some(text) if !is_null_literal(text) => {
                    Value::parse_literal(column.column_type(), text)?
                }
                _ => {
                    if !column.is_nullable() {
                        return Err(Error::MalformedLiteral(format!(
                            "column '{}' is not nullable",
                            column.name()
                        )));
                    }
                    Value::null_sentinel(column.column_type())
                }
            };

            if column.is_primary_key() && indexes[i].contains_key(&value) {
                return Err(Error::AlreadyExists(format!(
                    "row with primary key {} in table '{}'",
                    value.display_text(),
                    record.table
                )));
            }

            indexes[i].add_posting(value.clone(), offset);
            row.push(value);
        }

        // Commit: heap append, index saves, row-count bump — in that
        // order. No atomicity across the files; see the module docs.
        heap::append_row(&heap_path, &row)?;
        for (column, index) in columns.iter().zip(&indexes) {
            let path = self
                .layout
                .index_file(&record.schema, &record.table, column.name());
            index.save(&path)?;
        }
        self.catalog
            .increment_row_count(&record.schema, &record.table)?;

        debug!(
            schema = %record.schema,
            table = %record.table,
            offset,
            "row inserted"
        );
        Ok(())
    }

    /// All rows of a table in physical insertion order; header only when
    /// the row count is zero.
    pub fn select_all(&self, session: &Session, table: &str) -> Result<QueryResult> {
        let record = self.resolve_table(session, table)?;
        let columns = self.catalog.columns_of(&record.schema, &record.table)?;
        let headers = header_of(&columns);

        if record.row_count == 0 {
            return Ok(QueryResult {
                columns: headers,
                rows: Vec::new(),
            });
        }

        let types = types_of(&columns);
        let heap_path = self.layout.table_file(&record.schema, &record.table);
        let rows = heap::scan_rows(&heap_path, &types, record.row_count as u64)?;

        Ok(QueryResult {
            columns: headers,
            rows: rows.iter().map(|row| format_row(row)).collect(),
        })
    }

    /// Rows whose indexed column satisfies `operator literal`, in
    /// ascending key order (insertion order among equal keys).
    pub fn select_where(
        &self,
        session: &Session,
        table: &str,
        column: &str,
        operator: &str,
        literal: &str,
    ) -> Result<QueryResult> {
        let record = self.resolve_table(session, table)?;
        let columns = self.catalog.columns_of(&record.schema, &record.table)?;

        let target = columns
            .iter()
            .find(|c| c.name().eq_ignore_ascii_case(column))
            .ok_or_else(|| {
                Error::NotFound(format!(
                    "column '{}' in table '{}'",
                    column, record.table
                ))
            })?;

        let op = FilterOp::parse(operator)?;
        let key = Value::parse_literal(target.column_type(), literal)?;

        let index_path =
            self.layout
                .index_file(&record.schema, &record.table, target.name());
        let offsets = index::range_scan_file(&index_path, target.column_type(), op, &key)?;

        let types = types_of(&columns);
        let heap_path = self.layout.table_file(&record.schema, &record.table);
        let offsets: Vec<u64> = offsets.into_iter().map(u64::from).collect();
        let rows = heap::read_rows_at(&heap_path, &offsets, &types)?;

        debug!(
            schema = %record.schema,
            table = %record.table,
            column = target.name(),
            %op,
            matches = rows.len(),
            "predicate scan"
        );

        Ok(QueryResult {
            columns: header_of(&columns),
            rows: rows.iter().map(|row| format_row(row)).collect(),
        })
    }

    // -- internals --------------------------------------------------------

    fn resolve_table(
        &self,
        session: &Session,
        table: &str,
    ) -> Result<crate::catalog::TableRecord> {
        let schema = session.active_schema();
        self.catalog.find_table(schema, table)?.ok_or_else(|| {
            Error::NotFound(format!("table '{}' in schema '{}'", table, schema))
        })
    }
}

fn header_of(columns: &[ColumnDescriptor]) -> Vec<String> {
    columns.iter().map(|c| c.name().to_string()).collect()
}

fn types_of(columns: &[ColumnDescriptor]) -> Vec<ColumnType> {
    columns.iter().map(|c| c.column_type()).collect()
}

fn format_row(row: &[Value]) -> Vec<String> {
    row.iter().map(Value::display_text).collect()
}

fn validate_identifier(name: &str, what: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name.len() <= MAX_IDENTIFIER_LEN
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(Error::SyntaxRejected(format!(
            "invalid {} name '{}'",
            what, name
        )))
    }
}
