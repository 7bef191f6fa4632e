//! # Catalog Bootstrap
//!
//! The catalog describes every table's layout, including its own, but it
//! cannot be queried into existence from an empty data directory. This
//! module is the one place where table layout is hand-built rather than
//! catalog-driven: it hard-codes the column lists of the three system
//! tables and writes their initial rows directly with the codec.
//!
//! Everything above this layer (lookups, DDL bookkeeping, selects against
//! `information_schema`) goes through the generic catalog-driven path;
//! once these files exist, the COLUMNS table describes SCHEMATA, TABLES,
//! COLUMNS, and every user table uniformly.
//!
//! ## Initial State
//!
//! ```text
//! SCHEMATA   1 row   (information_schema)
//! TABLES     3 rows  (SCHEMATA=1, TABLES=3, COLUMNS=11)
//! COLUMNS   11 rows  (the column descriptors of the three tables above)
//! ```

use tracing::info;

use crate::catalog::ColumnDescriptor;
use crate::config::SYSTEM_SCHEMA;
use crate::error::Result;
use crate::storage::{heap, Layout};
use crate::types::{ColumnType, Value};

/// Catalog table holding one row per schema.
pub const SCHEMATA_TABLE: &str = "SCHEMATA";

/// Catalog table holding one row per table, including the cached row count.
pub const TABLES_TABLE: &str = "TABLES";

/// Catalog table holding one row per column of every table.
pub const COLUMNS_TABLE: &str = "COLUMNS";

/// `SCHEMATA(SCHEMA_NAME varchar(64))`
pub fn schemata_columns() -> Vec<ColumnDescriptor> {
    vec![ColumnDescriptor::new("SCHEMA_NAME", ColumnType::Varchar(64), 1).not_null()]
}

/// `TABLES(TABLE_SCHEMA varchar(64), TABLE_NAME varchar(64), TABLE_ROWS long int)`
pub fn tables_columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::new("TABLE_SCHEMA", ColumnType::Varchar(64), 1).not_null(),
        ColumnDescriptor::new("TABLE_NAME", ColumnType::Varchar(64), 2).not_null(),
        ColumnDescriptor::new("TABLE_ROWS", ColumnType::Long, 3).not_null(),
    ]
}

/// `COLUMNS(TABLE_SCHEMA, TABLE_NAME, COLUMN_NAME, ORDINAL_POSITION,
/// COLUMN_TYPE, IS_NULLABLE, COLUMN_KEY)`
pub fn columns_columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::new("TABLE_SCHEMA", ColumnType::Varchar(64), 1).not_null(),
        ColumnDescriptor::new("TABLE_NAME", ColumnType::Varchar(64), 2).not_null(),
        ColumnDescriptor::new("COLUMN_NAME", ColumnType::Varchar(64), 3).not_null(),
        ColumnDescriptor::new("ORDINAL_POSITION", ColumnType::Int, 4).not_null(),
        ColumnDescriptor::new("COLUMN_TYPE", ColumnType::Varchar(64), 5).not_null(),
        ColumnDescriptor::new("IS_NULLABLE", ColumnType::Varchar(3), 6).not_null(),
        ColumnDescriptor::new("COLUMN_KEY", ColumnType::Varchar(3), 7).not_null(),
    ]
}

/// True once all three catalog files exist.
pub fn is_bootstrapped(layout: &Layout) -> bool {
    [SCHEMATA_TABLE, TABLES_TABLE, COLUMNS_TABLE]
        .iter()
        .all(|table| layout.table_file(SYSTEM_SCHEMA, table).exists())
}

/// Creates the catalog from scratch if any of its three files is absent.
/// Returns true if the catalog was (re)initialized. A partially present
/// catalog is unusable, so all three files are rewritten together.
pub fn bootstrap(layout: &Layout) -> Result<bool> {
    if is_bootstrapped(layout) {
        return Ok(false);
    }

    layout.create_schema_dir(SYSTEM_SCHEMA)?;

    let system_tables = [
        (SCHEMATA_TABLE, schemata_columns()),
        (TABLES_TABLE, tables_columns()),
        (COLUMNS_TABLE, columns_columns()),
    ];

    // SCHEMATA starts with the system schema itself.
    let schemata_path = layout.table_file(SYSTEM_SCHEMA, SCHEMATA_TABLE);
    std::fs::write(&schemata_path, b"")?;
    heap::append_row(
        &schemata_path,
        &[Value::Varchar(SYSTEM_SCHEMA.to_string())],
    )?;

    // TABLES gets one row per system table with its final bootstrap count:
    // SCHEMATA holds 1 row, TABLES holds 3, COLUMNS holds the sum of the
    // three column lists.
    let tables_path = layout.table_file(SYSTEM_SCHEMA, TABLES_TABLE);
    std::fs::write(&tables_path, b"")?;
    let columns_total: usize = system_tables.iter().map(|(_, cols)| cols.len()).sum();
    for (table, _) in &system_tables {
        let row_count = match *table {
            SCHEMATA_TABLE => 1,
            TABLES_TABLE => system_tables.len() as i64,
            _ => columns_total as i64,
        };
        heap::append_row(
            &tables_path,
            &[
                Value::Varchar(SYSTEM_SCHEMA.to_string()),
                Value::Varchar(table.to_string()),
                Value::Long(row_count),
            ],
        )?;
    }

    // COLUMNS gets one row per column of each system table.
    let columns_path = layout.table_file(SYSTEM_SCHEMA, COLUMNS_TABLE);
    std::fs::write(&columns_path, b"")?;
    for (table, columns) in &system_tables {
        for column in columns {
            heap::append_row(&columns_path, &column.to_catalog_row(SYSTEM_SCHEMA, table))?;
        }
    }

    info!(schema = SYSTEM_SCHEMA, "catalog initialized");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bootstrap_runs_once_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let layout = Layout::new(dir.path());

        assert!(bootstrap(&layout).unwrap());
        assert!(is_bootstrapped(&layout));
        assert!(!bootstrap(&layout).unwrap());
    }

    #[test]
    fn a_missing_catalog_file_triggers_reinitialization() {
        let dir = tempfile::tempdir().unwrap();
        let layout = Layout::new(dir.path());
        bootstrap(&layout).unwrap();

        std::fs::remove_file(layout.table_file(SYSTEM_SCHEMA, COLUMNS_TABLE)).unwrap();
        assert!(bootstrap(&layout).unwrap());
        assert!(is_bootstrapped(&layout));
    }

    #[test]
    fn the_columns_table_describes_eleven_columns() {
        let total =
            schemata_columns().len() + tables_columns().len() + columns_columns().len();
        assert_eq!(total, 11);
    }
}
