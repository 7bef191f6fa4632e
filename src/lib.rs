//! # WrenDB — File-Backed Relational Engine
//!
//! WrenDB is a single-node, file-backed relational storage engine with a
//! minimal SQL-like command surface. It persists schemas, tables, and
//! rows as custom binary files, maintains one sorted secondary index per
//! column, and answers point and range queries by scanning those indexes.
//!
//! ## Quick Start
//!
//! ```ignore
//! use wrendb::{ColumnSpec, Database};
//!
//! let db = Database::open("./data")?;
//! let mut session = db.session();
//!
//! db.create_schema("shop")?;
//! db.use_schema(&mut session, "shop")?;
//! db.create_table(&session, "items", &[
//!     ColumnSpec::new("id", "int").primary_key(),
//!     ColumnSpec::new("price", "float"),
//! ])?;
//! db.insert_row(&session, "items", &["1".into(), "9.99".into()])?;
//!
//! let result = db.select_where(&session, "items", "price", ">", "5")?;
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │     Front End (statement parser)     │   cli
//! ├─────────────────────────────────────┤
//! │     Request API (Database)           │   database
//! ├───────────────────┬─────────────────┤
//! │      Catalog      │     Session     │   catalog, session
//! ├───────────────────┴─────────────────┤
//! │   Heap Store   │    Index Store     │   storage
//! ├─────────────────────────────────────┤
//! │      Type Codec (Value layer)        │   types
//! └─────────────────────────────────────┘
//! ```
//!
//! ## File Layout
//!
//! One directory per schema; one heap file per table plus one index file
//! per column:
//!
//! ```text
//! data/
//! ├── information_schema/               # the self-describing catalog
//! │   ├── information_schema.schemata.tbl
//! │   ├── information_schema.tables.tbl
//! │   └── information_schema.columns.tbl
//! └── shop/
//!     ├── shop.items.tbl                # rows, append-only
//!     ├── shop.items.id.ndx             # per-column sorted index
//!     └── shop.items.price.ndx
//! ```
//!
//! ## Execution Model
//!
//! Single-threaded, single-client, synchronous: every request runs to
//! completion before the next is accepted, and files are opened and
//! closed within the scope of one request. The active schema lives in an
//! explicit [`Session`] owned by the caller.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod session;
pub mod storage;
pub mod types;

pub use catalog::{Catalog, ColumnDescriptor};
pub use database::{ColumnSpec, Database, QueryResult};
pub use error::{Error, Result};
pub use session::Session;
pub use types::{ColumnType, FilterOp, Value};

/// Current version of WrenDB.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
