//! # Command-Line Interface
//!
//! The interactive front end, kept strictly outside the engine: it
//! tokenizes command text into typed statements, drives the request API,
//! and renders tabular results. The engine performs no text tokenizing of
//! its own beyond per-value type conversion.

pub mod history;
pub mod repl;
pub mod statement;
pub mod table;

pub use repl::Repl;
pub use statement::Statement;
