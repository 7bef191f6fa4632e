//! # WrenDB Shell Entry Point
//!
//! ## Usage
//!
//! ```bash
//! # Open (or create) a database in ./data
//! wrendb
//!
//! # Open a specific data directory
//! wrendb ./mydb
//!
//! # Show version / help
//! wrendb --version
//! wrendb --help
//! ```
//!
//! Logging is controlled with `RUST_LOG`, e.g. `RUST_LOG=wrendb=debug`.

use std::env;
use std::path::PathBuf;

use eyre::{bail, Result, WrapErr};
use tracing_subscriber::{fmt, EnvFilter};

use wrendb::cli::Repl;
use wrendb::config::DEFAULT_DATA_DIR;
use wrendb::Database;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let mut data_dir: Option<PathBuf> = None;
    for arg in &args[1..] {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            "--version" | "-v" => {
                println!("wrendb {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            other if other.starts_with('-') => {
                bail!("unknown option: {}", other);
            }
            other => {
                if data_dir.is_some() {
                    bail!("expected at most one data directory argument");
                }
                data_dir = Some(PathBuf::from(other));
            }
        }
    }

    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let data_dir = data_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
    let db = Database::open(&data_dir)
        .wrap_err_with(|| format!("failed to open database at {}", data_dir.display()))?;

    let mut repl = Repl::new(db)?;
    repl.run()
}

fn print_usage() {
    println!("wrendb - a file-backed relational engine");
    println!();
    println!("USAGE:");
    println!("    wrendb [DATA_DIR]");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show this help");
    println!("    -v, --version    Show version");
    println!();
    println!("DATA_DIR defaults to {}.", DEFAULT_DATA_DIR);
}
