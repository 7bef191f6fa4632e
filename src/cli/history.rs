//! # History File Management
//!
//! Resolves the REPL history file location. By default history lives in
//! `~/.wrendb_history`; the `WRENDB_HISTORY` environment variable
//! overrides it, and an empty value disables persistence. rustyline
//! handles the actual file I/O.

use std::env;
use std::path::PathBuf;

use crate::config::{DEFAULT_HISTORY_FILE, HISTORY_ENV_VAR};

pub fn history_path() -> Option<PathBuf> {
    if let Ok(custom_path) = env::var(HISTORY_ENV_VAR) {
        if custom_path.is_empty() {
            return None;
        }
        return Some(PathBuf::from(custom_path));
    }

    home_dir().map(|home| home.join(DEFAULT_HISTORY_FILE))
}

fn home_dir() -> Option<PathBuf> {
    env::var("HOME").ok().map(PathBuf::from)
}
