//! # Session Context
//!
//! The active schema is per-session state, owned by the caller and
//! threaded through every table-resolving request — not a process-wide
//! global. A fresh session starts in `information_schema`; only a
//! successful `use_schema` moves it, so the stored spelling is always a
//! schema the catalog has verified.

use crate::config::SYSTEM_SCHEMA;

/// Per-caller request context. Cheap to create; holds no file handles.
#[derive(Debug, Clone)]
pub struct Session {
    active_schema: String,
}

impl Session {
    /// A new session, positioned in the system schema.
    pub fn new() -> Self {
        Self {
            active_schema: SYSTEM_SCHEMA.to_string(),
        }
    }

    /// The schema that unqualified table names resolve against.
    pub fn active_schema(&self) -> &str {
        &self.active_schema
    }

    /// Only `Database::use_schema` switches the active schema, after the
    /// catalog has confirmed it exists; it passes the stored spelling.
    pub(crate) fn set_active_schema(&mut self, canonical: String) {
        self.active_schema = canonical;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
