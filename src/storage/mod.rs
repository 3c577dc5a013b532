//! Storage layer for pocket-ledger
//!
//! Provides the `;`-separated ledger table with atomic whole-file rewrites,
//! permissive date normalization on read and automatic directory creation.

pub mod dates;
pub mod file_io;
pub mod ledger;
pub mod table;

pub use dates::normalize_date;
pub use file_io::{read_json, write_atomic, write_json_atomic};
pub use ledger::LedgerStore;

use crate::audit::AuditLogger;
use crate::config::paths::LedgerPaths;
use crate::error::LedgerError;

/// Main storage coordinator tying the ledger store to its paths
pub struct Storage {
    paths: LedgerPaths,
    pub ledger: LedgerStore,
}

impl Storage {
    /// Create a new Storage instance with auditing enabled
    pub fn new(paths: LedgerPaths) -> Result<Self, LedgerError> {
        paths.ensure_directories()?;

        Ok(Self {
            ledger: LedgerStore::new(paths.ledger_file())
                .with_audit(AuditLogger::new(paths.audit_log())),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &LedgerPaths {
        &self.paths
    }

    /// Get the audit logger for this storage
    pub fn audit_logger(&self) -> AuditLogger {
        AuditLogger::new(self.paths.audit_log())
    }
}
