//! Audit logging for ledger mutations
//!
//! Every change to the ledger table (initial creation, appended entries) is
//! recorded in an append-only, line-delimited JSON log next to the settings
//! file.
//!
//! - `AuditEntry`: one record with timestamp, operation, resulting ledger
//!   size and a snapshot of the appended entry.
//! - `AuditLogger`: appends entries to the log and reads them back.

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
