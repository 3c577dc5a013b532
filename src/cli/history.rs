//! History CLI command
//!
//! Prints the most recent ledger mutations from the audit log.

use crate::error::LedgerResult;
use crate::storage::Storage;

/// Handle `history`
pub fn handle_history_command(storage: &Storage, limit: usize) -> LedgerResult<()> {
    let entries = storage.audit_logger().read_recent(limit)?;
    if entries.is_empty() {
        println!("No changes recorded.");
        return Ok(());
    }

    for entry in entries.iter().rev() {
        println!("{}", entry.format_human_readable());
    }
    Ok(())
}
