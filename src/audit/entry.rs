//! Audit entry data structures
//!
//! Defines the operations recorded in the audit log and the entry format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Transaction;

/// Types of ledger mutations that are audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// An empty ledger table was created
    Initialize,
    /// An entry was appended
    Create,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Initialize => write!(f, "INITIALIZE"),
            Operation::Create => write!(f, "CREATE"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// Number of entries in the ledger after the operation
    pub ledger_len: usize,

    /// JSON snapshot of the appended entry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,
}

impl AuditEntry {
    /// Entry for a freshly created, empty ledger table
    pub fn initialize() -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Initialize,
            ledger_len: 0,
            after: None,
        }
    }

    /// Entry for an appended transaction
    pub fn create(txn: &Transaction, ledger_len: usize) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Create,
            ledger_len,
            after: serde_json::to_value(txn).ok(),
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} (ledger: {} entries)",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.ledger_len
        );

        if let Some(txn) = self
            .after
            .clone()
            .and_then(|v| serde_json::from_value::<Transaction>(v).ok())
        {
            output.push_str(&format!("\n  {}", txn));
        }

        output
    }
}
