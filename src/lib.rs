//! pocket-ledger - Personal finance ledger
//!
//! Records income and expense entries in a single `;`-separated table and
//! answers questions about them: balance per kind, net result, totals per
//! category and the running balance over a period.
//!
//! # Architecture
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (money, categories, entries, the ledger)
//! - `storage`: Ledger table storage with atomic rewrites
//! - `reports`: Filtering and aggregation
//! - `services`: The draft entry state machine
//! - `audit`: Audit logging system
//! - `display`, `cli`: Terminal output and command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use pocket_ledger::config::paths::LedgerPaths;
//! use pocket_ledger::reports::{query, LedgerFilter};
//! use pocket_ledger::storage::Storage;
//!
//! let storage = Storage::new(LedgerPaths::new()?)?;
//! let ledger = storage.ledger.ledger()?;
//! let summary = query(&ledger, &LedgerFilter::new(), chrono::Local::now().date_naive());
//! println!("{}", summary.net_result);
//! ```

use std::sync::Once;

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};

/// Filter used when `RUST_LOG` is unset or invalid
pub const DEFAULT_LOG_FILTER: &str = "pocket_ledger=warn";

static TRACING_INIT: Once = Once::new();

/// Install the global tracing subscriber
///
/// Honors `RUST_LOG` as given; without it only warnings from this crate
/// are shown.
/// Calling it more than once is harmless.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_tracing_is_idempotent() {
        super::init_tracing();
        super::init_tracing();
    }
}
