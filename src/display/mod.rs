//! Display formatting for terminal output
//!
//! Provides utilities for rendering the statement and summary reports.

pub mod report;
pub mod transaction;

pub use report::{format_bar, format_percentage, month_name, separator};
pub use transaction::{format_statement, format_transaction_row};
