//! Reports module for pocket-ledger
//!
//! Filters the ledger by period, category and flags, and computes balances,
//! category breakdowns and the cumulative balance series.

pub mod filter;
pub mod series;
pub mod summary;

pub use filter::LedgerFilter;
pub use series::{CumulativeIter, CumulativeSeries};
pub use summary::{category_breakdown, query, BalanceByKind, LedgerSummary};
