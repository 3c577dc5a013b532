//! Core data models for pocket-ledger
//!
//! This module contains the data structures of the ledger domain: money
//! amounts, entry kinds and categories, transactions and the ledger itself.

pub mod category;
pub mod ledger;
pub mod money;
pub mod transaction;

pub use category::{Category, CategoryParseError, ExpenseCategory, IncomeCategory, Kind};
pub use ledger::Ledger;
pub use money::{Money, MoneyParseError};
pub use transaction::{Transaction, TransactionValidationError};
