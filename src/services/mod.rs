//! Service layer for pocket-ledger
//!
//! Business logic on top of the storage layer. The draft entry collects an
//! entry field by field and commits it through the ledger store.

pub mod draft;

pub use draft::{CommitOutcome, DraftEntry, DraftState, FieldUpdate};
