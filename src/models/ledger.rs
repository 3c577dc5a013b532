//! Ledger model
//!
//! The full ordered collection of entries. Entries have no identifier; the
//! ledger keeps them sorted by date, newest first, and a row is addressed
//! only by its position after sorting.

use super::transaction::Transaction;

/// Ordered sequence of transactions, newest first
///
/// Only built through [`Ledger::from_transactions`] and friends, which sort;
/// it has no serde impls that could produce an unsorted one.
///
/// ```compile_fail
/// let _: pocket_ledger::models::Ledger = serde_json::from_str(r#"{"transactions":[]}"#).unwrap();
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from entries in any order
    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        let mut ledger = Self { transactions };
        ledger.sort();
        ledger
    }

    /// Return a new ledger holding every current entry plus `txn`, re-sorted
    pub fn with_appended(&self, txn: Transaction) -> Self {
        let mut transactions = self.transactions.clone();
        transactions.push(txn);
        Self::from_transactions(transactions)
    }

    /// Sort by date descending
    ///
    /// The sort is stable, so entries sharing a date keep their relative
    /// order and sorting an already-sorted ledger changes nothing.
    pub fn sort(&mut self) {
        self.transactions.sort_by(|a, b| b.date.cmp(&a.date));
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.transactions.iter()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Entry at a position of the sorted ledger
    pub fn get(&self, index: usize) -> Option<&Transaction> {
        self.transactions.get(index)
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.transactions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, ExpenseCategory, Kind, Money};
    use chrono::NaiveDate;

    fn expense(description: &str, day: u32) -> Transaction {
        Transaction::new(
            Kind::Expense,
            description,
            Money::from_cents(100),
            Category::Expense(ExpenseCategory::Other),
            NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_sorted_newest_first() {
        let ledger = Ledger::from_transactions(vec![
            expense("a", 3),
            expense("b", 20),
            expense("c", 11),
        ]);

        let days: Vec<_> = ledger.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(days, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_with_appended_leaves_original_untouched() {
        let ledger = Ledger::from_transactions(vec![expense("a", 3)]);
        let updated = ledger.with_appended(expense("b", 9));

        assert_eq!(ledger.len(), 1);
        assert_eq!(updated.len(), 2);
        assert_eq!(updated.get(0).unwrap().description, "b");
    }

    #[test]
    fn test_sort_is_stable_and_idempotent() {
        let mut ledger = Ledger::from_transactions(vec![
            expense("first", 7),
            expense("second", 7),
            expense("older", 1),
        ]);
        let before = ledger.clone();
        ledger.sort();

        assert_eq!(ledger, before);
        assert_eq!(ledger.get(0).unwrap().description, "first");
        assert_eq!(ledger.get(1).unwrap().description, "second");
    }

    #[test]
    fn test_allows_duplicates() {
        let ledger = Ledger::new()
            .with_appended(expense("same", 2))
            .with_appended(expense("same", 2));

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.get(0), ledger.get(1));
    }
}
