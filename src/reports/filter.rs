//! Ledger filter
//!
//! Selects the entries a summary is computed from: by month of the year, by
//! category label and by the recurring/credit flags.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Ledger, Transaction};

/// Criteria restricting which entries a summary considers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerFilter {
    /// Months of the year (1-12); empty means the month of "today"
    pub months: BTreeSet<u32>,
    /// Category labels, matched against either label form; empty means all
    pub categories: BTreeSet<String>,
    /// Keep only recurring entries
    pub recurring_only: bool,
    /// Keep entries made on credit
    pub include_credit: bool,
}

impl Default for LedgerFilter {
    fn default() -> Self {
        Self {
            months: BTreeSet::new(),
            categories: BTreeSet::new(),
            recurring_only: false,
            include_credit: true,
        }
    }
}

impl LedgerFilter {
    /// Create a filter selecting the current month, all categories, credit included
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to the given months
    ///
    /// # Errors
    ///
    /// Returns a validation error for a month outside 1-12.
    pub fn months(mut self, months: impl IntoIterator<Item = u32>) -> LedgerResult<Self> {
        for month in months {
            if !(1..=12).contains(&month) {
                return Err(LedgerError::Validation(format!(
                    "Month must be between 1 and 12, got {}",
                    month
                )));
            }
            self.months.insert(month);
        }
        Ok(self)
    }

    /// Restrict to the given category labels
    pub fn categories<S: Into<String>>(mut self, labels: impl IntoIterator<Item = S>) -> Self {
        self.categories
            .extend(labels.into_iter().map(|label| label.into().trim().to_string()));
        self
    }

    /// Keep only recurring entries
    pub fn recurring_only(mut self, recurring_only: bool) -> Self {
        self.recurring_only = recurring_only;
        self
    }

    /// Whether entries made on credit are kept
    pub fn include_credit(mut self, include_credit: bool) -> Self {
        self.include_credit = include_credit;
        self
    }

    /// Months actually selected, resolving the empty set to `today`'s month
    pub fn effective_months(&self, today: NaiveDate) -> BTreeSet<u32> {
        if self.months.is_empty() {
            BTreeSet::from([today.month()])
        } else {
            self.months.clone()
        }
    }

    /// Check whether a single entry passes the filter
    ///
    /// Only the month is compared; entries from any year match.
    pub fn matches(&self, txn: &Transaction, today: NaiveDate) -> bool {
        let month = txn.date.month();
        let month_selected = if self.months.is_empty() {
            month == today.month()
        } else {
            self.months.contains(&month)
        };

        month_selected
            && (self.categories.is_empty()
                || self
                    .categories
                    .iter()
                    .any(|label| txn.category.matches_label(label)))
            && (!self.recurring_only || txn.recurring)
            && (self.include_credit || !txn.credit)
    }

    /// Entries of `ledger` that pass the filter, in ledger order
    pub fn apply<'a>(&self, ledger: &'a Ledger, today: NaiveDate) -> Vec<&'a Transaction> {
        ledger.iter().filter(|txn| self.matches(txn, today)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, ExpenseCategory, IncomeCategory, Kind, Money};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn txn(kind: Kind, category: Category, when: NaiveDate) -> Transaction {
        Transaction::new(kind, "entry", Money::from_cents(1000), category, when).unwrap()
    }

    fn sample_ledger() -> Ledger {
        Ledger::from_transactions(vec![
            txn(
                Kind::Income,
                Category::Income(IncomeCategory::Salary),
                date(2024, 1, 5),
            )
            .with_recurring(true),
            txn(
                Kind::Expense,
                Category::Expense(ExpenseCategory::Food),
                date(2024, 1, 10),
            )
            .with_credit(true),
            txn(
                Kind::Expense,
                Category::Expense(ExpenseCategory::Transport),
                date(2024, 2, 1),
            ),
            txn(
                Kind::Income,
                Category::Income(IncomeCategory::Transport),
                date(2024, 2, 3),
            ),
        ])
    }

    #[test]
    fn test_default_filter() {
        let filter = LedgerFilter::default();
        assert!(filter.months.is_empty());
        assert!(filter.categories.is_empty());
        assert!(!filter.recurring_only);
        assert!(filter.include_credit);
    }

    #[test]
    fn test_empty_months_uses_today() {
        let ledger = sample_ledger();
        let filter = LedgerFilter::new();

        assert_eq!(filter.apply(&ledger, date(2024, 2, 20)).len(), 2);
        assert_eq!(filter.apply(&ledger, date(2024, 1, 31)).len(), 2);
        assert!(filter.apply(&ledger, date(2024, 7, 1)).is_empty());
        assert_eq!(
            filter.effective_months(date(2024, 7, 1)),
            BTreeSet::from([7])
        );
    }

    #[test]
    fn test_explicit_months() {
        let ledger = sample_ledger();
        let filter = LedgerFilter::new().months([1, 2]).unwrap();

        assert_eq!(filter.apply(&ledger, date(2024, 7, 1)).len(), 4);
    }

    #[test]
    fn test_month_out_of_range() {
        assert!(LedgerFilter::new().months([13]).is_err());
        assert!(LedgerFilter::new().months([0]).is_err());
    }

    #[test]
    fn test_category_labels_match_both_kinds() {
        let ledger = sample_ledger();
        let filter = LedgerFilter::new()
            .months([2])
            .unwrap()
            .categories(["transport"]);

        assert_eq!(filter.apply(&ledger, date(2024, 2, 1)).len(), 2);

        let stored = LedgerFilter::new()
            .months([1])
            .unwrap()
            .categories(["Alimentação"]);
        assert_eq!(stored.apply(&ledger, date(2024, 1, 1)).len(), 1);
    }

    #[test]
    fn test_recurring_only() {
        let ledger = sample_ledger();
        let filter = LedgerFilter::new()
            .months([1, 2])
            .unwrap()
            .recurring_only(true);

        let selected = filter.apply(&ledger, date(2024, 1, 1));
        assert_eq!(selected.len(), 1);
        assert!(selected[0].recurring);
    }

    #[test]
    fn test_exclude_credit() {
        let ledger = sample_ledger();
        let filter = LedgerFilter::new()
            .months([1])
            .unwrap()
            .include_credit(false);

        let selected = filter.apply(&ledger, date(2024, 1, 1));
        assert_eq!(selected.len(), 1);
        assert!(!selected[0].credit);
    }

    #[test]
    fn test_year_is_ignored() {
        let ledger = Ledger::from_transactions(vec![txn(
            Kind::Income,
            Category::Income(IncomeCategory::Salary),
            date(2022, 3, 1),
        )]);

        assert_eq!(LedgerFilter::new().apply(&ledger, date(2025, 3, 9)).len(), 1);
    }
}
