//! Cumulative balance series
//!
//! Signed amounts (income positive, expense negative) are summed per date
//! and then accumulated in date order, giving the running balance for a
//! balance-over-time chart.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{Money, Transaction};

/// Net signed amount per date, oldest date first
///
/// The running total is not stored; each call to [`CumulativeSeries::iter`]
/// starts a fresh accumulation, so the series can be walked any number of
/// times.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CumulativeSeries {
    daily: Vec<(NaiveDate, Money)>,
}

impl CumulativeSeries {
    /// Group entries by date, summing their signed amounts
    pub fn from_transactions<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Self {
        let mut by_date: BTreeMap<NaiveDate, Money> = BTreeMap::new();
        for txn in transactions {
            *by_date.entry(txn.date).or_default() += txn.signed_amount();
        }

        Self {
            daily: by_date.into_iter().collect(),
        }
    }

    /// Iterate over `(date, cumulative balance)` points
    pub fn iter(&self) -> CumulativeIter<'_> {
        CumulativeIter {
            daily: self.daily.iter(),
            running: Money::zero(),
        }
    }

    /// Net signed amount per date, before accumulation
    pub fn daily_totals(&self) -> &[(NaiveDate, Money)] {
        &self.daily
    }

    /// Balance at the last point, zero when empty
    pub fn final_balance(&self) -> Money {
        self.daily.iter().map(|(_, amount)| *amount).sum()
    }

    pub fn len(&self) -> usize {
        self.daily.len()
    }

    pub fn is_empty(&self) -> bool {
        self.daily.is_empty()
    }
}

impl<'a> IntoIterator for &'a CumulativeSeries {
    type Item = (NaiveDate, Money);
    type IntoIter = CumulativeIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazily accumulating iterator over a [`CumulativeSeries`]
#[derive(Debug, Clone)]
pub struct CumulativeIter<'a> {
    daily: std::slice::Iter<'a, (NaiveDate, Money)>,
    running: Money,
}

impl Iterator for CumulativeIter<'_> {
    type Item = (NaiveDate, Money);

    fn next(&mut self) -> Option<Self::Item> {
        let (date, amount) = self.daily.next()?;
        self.running += *amount;
        Some((*date, self.running))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.daily.size_hint()
    }
}

impl ExactSizeIterator for CumulativeIter<'_> {}
