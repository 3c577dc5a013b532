//! Ledger summary
//!
//! Balances per kind, the net result, per-category breakdowns and the
//! cumulative balance series for the entries selected by a filter. A filter
//! that selects nothing yields zero balances and empty breakdowns.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use super::filter::LedgerFilter;
use super::series::CumulativeSeries;
use crate::display::report::{format_bar, format_percentage, month_name, separator};
use crate::models::{Category, Kind, Ledger, Money, Transaction};

const REPORT_WIDTH: usize = 60;
const BAR_WIDTH: usize = 20;

/// Summed amounts per kind, both non-negative
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BalanceByKind {
    pub income: Money,
    pub expense: Money,
}

impl BalanceByKind {
    /// Sum the amounts of `transactions` per kind
    pub fn from_transactions<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Self {
        let mut balance = Self::default();
        for txn in transactions {
            match txn.kind {
                Kind::Income => balance.income += txn.amount,
                Kind::Expense => balance.expense += txn.amount,
            }
        }
        balance
    }

    /// Total for one kind; zero when no entry of that kind was selected
    pub fn get(&self, kind: Kind) -> Money {
        match kind {
            Kind::Income => self.income,
            Kind::Expense => self.expense,
        }
    }

    /// Income minus expenses
    pub fn net(&self) -> Money {
        self.income - self.expense
    }
}

/// Category -> summed amount for the entries of one kind
pub fn category_breakdown<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
    kind: Kind,
) -> BTreeMap<Category, Money> {
    let mut breakdown = BTreeMap::new();
    for txn in transactions.into_iter().filter(|t| t.kind == kind) {
        *breakdown.entry(txn.category).or_insert_with(Money::zero) += txn.amount;
    }
    breakdown
}

/// Everything computed for one filtered view of the ledger
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerSummary {
    /// Months the filter selected (today's month when the filter named none)
    pub months: BTreeSet<u32>,
    /// Number of entries that passed the filter
    pub transaction_count: usize,
    /// Summed amounts per kind
    pub balance: BalanceByKind,
    /// Income minus expenses
    pub net_result: Money,
    /// Income per category
    pub income_breakdown: BTreeMap<Category, Money>,
    /// Expenses per category
    pub expense_breakdown: BTreeMap<Category, Money>,
    /// Running balance by date
    pub series: CumulativeSeries,
}

impl LedgerSummary {
    /// Summarize the entries of `ledger` selected by `filter`
    ///
    /// `today` decides the month used when the filter names none.
    pub fn generate(ledger: &Ledger, filter: &LedgerFilter, today: NaiveDate) -> Self {
        let selected = filter.apply(ledger, today);
        let balance = BalanceByKind::from_transactions(selected.iter().copied());

        Self {
            months: filter.effective_months(today),
            transaction_count: selected.len(),
            balance,
            net_result: balance.net(),
            income_breakdown: category_breakdown(selected.iter().copied(), Kind::Income),
            expense_breakdown: category_breakdown(selected.iter().copied(), Kind::Expense),
            series: CumulativeSeries::from_transactions(selected.iter().copied()),
        }
    }

    /// Per-category totals for one kind
    pub fn category_breakdown(&self, kind: Kind) -> &BTreeMap<Category, Money> {
        match kind {
            Kind::Income => &self.income_breakdown,
            Kind::Expense => &self.expense_breakdown,
        }
    }

    /// Check if the filter selected nothing
    pub fn is_empty(&self) -> bool {
        self.transaction_count == 0
    }

    /// Format the summary for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let mut output = String::new();

        let period = self
            .months
            .iter()
            .map(|m| month_name(*m))
            .collect::<Vec<_>>()
            .join(", ");
        output.push_str(&format!("Summary: {}\n", period));
        output.push_str(&"=".repeat(REPORT_WIDTH));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>18}\n",
            "Balance",
            self.net_result.format_with_symbol(currency_symbol)
        ));
        output.push_str(&format!(
            "{:<20} {:>18}\n",
            "Income",
            self.balance.income.format_with_symbol(currency_symbol)
        ));
        output.push_str(&format!(
            "{:<20} {:>18}\n",
            "Expenses",
            (-self.balance.expense).format_with_symbol(currency_symbol)
        ));
        output.push_str(&format!("{:<20} {:>18}\n", "Entries", self.transaction_count));

        if self.is_empty() {
            output.push_str("\nNo entries for this period.\n");
            return output;
        }

        for kind in [Kind::Expense, Kind::Income] {
            let breakdown = self.category_breakdown(kind);
            if breakdown.is_empty() {
                continue;
            }

            let total = self.balance.get(kind);
            let mut rows: Vec<_> = breakdown.iter().collect();
            rows.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));
            let largest = rows.first().map(|(_, m)| m.cents()).unwrap_or(0) as f64;

            output.push_str(&format!("\n{} by category\n", kind));
            output.push_str(&separator(REPORT_WIDTH));
            output.push('\n');
            for (category, amount) in rows {
                output.push_str(&format!(
                    "  {:<14} {:>14} {:>6} {}\n",
                    category.name(),
                    amount.format_with_symbol(currency_symbol),
                    format_percentage(amount.percentage_of(total)),
                    format_bar(amount.cents() as f64, largest, BAR_WIDTH)
                ));
            }
        }

        output.push_str("\nRunning balance\n");
        output.push_str(&separator(REPORT_WIDTH));
        output.push('\n');
        for (date, balance) in &self.series {
            output.push_str(&format!(
                "  {} {:>18}\n",
                date.format("%Y-%m-%d"),
                balance.format_with_symbol(currency_symbol)
            ));
        }

        output
    }
}

/// Summarize `ledger` under `filter`; free-function form of [`LedgerSummary::generate`]
pub fn query(ledger: &Ledger, filter: &LedgerFilter, today: NaiveDate) -> LedgerSummary {
    LedgerSummary::generate(ledger, filter, today)
}
