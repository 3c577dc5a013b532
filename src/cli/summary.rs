//! Summary CLI command
//!
//! Filters the ledger and prints balances, category breakdowns and the
//! running balance.

use chrono::Local;
use clap::Args;

use crate::config::settings::Settings;
use crate::error::LedgerResult;
use crate::reports::{query, LedgerFilter};
use crate::storage::Storage;

/// Arguments for `summary`
#[derive(Args, Debug, Default)]
pub struct SummaryArgs {
    /// Month of the year to include (1-12); repeatable, defaults to the current month
    #[arg(short, long = "month")]
    pub months: Vec<u32>,
    /// Category to include; repeatable, defaults to all
    #[arg(short, long = "category")]
    pub categories: Vec<String>,
    /// Only recurring entries
    #[arg(short, long)]
    pub recurring: bool,
    /// Leave out entries made on credit
    #[arg(long, conflicts_with = "credit")]
    pub no_credit: bool,
    /// Include entries made on credit, whatever the configured default
    #[arg(long)]
    pub credit: bool,
}

impl SummaryArgs {
    /// Build the filter these arguments describe
    pub fn to_filter(&self, settings: &Settings) -> LedgerResult<LedgerFilter> {
        let include_credit = if self.no_credit {
            false
        } else {
            self.credit || settings.include_credit_by_default
        };

        Ok(LedgerFilter::new()
            .months(self.months.iter().copied())?
            .categories(self.categories.iter().cloned())
            .recurring_only(self.recurring)
            .include_credit(include_credit))
    }
}

/// Handle `summary`
pub fn handle_summary_command(
    storage: &Storage,
    settings: &Settings,
    args: SummaryArgs,
) -> LedgerResult<()> {
    let filter = args.to_filter(settings)?;
    let ledger = storage.ledger.ledger()?;
    let today = Local::now().date_naive();

    let summary = query(&ledger, &filter, today);
    tracing::debug!(
        entries = summary.transaction_count,
        months = ?summary.months,
        "summary computed"
    );
    print!("{}", summary.format_terminal(&settings.currency_symbol));
    Ok(())
}
