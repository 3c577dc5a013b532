//! Transaction display formatting
//!
//! Renders ledger entries as a statement: one row per entry, newest first,
//! with the position the entry holds in the sorted ledger.

use crate::models::{Kind, Ledger, Transaction};

/// Format a single entry as a statement row
pub fn format_transaction_row(
    index: usize,
    txn: &Transaction,
    currency_symbol: &str,
    date_format: &str,
) -> String {
    let kind = match txn.kind {
        Kind::Income => "+",
        Kind::Expense => "-",
    };

    let mut flags = String::new();
    if txn.recurring {
        flags.push('R');
    }
    if txn.credit {
        flags.push('C');
    }

    format!(
        "{:>4} {} {:10} {:28} {:14} {:>14} {}",
        index,
        kind,
        txn.date.format(date_format).to_string(),
        truncate(&txn.description, 28),
        txn.category.name(),
        txn.signed_amount().format_with_symbol(currency_symbol),
        flags
    )
    .trim_end()
    .to_string()
}

/// Format the first `limit` entries of the ledger as a statement
pub fn format_statement(
    ledger: &Ledger,
    limit: Option<usize>,
    currency_symbol: &str,
    date_format: &str,
) -> String {
    if ledger.is_empty() {
        return "No entries recorded.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:>4} {} {:10} {:28} {:14} {:>14} {}\n",
        "#", " ", "Date", "Description", "Category", "Amount", "Flags"
    ));
    output.push_str(&"-".repeat(84));
    output.push('\n');

    let shown = limit.unwrap_or(ledger.len());
    for (index, txn) in ledger.iter().enumerate().take(shown) {
        output.push_str(&format_transaction_row(
            index,
            txn,
            currency_symbol,
            date_format,
        ));
        output.push('\n');
    }

    if shown < ledger.len() {
        output.push_str(&format!("... {} more\n", ledger.len() - shown));
    }

    output
}

/// Truncate a string to a maximum number of characters, marking the cut
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}
