//! Entry CLI commands
//!
//! `add` composes an entry through the draft state machine and commits it;
//! `list` prints the ledger as a statement.

use clap::Args;

use crate::config::settings::Settings;
use crate::display::format_statement;
use crate::error::LedgerResult;
use crate::models::Kind;
use crate::services::{CommitOutcome, DraftEntry, FieldUpdate};
use crate::storage::Storage;

/// Arguments for `add`
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Entry kind (income/receita or expense/despesa)
    #[arg(short, long, default_value = "income")]
    pub kind: String,
    /// Description
    #[arg(short = 'D', long)]
    pub description: Option<String>,
    /// Amount (e.g., "150", "150.00" or "150,00")
    #[arg(short, long, allow_hyphen_values = true)]
    pub amount: Option<String>,
    /// Category name (defaults to the kind's first category)
    #[arg(short, long)]
    pub category: Option<String>,
    /// Entry date (defaults to today)
    #[arg(short, long)]
    pub date: Option<String>,
    /// Mark the entry as recurring
    #[arg(short, long)]
    pub recurring: bool,
    /// Mark the entry as made on credit
    #[arg(long)]
    pub credit: bool,
}

/// Handle `add`
pub fn handle_add_command(
    storage: &Storage,
    settings: &Settings,
    args: AddArgs,
) -> LedgerResult<()> {
    let mut draft = DraftEntry::new();

    let kind_update = FieldUpdate::parse("kind", &args.kind, Kind::default())?;
    draft.set_field(kind_update)?;
    let kind = draft.kind();

    let fields = [
        ("description", args.description),
        ("amount", args.amount),
        ("category", args.category),
        ("date", args.date),
    ];
    for (name, value) in fields {
        if let Some(raw) = value {
            draft.set_field(FieldUpdate::parse(name, &raw, kind)?)?;
        }
    }
    draft.set_field(FieldUpdate::Recurring(args.recurring))?;
    draft.set_field(FieldUpdate::Credit(args.credit))?;

    let description = draft.description().unwrap_or_default().to_string();
    let amount = draft.amount();
    let category = draft.resolved_category();
    let date = draft.date();

    match draft.commit(&storage.ledger)? {
        CommitOutcome::Committed(ledger) => {
            let amount = amount
                .map(|a| a.format_with_symbol(&settings.currency_symbol))
                .unwrap_or_default();
            println!(
                "Recorded {} '{}': {} in {} on {}",
                kind.to_string().to_lowercase(),
                description,
                amount,
                category,
                date.format(&settings.date_format)
            );
            println!("Ledger now holds {} entries.", ledger.len());
        }
        CommitOutcome::Incomplete => {
            println!("Nothing recorded: an entry needs both a description and an amount.");
        }
    }

    Ok(())
}

/// Handle `list`
pub fn handle_list_command(
    storage: &Storage,
    settings: &Settings,
    limit: Option<usize>,
) -> LedgerResult<()> {
    let ledger = storage.ledger.ledger()?;
    print!(
        "{}",
        format_statement(
            &ledger,
            limit,
            &settings.currency_symbol,
            &settings.date_format
        )
    );
    Ok(())
}
