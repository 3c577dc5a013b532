use anyhow::Result;
use clap::{Parser, Subcommand};

use pocket_ledger::cli::{
    handle_add_command, handle_categories_command, handle_history_command, handle_list_command,
    handle_summary_command, AddArgs, SummaryArgs,
};
use pocket_ledger::config::{paths::LedgerPaths, settings::Settings};
use pocket_ledger::storage::Storage;

#[derive(Parser)]
#[command(
    name = "pocket",
    version,
    about = "Personal finance ledger",
    long_about = "pocket keeps a ledger of income and expense entries in a plain \
                  ';'-separated table and summarizes it by month, category and kind."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a new entry
    Add(AddArgs),

    /// List recorded entries, newest first
    #[command(alias = "ls")]
    List {
        /// Number of entries to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show balances and category totals for a period
    Summary(SummaryArgs),

    /// List the categories of each kind
    Categories,

    /// Show recent changes from the audit log
    History {
        /// Number of changes to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Create the ledger table and settings file
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    pocket_ledger::init_tracing();
    let cli = Cli::parse();

    let paths = LedgerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let storage = Storage::new(paths.clone())?;

    match cli.command {
        Some(Commands::Add(args)) => handle_add_command(&storage, &settings, args)?,
        Some(Commands::List { limit }) => handle_list_command(&storage, &settings, limit)?,
        Some(Commands::Summary(args)) => handle_summary_command(&storage, &settings, args)?,
        Some(Commands::Categories) => handle_categories_command(),
        Some(Commands::History { limit }) => handle_history_command(&storage, limit)?,
        Some(Commands::Init) => {
            println!("Initializing pocket-ledger at: {}", paths.base_dir().display());
            let ledger = storage.ledger.ledger()?;
            settings.save(&paths)?;
            println!("Ledger table: {}", paths.ledger_file().display());
            println!("Entries: {}", ledger.len());
            println!();
            println!("Run 'pocket add --help' to record your first entry.");
        }
        Some(Commands::Config) => {
            println!("pocket-ledger Configuration");
            println!("===========================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Ledger table:   {}", paths.ledger_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!(
                "  Include credit:  {}",
                settings.include_credit_by_default
            );
        }
        None => {
            println!("pocket - personal finance ledger");
            println!();
            println!("Run 'pocket --help' for usage information.");
        }
    }

    Ok(())
}
