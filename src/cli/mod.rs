//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod category;
pub mod entry;
pub mod history;
pub mod summary;

pub use category::handle_categories_command;
pub use entry::{handle_add_command, handle_list_command, AddArgs};
pub use history::handle_history_command;
pub use summary::{handle_summary_command, SummaryArgs};
