//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod export;
pub mod history;
pub mod report;
pub mod transaction;

pub use export::handle_export_command;
pub use history::handle_history_command;
pub use report::{handle_categories_command, handle_summary_command};
pub use transaction::{
    handle_list_command, handle_record_command, handle_remove_command, handle_show_command,
    RecordArgs,
};
