//! CLI command for the audit history

use crate::error::LedgerResult;
use crate::storage::Storage;

/// Handle `history`: the most recent creates and removes
pub fn handle_history_command(storage: &Storage, limit: usize) -> LedgerResult<()> {
    let entries = storage.audit().read_recent(limit)?;

    if entries.is_empty() {
        println!("No history recorded yet.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
