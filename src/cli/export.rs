//! CLI command for CSV export

use std::path::PathBuf;

use crate::config::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::export::export_transactions_csv;
use crate::storage::Storage;

/// Handle `export`
///
/// An empty ledger is reported and leaves no file behind.
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    output: PathBuf,
) -> LedgerResult<()> {
    match export_transactions_csv(
        &output,
        storage.transactions.all(),
        &settings.gst_rates,
        &settings.export_datetime_format,
    ) {
        Ok(count) => {
            println!("Exported {} transactions to: {}", count, output.display());
            Ok(())
        }
        Err(LedgerError::EmptyLedger) => {
            println!("No transactions to export.");
            Ok(())
        }
        Err(e) => Err(e),
    }
}
