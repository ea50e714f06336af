//! CLI commands for reports

use crate::config::Settings;
use crate::display::report::{format_gst_breakdown, format_rate_table, format_summary};
use crate::error::LedgerResult;
use crate::reports::{gst_breakdown, tax_owed, totals};
use crate::storage::Storage;

/// Handle `summary`: totals, GST owed and the per-category breakdown
pub fn handle_summary_command(storage: &Storage, settings: &Settings) -> LedgerResult<()> {
    let ledger = storage.transactions.all();
    let rates = &settings.gst_rates;

    print!(
        "{}",
        format_summary(&totals(ledger), tax_owed(ledger, rates), &settings.currency_symbol)
    );
    println!();
    println!("GST by category");
    print!(
        "{}",
        format_gst_breakdown(&gst_breakdown(ledger, rates), &settings.currency_symbol)
    );

    Ok(())
}

/// Handle `categories`: the configured rate table
pub fn handle_categories_command(storage: &Storage, settings: &Settings) -> LedgerResult<()> {
    print!("{}", format_rate_table(&settings.gst_rates));
    println!();
    println!("Categories not listed are taxed at 0%.");
    println!(
        "Edit rates in: {}",
        storage.paths().settings_file().display()
    );
    Ok(())
}
