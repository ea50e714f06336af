//! Transaction CLI commands
//!
//! Recording income and expenses, listing the ledger and removing entries.

use clap::Args;
use tracing::debug;

use crate::config::Settings;
use crate::display::transaction::{
    format_transaction_details, format_transaction_list, format_transaction_short,
};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{parse_datetime, TransactionId, TransactionType};
use crate::services::{CreateTransactionInput, TransactionService};
use crate::storage::Storage;

/// Arguments shared by `income` and `expense`
#[derive(Args, Debug)]
pub struct RecordArgs {
    /// What the money was for
    pub description: String,
    /// Positive amount (e.g. "50000" or "12.50"); the sign comes from the command
    pub amount: String,
    /// Category name, used to look up the GST rate
    #[arg(short, long)]
    pub category: String,
    /// When it happened (YYYY-MM-DD or YYYY-MM-DDTHH:MM), defaults to now
    #[arg(short, long)]
    pub date: Option<String>,
}

/// Handle `income` and `expense`
pub fn handle_record_command(
    storage: &mut Storage,
    settings: &Settings,
    kind: TransactionType,
    args: RecordArgs,
) -> LedgerResult<()> {
    let mut input = CreateTransactionInput::new(args.description, args.amount, kind, args.category);

    if let Some(date_str) = args.date {
        let timestamp = parse_datetime(&date_str).ok_or_else(|| {
            LedgerError::Validation(format!(
                "Invalid date: '{}'. Use YYYY-MM-DD or YYYY-MM-DDTHH:MM",
                date_str
            ))
        })?;
        input = input.at(timestamp);
    }

    let txn = TransactionService::new(storage).create(input)?;

    println!("Recorded {}:", txn.kind());
    print!("{}", format_transaction_details(&txn, settings));

    if !settings.gst_rates.contains(txn.category()) {
        debug!(category = txn.category(), "category not in GST rate table");
        println!();
        println!(
            "Note: '{}' has no GST rate configured and is taxed at 0%.",
            txn.category()
        );
        println!("Run 'gst-ledger categories' to see the rate table.");
    }

    Ok(())
}

/// Handle `list`
///
/// With a limit, only the most recently added transactions are shown.
pub fn handle_list_command(
    storage: &mut Storage,
    settings: &Settings,
    limit: Option<usize>,
) -> LedgerResult<()> {
    let service = TransactionService::new(storage);
    let ledger = service.list();

    let shown = match limit {
        Some(n) if n < ledger.len() => &ledger[ledger.len() - n..],
        _ => ledger,
    };

    print!("{}", format_transaction_list(shown, settings));
    if !ledger.is_empty() {
        println!("Showing {} of {} transactions", shown.len(), ledger.len());
    }

    Ok(())
}

/// Handle `show`
pub fn handle_show_command(
    storage: &mut Storage,
    settings: &Settings,
    id: TransactionId,
) -> LedgerResult<()> {
    let service = TransactionService::new(storage);
    let txn = service
        .get(id)
        .ok_or_else(|| LedgerError::transaction_not_found(id.to_string()))?;

    print!("{}", format_transaction_details(txn, settings));
    Ok(())
}

/// Handle `remove`
///
/// An id that is not in the ledger is reported, not treated as a failure.
pub fn handle_remove_command(
    storage: &mut Storage,
    settings: &Settings,
    id: TransactionId,
) -> LedgerResult<()> {
    let mut service = TransactionService::new(storage);
    let snapshot = service.get(id).cloned();

    if service.remove(id)? {
        if let Some(txn) = snapshot {
            println!(
                "Removed: {}",
                format_transaction_short(&txn, &settings.currency_symbol)
            );
        }
    } else {
        println!("No transaction with ID {}. Nothing removed.", id);
    }

    Ok(())
}
