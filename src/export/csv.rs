//! CSV Export functionality
//!
//! One header row, then one row per transaction in ledger order. Fields are
//! quoted only when they contain the delimiter, a quote or a newline; embedded
//! quotes are doubled.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{format_timestamp, CategoryTaxTable, GstRate, Transaction};

/// Conventional output file name
pub const DEFAULT_EXPORT_FILE: &str = "transactions.csv";

const HEADER: [&str; 7] = [
    "ID",
    "Description",
    "Amount",
    "Date",
    "Category",
    "Type",
    "GST Rate",
];

/// Write the ledger as CSV to any writer
///
/// Fails with [`LedgerError::EmptyLedger`] before writing anything if the
/// ledger has no transactions.
pub fn write_transactions_csv<W: Write>(
    writer: W,
    ledger: &[Transaction],
    rates: &CategoryTaxTable,
    datetime_format: &str,
) -> LedgerResult<()> {
    if ledger.is_empty() {
        return Err(LedgerError::EmptyLedger);
    }

    let mut csv_writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    csv_writer.write_record(HEADER).map_err(export_error)?;

    for txn in ledger {
        // Only expenses attract GST; income rows always show 0%
        let rate = if txn.is_expense() {
            rates.rate_for(txn.category())
        } else {
            GstRate::zero()
        };
        let date = format_timestamp(txn.timestamp(), datetime_format).map_err(|_| {
            LedgerError::Config(format!("Invalid export datetime format: {}", datetime_format))
        })?;

        csv_writer
            .write_record([
                txn.id().to_string(),
                txn.description().to_string(),
                txn.amount().to_plain_string(),
                date,
                txn.category().to_string(),
                txn.kind().to_string(),
                format!("{}%", rate),
            ])
            .map_err(export_error)?;
    }

    csv_writer
        .flush()
        .map_err(|e| LedgerError::Export(e.to_string()))?;

    Ok(())
}

/// Render the ledger as CSV text
pub fn to_table(
    ledger: &[Transaction],
    rates: &CategoryTaxTable,
    datetime_format: &str,
) -> LedgerResult<String> {
    let mut buffer = Vec::new();
    write_transactions_csv(&mut buffer, ledger, rates, datetime_format)?;
    String::from_utf8(buffer).map_err(|e| LedgerError::Export(e.to_string()))
}

/// Write the ledger to a CSV file, returning the number of rows exported
pub fn export_transactions_csv(
    path: &Path,
    ledger: &[Transaction],
    rates: &CategoryTaxTable,
    datetime_format: &str,
) -> LedgerResult<usize> {
    // Render first so an empty ledger never creates (or truncates) the file
    let table = to_table(ledger, rates, datetime_format)?;

    let file = File::create(path).map_err(|e| {
        LedgerError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(table.as_bytes())
        .and_then(|_| writer.flush())
        .map_err(|e| {
            LedgerError::Export(format!("Failed to write {}: {}", path.display(), e))
        })?;

    Ok(ledger.len())
}

fn export_error(err: csv::Error) -> LedgerError {
    LedgerError::Export(err.to_string())
}
