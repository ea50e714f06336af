//! Transaction display formatting
//!
//! Ledger listing and single-transaction details.

use chrono::NaiveDateTime;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::config::Settings;
use crate::models::{format_timestamp, Transaction, DATETIME_FORMAT};

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format a list of transactions as a table, in the order given
pub fn format_transaction_list(transactions: &[Transaction], settings: &Settings) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows = transactions.iter().map(|txn| TransactionRow {
        id: txn.id().to_string(),
        date: display_timestamp(txn.timestamp(), &settings.display_datetime_format),
        description: truncate(txn.description(), 32),
        category: txn.category().to_string(),
        kind: txn.kind().to_string(),
        amount: txn.amount().format_with_symbol(&settings.currency_symbol),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::single(5)).with(Alignment::right()));

    format!("{}\n", table)
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id()));
    output.push_str(&format!(
        "Date:        {}\n",
        display_timestamp(txn.timestamp(), &settings.display_datetime_format)
    ));
    output.push_str(&format!("Description: {}\n", txn.description()));
    output.push_str(&format!(
        "Amount:      {}\n",
        txn.amount().format_with_symbol(&settings.currency_symbol)
    ));
    output.push_str(&format!("Category:    {}\n", txn.category()));
    output.push_str(&format!("Type:        {}\n", txn.kind()));

    if txn.is_income() {
        output.push_str("GST Rate:    0% (income is not taxed)\n");
    } else if settings.gst_rates.contains(txn.category()) {
        output.push_str(&format!(
            "GST Rate:    {}%\n",
            settings.gst_rates.rate_for(txn.category())
        ));
    } else {
        output.push_str("GST Rate:    0% (category not in rate table)\n");
    }

    output
}

/// Format a short transaction summary (one line)
pub fn format_transaction_short(txn: &Transaction, currency_symbol: &str) -> String {
    format!(
        "{} {} {} ({}, {})",
        txn.id(),
        txn.description(),
        txn.amount().format_with_symbol(currency_symbol),
        txn.category(),
        txn.kind()
    )
}

// A bad layout in config.json should not stop the listing
fn display_timestamp(timestamp: NaiveDateTime, layout: &str) -> String {
    format_timestamp(timestamp, layout)
        .unwrap_or_else(|_| timestamp.format(DATETIME_FORMAT).to_string())
}

/// Truncate a string to a maximum number of characters
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{parse_datetime, Money, TransactionId, TransactionType};

    fn laptop() -> Transaction {
        Transaction::record(
            TransactionId::from_raw(1718000000000),
            "Laptop",
            Money::from_units(20000),
            TransactionType::Expense,
            parse_datetime("2025-01-15T10:30").unwrap(),
            "Electronics",
        )
        .unwrap()
    }

    #[test]
    fn test_format_empty_list() {
        let formatted = format_transaction_list(&[], &Settings::default());
        assert!(formatted.contains("No transactions found"));
    }

    #[test]
    fn test_format_transaction_list() {
        let formatted = format_transaction_list(&[laptop()], &Settings::default());
        assert!(formatted.contains("1718000000000"));
        assert!(formatted.contains("15 Jan 2025 10:30 AM"));
        assert!(formatted.contains("Laptop"));
        assert!(formatted.contains("-₹20000.00"));
        assert!(formatted.contains("expense"));
    }

    #[test]
    fn test_bad_display_format_falls_back() {
        let settings = Settings {
            display_datetime_format: "%Q".into(),
            ..Settings::default()
        };
        let formatted = format_transaction_list(&[laptop()], &settings);
        assert!(formatted.contains("2025-01-15T10:30"));
    }

    #[test]
    fn test_format_transaction_details() {
        let formatted = format_transaction_details(&laptop(), &Settings::default());
        assert!(formatted.contains("Transaction: 1718000000000"));
        assert!(formatted.contains("Category:    Electronics"));
        assert!(formatted.contains("GST Rate:    18%"));
    }

    #[test]
    fn test_income_details_show_zero_rate() {
        let sale = Transaction::record(
            TransactionId::from_raw(1),
            "Sold laptop",
            Money::from_units(500),
            TransactionType::Income,
            parse_datetime("2025-01-15T10:30").unwrap(),
            "Electronics",
        )
        .unwrap();

        let formatted = format_transaction_details(&sale, &Settings::default());
        assert!(formatted.contains("GST Rate:    0% (income is not taxed)"));
    }

    #[test]
    fn test_format_transaction_short() {
        assert_eq!(
            format_transaction_short(&laptop(), "$"),
            "1718000000000 Laptop -$20000.00 (Electronics, expense)"
        );
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello World", 5), "He...");
        assert_eq!(truncate("Hi", 5), "Hi");
        assert_eq!(truncate("Büroartikel", 11), "Büroartikel");
    }
}
