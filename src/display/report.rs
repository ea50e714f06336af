//! Report formatting utilities for terminal output

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::CategoryTaxTable;
use crate::reports::{CategoryTax, LedgerTotals, TaxOwed};

const WIDTH: usize = 40;

/// Format the balance, income, expense and GST owed block
pub fn format_summary(totals: &LedgerTotals, gst: TaxOwed, currency_symbol: &str) -> String {
    let mut output = String::new();

    output.push_str("Ledger Summary\n");
    output.push_str(&separator(WIDTH));
    output.push('\n');

    for (label, value) in [
        ("Balance", totals.total),
        ("Income", totals.income),
        ("Expense", totals.expense),
        ("GST owed", gst.rounded()),
    ] {
        output.push_str(&format!(
            "{:<12}{:>28}\n",
            label,
            value.format_with_symbol(currency_symbol)
        ));
    }

    output
}

#[derive(Tabled)]
struct BreakdownRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "GST")]
    gst: String,
}

/// Format the per-category GST breakdown of expenses
pub fn format_gst_breakdown(rows: &[CategoryTax], currency_symbol: &str) -> String {
    if rows.is_empty() {
        return "No expenses recorded.\n".to_string();
    }

    let table_rows = rows.iter().map(|row| BreakdownRow {
        category: if row.configured {
            row.category.clone()
        } else {
            format!("{} *", row.category)
        },
        rate: format!("{}%", row.rate),
        count: row.transaction_count,
        spent: row.expense.format_with_symbol(currency_symbol),
        gst: row.tax.rounded().format_with_symbol(currency_symbol),
    });

    let mut table = Table::new(table_rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()));

    let mut output = format!("{}\n", table);
    if rows.iter().any(|row| !row.configured) {
        output.push_str("* not in the GST rate table, taxed at 0%\n");
    }
    output
}

#[derive(Tabled)]
struct RateRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "GST Rate")]
    rate: String,
}

/// Format the configured category rate table
pub fn format_rate_table(rates: &CategoryTaxTable) -> String {
    if rates.is_empty() {
        return "No GST rates configured.\n".to_string();
    }

    let rows = rates.iter().map(|(category, rate)| RateRow {
        category: category.to_string(),
        rate: format!("{}%", rate),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::single(1)).with(Alignment::right()));

    format!("{}\n", table)
}

/// Format a separator line
fn separator(width: usize) -> String {
    "─".repeat(width)
}
