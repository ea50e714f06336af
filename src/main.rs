use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gst_ledger::cli::{
    handle_categories_command, handle_export_command, handle_history_command,
    handle_list_command, handle_record_command, handle_remove_command, handle_show_command,
    handle_summary_command, RecordArgs,
};
use gst_ledger::config::{LedgerPaths, Settings};
use gst_ledger::export::DEFAULT_EXPORT_FILE;
use gst_ledger::models::{TransactionId, TransactionType};
use gst_ledger::storage::{LoadOutcome, Storage};

#[derive(Parser)]
#[command(
    name = "gst-ledger",
    version,
    about = "Terminal income/expense ledger with GST estimates",
    long_about = "gst-ledger records business income and expenses in a local JSON \
                  file, shows the running balance, estimates the GST owed on \
                  expenses from a per-category rate table, and exports the ledger \
                  as CSV."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record money coming in
    Income(RecordArgs),

    /// Record money going out
    Expense(RecordArgs),

    /// List transactions in the order they were added
    #[command(alias = "ls")]
    List {
        /// Show only the N most recently added
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show one transaction
    Show {
        /// Transaction ID
        id: TransactionId,
    },

    /// Remove a transaction
    #[command(alias = "rm")]
    Remove {
        /// Transaction ID
        id: TransactionId,
    },

    /// Show balance, income, expense and GST owed
    Summary,

    /// Export the ledger to CSV
    Export {
        /// Output file path
        #[arg(default_value = DEFAULT_EXPORT_FILE)]
        output: PathBuf,
    },

    /// Show the GST rate table
    Categories,

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Write the default configuration file
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Initialize paths and settings
    let paths = LedgerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    if let LoadOutcome::Recovered {
        reason,
        quarantined,
    } = storage.load_all()
    {
        eprintln!("Warning: the saved ledger could not be read ({}).", reason);
        if let Some(path) = quarantined {
            eprintln!("It was moved to {}.", path.display());
        }
        eprintln!("Starting with an empty ledger.");
    }

    match cli.command {
        Some(Commands::Income(args)) => {
            handle_record_command(&mut storage, &settings, TransactionType::Income, args)?;
        }
        Some(Commands::Expense(args)) => {
            handle_record_command(&mut storage, &settings, TransactionType::Expense, args)?;
        }
        Some(Commands::List { limit }) => {
            handle_list_command(&mut storage, &settings, limit)?;
        }
        Some(Commands::Show { id }) => {
            handle_show_command(&mut storage, &settings, id)?;
        }
        Some(Commands::Remove { id }) => {
            handle_remove_command(&mut storage, &settings, id)?;
        }
        Some(Commands::Summary) => {
            handle_summary_command(&storage, &settings)?;
        }
        Some(Commands::Export { output }) => {
            handle_export_command(&storage, &settings, output)?;
        }
        Some(Commands::Categories) => {
            handle_categories_command(&storage, &settings)?;
        }
        Some(Commands::History { limit }) => {
            handle_history_command(&storage, limit)?;
        }
        Some(Commands::Init) => {
            println!("Initializing gst-ledger at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Default GST rates have been written to:");
            println!("  {}", paths.settings_file().display());
            println!();
            println!("Run 'gst-ledger categories' to see them.");
        }
        Some(Commands::Config) => {
            println!("gst-ledger Configuration");
            println!("========================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Ledger file:     {}", paths.ledger_file().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:        {}", settings.currency_symbol);
            println!("  Display date format:    {}", settings.display_datetime_format);
            println!("  Export date format:     {}", settings.export_datetime_format);
            println!("  GST categories:         {}", settings.gst_rates.len());
        }
        None => {
            println!("gst-ledger - Income/expense ledger with GST estimates");
            println!();
            println!("Run 'gst-ledger --help' for usage information.");
            println!("Run 'gst-ledger income \"Salary\" 50000 -c Non-Taxable' to get started.");
        }
    }

    Ok(())
}
