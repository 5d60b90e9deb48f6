use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};
use tracing::debug;

use bizdash::cli::{
    handle_add_command, handle_export_command, handle_import_command, handle_list_command,
    handle_report_command, AddCommands, ExportFormat, ImportKind, ListCommands, ReportCommands,
};
use bizdash::config::{BizdashPaths, Settings};
use bizdash::services::Validator;
use bizdash::storage::Storage;
use bizdash::{logging, seed};

#[derive(Parser)]
#[command(
    name = "bizdash",
    version,
    about = "Small-business financial dashboard",
    long_about = "bizdash keeps a small business's transactions, client invoices and \
                  recurring costs in plain CSV files and computes cash flow, category \
                  breakdowns, income allocation, receivables and savings suggestions \
                  from the command line."
)]
struct Cli {
    /// Reference date for reports (YYYY-MM-DD, defaults to today)
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and settings file
    Init {
        /// Populate empty storage with sample records
        #[arg(long)]
        sample: bool,
    },

    /// Show current configuration and paths
    Config,

    /// Record a transaction, invoice or recurring expense
    #[command(subcommand)]
    Add(AddCommands),

    /// Import records from a CSV file
    Import {
        /// Which record file to import into
        #[arg(value_enum)]
        kind: ImportKind,
        /// Path to CSV file
        file: PathBuf,
    },

    /// List stored records
    #[command(subcommand, alias = "ls")]
    List(ListCommands),

    /// Generate reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Export records and every report as one document
    Export {
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let paths = BizdashPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let today = cli
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    debug!(base_dir = %paths.base_dir().display(), %today, "Starting bizdash");

    let storage = Storage::new(paths.clone(), Validator::new(settings.date_format.clone()))?;

    match cli.command {
        Some(Commands::Init { sample }) => {
            println!("Initializing bizdash at: {}", paths.base_dir().display());
            paths.ensure_directories()?;
            if paths.is_initialized() {
                println!("Keeping existing settings at {}", paths.settings_file().display());
            } else {
                settings.save(&paths)?;
            }

            if sample {
                if storage.load_all()?.is_empty() {
                    storage.save_all(&seed::sample_records())?;
                    println!("Sample transactions, invoices and recurring expenses added.");
                } else {
                    println!("Existing records found; sample data not added.");
                }
            }

            println!("Initialization complete!");
            println!();
            println!("Run 'bizdash report overview' to see the dashboard.");
        }
        Some(Commands::Config) => {
            println!("bizdash Configuration");
            println!("=====================");
            println!("Base directory:    {}", paths.base_dir().display());
            println!("Settings file:     {}", paths.settings_file().display());
            println!("Transactions file: {}", paths.transactions_file().display());
            println!("Clients file:      {}", paths.clients_file().display());
            println!("Recurring file:    {}", paths.recurring_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:     {}", settings.currency_symbol);
            println!("  Date format:         {}", settings.date_format);
            println!(
                "  Tax rate:            {:.0}%",
                settings.allocation.tax_rate() * 100.0
            );
            println!(
                "  Reinvestment rate:   {:.0}%",
                settings.allocation.reinvestment_rate() * 100.0
            );
            println!(
                "  Owner pay:           {} every {} days",
                settings
                    .allocation
                    .owner_pay_amount()
                    .format_with_symbol(&settings.currency_symbol),
                settings.allocation.owner_pay_interval_days()
            );
            println!(
                "  Prepay discount:     {:.0}%",
                settings.savings.annual_discount_rate * 100.0
            );
        }
        Some(Commands::Add(cmd)) => {
            handle_add_command(&storage, today, cmd)?;
        }
        Some(Commands::Import { kind, file }) => {
            handle_import_command(&storage, kind, &file)?;
        }
        Some(Commands::List(cmd)) => {
            handle_list_command(&storage, &settings, today, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            handle_report_command(&storage, &settings, today, cmd)?;
        }
        Some(Commands::Export {
            format,
            output,
            pretty,
        }) => {
            handle_export_command(&storage, &settings, today, format, output, pretty)?;
        }
        None => {
            println!("bizdash - Small-business financial dashboard");
            println!();
            println!("Run 'bizdash --help' for usage information.");
            println!("Run 'bizdash init --sample' to start with example data.");
        }
    }

    Ok(())
}
