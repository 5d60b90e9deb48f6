//! CLI commands for reports
//!
//! Each report prints to the terminal or, with `--output`, is written as CSV.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_suggestions;
use crate::error::FinanceResult;
use crate::models::{
    AllocationPolicy, ClientInvoice, DueMonth, Money, Period, RecurringExpense, Transaction,
};
use crate::reports::{
    savings, AllocationResult, CashFlowReport, CategoryBreakdown, DashboardOverview, MonthFill,
    ReceivablesReport, RecurringReport,
};
use crate::storage::Storage;

use super::{parse_due_month, parse_money, parse_period, write_to_file};

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Current-month KPIs, receivables and recurring costs at a glance
    #[command(alias = "dashboard")]
    Overview,

    /// Income, expenses and profit per month
    #[command(alias = "pnl")]
    CashFlow {
        /// Limit to a period ("2024-01", "2024" or "2024-01-01..2024-03-31")
        #[arg(short, long, value_parser = parse_period)]
        period: Option<Period>,

        /// Include months without transactions
        #[arg(short, long)]
        continuous: bool,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Expenses grouped by category
    #[command(alias = "spending")]
    Categories {
        #[arg(short, long, value_parser = parse_period)]
        period: Option<Period>,

        /// Show top N categories only
        #[arg(long)]
        top: Option<usize>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Income grouped by source category
    IncomeSources {
        #[arg(short, long, value_parser = parse_period)]
        period: Option<Period>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Split period income into tax, reinvestment, owner pay and cushion
    Allocation {
        /// Period to allocate (defaults to year to date)
        #[arg(short, long, value_parser = parse_period)]
        period: Option<Period>,

        /// Override the configured tax rate (0.0 - 1.0)
        #[arg(long)]
        tax_rate: Option<f64>,

        /// Override the configured reinvestment rate (0.0 - 1.0)
        #[arg(long)]
        reinvestment_rate: Option<f64>,

        /// Override the owner pay per cycle
        #[arg(long, value_parser = parse_money)]
        owner_pay: Option<Money>,

        /// Override the owner pay interval in days
        #[arg(long)]
        interval: Option<u32>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Per-client receivables and invoice status counts
    #[command(alias = "receivables")]
    Clients {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Recurring cost totals, bills due and savings suggestions
    Recurring {
        /// Month to list bills for (defaults to the current month)
        #[arg(short, long, value_parser = parse_due_month)]
        month: Option<DueMonth>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    today: NaiveDate,
    cmd: ReportCommands,
) -> FinanceResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ReportCommands::Overview => {
            let records = storage.load_all()?;
            let overview = DashboardOverview::generate(&records, today);
            println!("{}", overview.format_terminal(symbol));
        }
        ReportCommands::CashFlow {
            period,
            continuous,
            output,
        } => {
            let transactions = storage.load::<Transaction>()?;
            let fill = if continuous {
                MonthFill::Continuous
            } else {
                MonthFill::Sparse
            };
            let report = match period {
                Some(period) => CashFlowReport::for_period(&transactions, &period, fill),
                None => CashFlowReport::generate(&transactions, fill),
            };

            match output {
                Some(path) => {
                    write_to_file(&path, |w| report.export_csv(w))?;
                    println!("Cash flow report exported to: {}", path.display());
                }
                None => println!("{}", report.format_terminal(symbol)),
            }
        }
        ReportCommands::Categories { period, top, output } => {
            let transactions = storage.load::<Transaction>()?;
            let mut report = CategoryBreakdown::expenses(&transactions, period.as_ref());
            if let Some(limit) = top {
                report.categories = report.top(limit).to_vec();
            }
            print_breakdown(&report, output, symbol, "Category report")?;
        }
        ReportCommands::IncomeSources { period, output } => {
            let transactions = storage.load::<Transaction>()?;
            let report = CategoryBreakdown::income_sources(&transactions, period.as_ref());
            print_breakdown(&report, output, symbol, "Income source report")?;
        }
        ReportCommands::Allocation {
            period,
            tax_rate,
            reinvestment_rate,
            owner_pay,
            interval,
            output,
        } => {
            let policy = scenario_policy(
                &settings.allocation,
                tax_rate,
                reinvestment_rate,
                owner_pay,
                interval,
            )?;
            let period = period.unwrap_or_else(|| Period::year_to_date(today));
            let transactions = storage.load::<Transaction>()?;
            let result = AllocationResult::from_transactions(&transactions, &period, &policy);

            match output {
                Some(path) => {
                    write_to_file(&path, |w| result.export_csv(w))?;
                    println!("Allocation exported to: {}", path.display());
                }
                None => println!("{}", result.format_terminal(symbol)),
            }
        }
        ReportCommands::Clients { output } => {
            let invoices = storage.load::<ClientInvoice>()?;
            let report = ReceivablesReport::generate(&invoices, today);

            match output {
                Some(path) => {
                    write_to_file(&path, |w| report.export_csv(w))?;
                    println!("Client report exported to: {}", path.display());
                }
                None => println!("{}", report.format_terminal(symbol)),
            }
        }
        ReportCommands::Recurring { month, output } => {
            let expenses = storage.load::<RecurringExpense>()?;
            let month = month.unwrap_or_else(|| DueMonth::of(today));
            let report = RecurringReport::generate(&expenses, month);

            match output {
                Some(path) => {
                    write_to_file(&path, |w| report.export_csv(w))?;
                    println!("Recurring report exported to: {}", path.display());
                }
                None => {
                    println!("{}", report.format_terminal(symbol));
                    print!("{}", format_suggestions(&savings::suggest(&expenses, &settings.savings)));
                }
            }
        }
    }

    Ok(())
}

fn print_breakdown(
    report: &CategoryBreakdown,
    output: Option<PathBuf>,
    symbol: &str,
    label: &str,
) -> FinanceResult<()> {
    match output {
        Some(path) => {
            write_to_file(&path, |w| report.export_csv(w))?;
            println!("{} exported to: {}", label, path.display());
        }
        None if report.is_empty() => println!("No matching transactions."),
        None => println!("{}", report.format_terminal(symbol)),
    }
    Ok(())
}

/// Apply command-line overrides on top of the configured policy
fn scenario_policy(
    base: &AllocationPolicy,
    tax_rate: Option<f64>,
    reinvestment_rate: Option<f64>,
    owner_pay: Option<Money>,
    interval: Option<u32>,
) -> FinanceResult<AllocationPolicy> {
    let mut policy = *base;
    if let Some(rate) = tax_rate {
        policy = policy.with_tax_rate(rate)?;
    }
    if let Some(rate) = reinvestment_rate {
        policy = policy.with_reinvestment_rate(rate)?;
    }
    if owner_pay.is_some() || interval.is_some() {
        policy = policy.with_owner_pay(
            owner_pay.unwrap_or_else(|| policy.owner_pay_amount()),
            interval.unwrap_or_else(|| policy.owner_pay_interval_days()),
        )?;
    }
    Ok(policy)
}
