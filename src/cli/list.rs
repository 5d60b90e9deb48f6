//! CLI commands for listing stored records

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_invoices, format_recurring, format_transactions};
use crate::error::FinanceResult;
use crate::models::{ClientInvoice, Period, RecurringExpense, Transaction};
use crate::reports::receivables::reclassify_all;
use crate::storage::Storage;

use super::parse_period;

/// List subcommands
#[derive(Subcommand, Debug)]
pub enum ListCommands {
    /// List transactions, oldest first
    #[command(alias = "txns")]
    Transactions {
        #[arg(short, long, value_parser = parse_period)]
        period: Option<Period>,

        /// Only show this category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// List client invoices with their current status
    #[command(alias = "clients")]
    Invoices {
        /// Only show invoices for this client
        #[arg(short, long)]
        client: Option<String>,
    },

    /// List recurring expenses
    Recurring,
}

/// Handle list commands
pub fn handle_list_command(
    storage: &Storage,
    settings: &Settings,
    today: NaiveDate,
    cmd: ListCommands,
) -> FinanceResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ListCommands::Transactions { period, category } => {
            let transactions: Vec<Transaction> = storage
                .load::<Transaction>()?
                .into_iter()
                .filter(|t| period.as_ref().map_or(true, |p| p.contains(t.date)))
                .filter(|t| {
                    category
                        .as_deref()
                        .map_or(true, |c| t.category.eq_ignore_ascii_case(c))
                })
                .collect();
            print!("{}", format_transactions(&transactions, symbol));
        }
        ListCommands::Invoices { client } => {
            let invoices: Vec<ClientInvoice> = reclassify_all(&storage.load::<ClientInvoice>()?, today)
                .into_iter()
                .filter(|i| client.as_deref().map_or(true, |c| i.client == c))
                .collect();
            print!("{}", format_invoices(&invoices, symbol));
        }
        ListCommands::Recurring => {
            let expenses = storage.load::<RecurringExpense>()?;
            print!("{}", format_recurring(&expenses, symbol));
        }
    }

    Ok(())
}
