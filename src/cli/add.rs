//! CLI commands for manual record entry
//!
//! Arguments are taken as plain strings and run through the same validation
//! layer as CSV import.

use chrono::NaiveDate;
use clap::Subcommand;
use tracing::info;

use crate::error::{FinanceError, FinanceResult};
use crate::models::{ClientInvoice, RecurringExpense, Transaction};
use crate::services::validation::{RawInvoice, RawRecurring, RawTransaction};
use crate::storage::Storage;

/// Add subcommands
#[derive(Subcommand, Debug)]
pub enum AddCommands {
    /// Record an income or expense
    #[command(alias = "txn")]
    Transaction {
        /// Income or Expense
        kind: String,
        /// Category (e.g. "Client Work", "Software")
        category: String,
        /// Amount (e.g. 1200, 99.99, $1,200.50)
        amount: String,
        /// Transaction date (defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Free-form description
        #[arg(short = 'm', long, default_value = "")]
        description: String,
    },

    /// Record a client invoice
    Invoice {
        client: String,
        project: String,
        amount: String,
        /// Date the invoice was sent
        #[arg(long)]
        sent: String,
        /// Payment due date
        #[arg(long)]
        due: String,
        /// Sent, Due, Paid or Overdue
        #[arg(short, long, default_value = "Sent")]
        status: String,
    },

    /// Record a recurring expense
    Recurring {
        vendor: String,
        /// Weekly, Monthly, Quarterly or Annual
        frequency: String,
        amount: String,
        /// Billing month; required for Quarterly and Annual
        #[arg(long)]
        due_month: Option<String>,
        #[arg(short, long, default_value = "")]
        notes: String,
    },
}

/// Handle add commands
pub fn handle_add_command(storage: &Storage, today: NaiveDate, cmd: AddCommands) -> FinanceResult<()> {
    let validator = storage.validator();

    match cmd {
        AddCommands::Transaction {
            kind,
            category,
            amount,
            date,
            description,
        } => {
            let raw = RawTransaction {
                date: date.unwrap_or_else(|| today.format(validator.date_format()).to_string()),
                kind,
                category,
                amount,
                description,
            };
            let txn = validator.transaction(&raw).map_err(FinanceError::Validation)?;
            let count = storage.append::<Transaction>(vec![txn.clone()])?;
            info!(count, "Added transaction");
            println!("Added transaction: {}", txn);
        }
        AddCommands::Invoice {
            client,
            project,
            amount,
            sent,
            due,
            status,
        } => {
            let raw = RawInvoice {
                client,
                project,
                amount,
                invoice_sent: sent,
                due_date: due,
                status,
            };
            let invoice = validator.invoice(&raw).map_err(FinanceError::Validation)?;
            let count = storage.append::<ClientInvoice>(vec![invoice.clone()])?;
            info!(count, "Added invoice");
            println!("Added invoice: {}", invoice);
        }
        AddCommands::Recurring {
            vendor,
            frequency,
            amount,
            due_month,
            notes,
        } => {
            let raw = RawRecurring {
                vendor,
                frequency,
                amount,
                due_month: due_month.unwrap_or_default(),
                notes,
            };
            let expense = validator.recurring(&raw).map_err(FinanceError::Validation)?;
            let count = storage.append::<RecurringExpense>(vec![expense.clone()])?;
            info!(count, "Added recurring expense");
            println!(
                "Added recurring expense: {} ({}, {} per month)",
                expense.vendor,
                expense.frequency,
                expense.monthly_equivalent()
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::BizdashPaths;
    use crate::services::validation::Validator;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BizdashPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths, Validator::default()).unwrap();
        (temp_dir, storage)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn test_add_transaction_defaults_to_today() {
        let (_temp_dir, storage) = create_test_storage();
        let cmd = AddCommands::Transaction {
            kind: "expense".into(),
            category: "Rent".into(),
            amount: "400".into(),
            date: None,
            description: String::new(),
        };
        handle_add_command(&storage, today(), cmd).unwrap();

        let stored = storage.load::<Transaction>().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].date, today());
    }

    #[test]
    fn test_add_invoice_rejects_bad_range() {
        let (_temp_dir, storage) = create_test_storage();
        let cmd = AddCommands::Invoice {
            client: "ABC Corp".into(),
            project: "Website".into(),
            amount: "100".into(),
            sent: "2024-02-01".into(),
            due: "2024-01-01".into(),
            status: "Sent".into(),
        };

        let err = handle_add_command(&storage, today(), cmd).unwrap_err();
        assert!(err.is_validation());
        assert!(storage.load::<ClientInvoice>().unwrap().is_empty());
    }

    #[test]
    fn test_add_recurring_requires_due_month_for_annual() {
        let (_temp_dir, storage) = create_test_storage();
        let cmd = AddCommands::Recurring {
            vendor: "Insurance".into(),
            frequency: "Annual".into(),
            amount: "2400".into(),
            due_month: None,
            notes: String::new(),
        };

        let err = handle_add_command(&storage, today(), cmd).unwrap_err();
        assert!(err.to_string().contains("Due Month is required"));
    }
}
