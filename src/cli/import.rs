//! CLI command for CSV import

use std::path::Path;

use clap::ValueEnum;
use tracing::debug;

use crate::display::format_import_report;
use crate::error::FinanceResult;
use crate::models::{ClientInvoice, RecurringExpense, Transaction};
use crate::services::import::{ImportService, RecordKind};
use crate::storage::{Storage, StoredRecord};

/// Which record file an import targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ImportKind {
    Transactions,
    #[value(alias = "invoices")]
    Clients,
    Recurring,
}

impl From<ImportKind> for RecordKind {
    fn from(kind: ImportKind) -> Self {
        match kind {
            ImportKind::Transactions => RecordKind::Transactions,
            ImportKind::Clients => RecordKind::Clients,
            ImportKind::Recurring => RecordKind::Recurring,
        }
    }
}

/// Import a CSV file and store the accepted rows
///
/// A schema mismatch aborts before anything is stored. Rejected rows are
/// reported but do not stop the accepted ones from being saved.
pub fn handle_import_command(storage: &Storage, kind: ImportKind, file: &Path) -> FinanceResult<()> {
    debug!(kind = %RecordKind::from(kind), file = %file.display(), "Importing CSV");

    match kind {
        ImportKind::Transactions => import_into::<Transaction>(storage, file),
        ImportKind::Clients => import_into::<ClientInvoice>(storage, file),
        ImportKind::Recurring => import_into::<RecurringExpense>(storage, file),
    }
}

fn import_into<T: StoredRecord>(storage: &Storage, file: &Path) -> FinanceResult<()> {
    let report = ImportService::new(storage.validator()).import_file::<T>(file)?;
    let accepted = report.accepted_count();

    print!("{}", format_import_report(T::KIND, &report));

    if accepted > 0 {
        let total = storage.append(report.accepted)?;
        println!("{} now holds {} record(s)", T::file(storage.paths()).display(), total);
    }

    Ok(())
}
