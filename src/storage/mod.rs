//! Storage layer for bizdash
//!
//! One CSV file per record kind under the data directory, in the same column
//! layout the importer accepts. Loading goes through the validation layer,
//! so a hand-edited file is held to the same rules as an import.

pub mod file_io;

use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, warn};

pub use file_io::write_csv_atomic;

use crate::config::paths::BizdashPaths;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{ClientInvoice, RecordSet, RecurringExpense, Transaction};
use crate::services::import::{ImportRecord, ImportService};
use crate::services::validation::{RawInvoice, RawRecurring, RawTransaction, Validator};

/// A record kind that lives in its own CSV file
pub trait StoredRecord: ImportRecord {
    type Raw: Serialize;

    fn file(paths: &BizdashPaths) -> PathBuf;

    fn to_raw(&self, date_format: &str) -> Self::Raw;
}

impl StoredRecord for Transaction {
    type Raw = RawTransaction;

    fn file(paths: &BizdashPaths) -> PathBuf {
        paths.transactions_file()
    }

    fn to_raw(&self, date_format: &str) -> RawTransaction {
        RawTransaction::from_model(self, date_format)
    }
}

impl StoredRecord for ClientInvoice {
    type Raw = RawInvoice;

    fn file(paths: &BizdashPaths) -> PathBuf {
        paths.clients_file()
    }

    fn to_raw(&self, date_format: &str) -> RawInvoice {
        RawInvoice::from_model(self, date_format)
    }
}

impl StoredRecord for RecurringExpense {
    type Raw = RawRecurring;

    fn file(paths: &BizdashPaths) -> PathBuf {
        paths.recurring_file()
    }

    fn to_raw(&self, _date_format: &str) -> RawRecurring {
        RawRecurring::from_model(self)
    }
}

/// Reads and writes the record files
pub struct Storage {
    paths: BizdashPaths,
    validator: Validator,
}

impl Storage {
    /// Create a new Storage instance, creating the data directory if needed
    pub fn new(paths: BizdashPaths, validator: Validator) -> FinanceResult<Self> {
        paths.ensure_directories()?;
        Ok(Self { paths, validator })
    }

    pub fn paths(&self) -> &BizdashPaths {
        &self.paths
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// Load every stored record of type `T`
    ///
    /// A missing file means no records. Rows that fail validation are
    /// skipped with a warning.
    pub fn load<T: StoredRecord>(&self) -> FinanceResult<Vec<T>> {
        let path = T::file(&self.paths);
        if !path.exists() {
            debug!(path = %path.display(), "No record file yet");
            return Ok(Vec::new());
        }

        let report = ImportService::new(&self.validator).import_file::<T>(&path)?;
        for rejected in &report.rejected {
            warn!(path = %path.display(), "Skipping stored {}", rejected);
        }
        Ok(report.accepted)
    }

    /// Replace the stored records of type `T`
    pub fn save<T: StoredRecord>(&self, records: &[T]) -> FinanceResult<()> {
        let path = T::file(&self.paths);
        let rows: Vec<T::Raw> = records
            .iter()
            .map(|r| r.to_raw(self.validator.date_format()))
            .collect();

        write_csv_atomic(&path, T::KIND.columns(), &rows)?;
        debug!(path = %path.display(), count = rows.len(), "Saved records");
        Ok(())
    }

    /// Add records after the stored ones, returning the new total
    ///
    /// Refuses to write when the stored file has rows that no longer
    /// validate, since rewriting it would drop them.
    pub fn append<T: StoredRecord>(&self, records: Vec<T>) -> FinanceResult<usize> {
        let path = T::file(&self.paths);
        let mut all = if path.exists() {
            let report = ImportService::new(&self.validator).import_file::<T>(&path)?;
            if !report.is_clean() {
                let rows: Vec<String> = report
                    .rejected_rows()
                    .iter()
                    .map(|r| r.to_string())
                    .collect();
                return Err(FinanceError::Storage(format!(
                    "{} has unreadable row(s) {}; fix or remove them before adding records",
                    path.display(),
                    rows.join(", ")
                )));
            }
            report.accepted
        } else {
            Vec::new()
        };

        all.extend(records);
        self.save(&all)?;
        Ok(all.len())
    }

    /// Load a snapshot of every record kind
    pub fn load_all(&self) -> FinanceResult<RecordSet> {
        Ok(RecordSet {
            transactions: self.load()?,
            invoices: self.load()?,
            recurring: self.load()?,
        })
    }

    /// Replace every record file with `records`
    pub fn save_all(&self, records: &RecordSet) -> FinanceResult<()> {
        self.save(&records.transactions)?;
        self.save(&records.invoices)?;
        self.save(&records.recurring)?;
        Ok(())
    }
}
