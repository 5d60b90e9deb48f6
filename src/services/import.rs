//! CSV import service
//!
//! Import runs in two phases. The header row is checked against the record
//! kind's column set first; any mismatch rejects the whole file before a
//! single row is read. After that every row is validated on its own, and
//! failures are collected per row so the valid rows still go through.

use std::fmt;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, info, warn};

use super::validation::{RawInvoice, RawRecurring, RawTransaction, Validator};
use crate::error::{FinanceError, FinanceResult, ValidationError, ValidationErrors};
use crate::models::{ClientInvoice, RecurringExpense, Transaction};

/// The three importable record kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Transactions,
    Clients,
    Recurring,
}

impl RecordKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Transactions => "Transactions",
            Self::Clients => "Clients",
            Self::Recurring => "Recurring",
        }
    }

    /// Canonical column headers, in storage order
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Self::Transactions => &RawTransaction::COLUMNS,
            Self::Clients => &RawInvoice::COLUMNS,
            Self::Recurring => &RawRecurring::COLUMNS,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Header comparison key: case-insensitive, `_` equivalent to a space
pub fn normalize_header(header: &str) -> String {
    header
        .trim()
        .trim_start_matches('\u{feff}')
        .replace('_', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Where each canonical column sits in the file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    positions: Vec<usize>,
    width: usize,
}

impl ColumnMap {
    /// Match a header row against a record kind's columns
    ///
    /// Column order is free; every canonical column must appear exactly once
    /// and nothing else may appear.
    pub fn from_headers(kind: RecordKind, headers: &StringRecord) -> FinanceResult<Self> {
        let normalized: Vec<String> = headers.iter().map(normalize_header).collect();
        let mut claimed = vec![false; normalized.len()];
        let mut positions = Vec::with_capacity(kind.columns().len());
        let mut missing = Vec::new();

        for column in kind.columns() {
            let key = normalize_header(column);
            match normalized
                .iter()
                .enumerate()
                .position(|(i, h)| !claimed[i] && *h == key)
            {
                Some(i) => {
                    claimed[i] = true;
                    positions.push(i);
                }
                None => missing.push((*column).to_string()),
            }
        }

        let unexpected: Vec<String> = headers
            .iter()
            .zip(&claimed)
            .filter(|(_, claimed)| !**claimed)
            .map(|(header, _)| header.trim().to_string())
            .collect();

        if !missing.is_empty() || !unexpected.is_empty() {
            return Err(FinanceError::SchemaMismatch {
                kind: kind.label(),
                missing,
                unexpected,
            });
        }

        Ok(Self {
            positions,
            width: headers.len(),
        })
    }

    /// Fields of a data row in canonical column order
    fn canonical<'r>(&self, record: &'r StringRecord) -> Result<Vec<&'r str>, ValidationError> {
        if record.len() != self.width {
            return Err(ValidationError::MalformedRow {
                message: format!("expected {} fields, found {}", self.width, record.len()),
            });
        }
        Ok(self
            .positions
            .iter()
            .map(|&i| record.get(i).unwrap_or_default())
            .collect())
    }
}

/// A record type that can be imported from CSV
pub trait ImportRecord: Sized {
    const KIND: RecordKind;

    /// Validate one row whose fields are in canonical column order
    fn validate_fields(validator: &Validator, fields: &[&str]) -> Result<Self, ValidationErrors>;
}

impl ImportRecord for Transaction {
    const KIND: RecordKind = RecordKind::Transactions;

    fn validate_fields(validator: &Validator, fields: &[&str]) -> Result<Self, ValidationErrors> {
        validator.transaction(&RawTransaction::from_fields(fields))
    }
}

impl ImportRecord for ClientInvoice {
    const KIND: RecordKind = RecordKind::Clients;

    fn validate_fields(validator: &Validator, fields: &[&str]) -> Result<Self, ValidationErrors> {
        validator.invoice(&RawInvoice::from_fields(fields))
    }
}

impl ImportRecord for RecurringExpense {
    const KIND: RecordKind = RecordKind::Recurring;

    fn validate_fields(validator: &Validator, fields: &[&str]) -> Result<Self, ValidationErrors> {
        validator.recurring(&RawRecurring::from_fields(fields))
    }
}

/// A rejected data row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    /// 1-based data row number (the header is not counted)
    pub row: usize,
    pub errors: ValidationErrors,
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}: {}", self.row, self.errors)
    }
}

/// Outcome of an import batch that passed the schema check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport<T> {
    pub accepted: Vec<T>,
    pub rejected: Vec<RowError>,
}

impl<T> Default for ImportReport<T> {
    fn default() -> Self {
        Self {
            accepted: Vec::new(),
            rejected: Vec::new(),
        }
    }
}

impl<T> ImportReport<T> {
    pub fn accepted_count(&self) -> usize {
        self.accepted.len()
    }

    pub fn rejected_count(&self) -> usize {
        self.rejected.len()
    }

    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }

    /// Row numbers that were rejected
    pub fn rejected_rows(&self) -> Vec<usize> {
        self.rejected.iter().map(|r| r.row).collect()
    }
}

/// Service for CSV import
pub struct ImportService<'a> {
    validator: &'a Validator,
}

impl<'a> ImportService<'a> {
    pub fn new(validator: &'a Validator) -> Self {
        Self { validator }
    }

    /// Import records of type `T` from any reader
    pub fn import_reader<T: ImportRecord, R: Read>(&self, reader: R) -> FinanceResult<ImportReport<T>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let columns = ColumnMap::from_headers(T::KIND, &headers).map_err(|e| {
            warn!(kind = %T::KIND, error = %e, "Import rejected");
            e
        })?;

        let mut report = ImportReport::default();
        for (idx, result) in reader.records().enumerate() {
            let row = idx + 1;
            let outcome = match result {
                Ok(record) => self.validate_record::<T>(&columns, &record),
                Err(e) => Err(ValidationError::MalformedRow {
                    message: e.to_string(),
                }
                .into()),
            };

            match outcome {
                Ok(record) => report.accepted.push(record),
                Err(errors) => {
                    warn!(kind = %T::KIND, row, error = %errors, "Rejected row");
                    report.rejected.push(RowError { row, errors });
                }
            }
        }

        info!(
            kind = %T::KIND,
            accepted = report.accepted_count(),
            rejected = report.rejected_count(),
            "Import finished"
        );
        Ok(report)
    }

    /// Import records from an in-memory CSV string
    pub fn import_str<T: ImportRecord>(&self, data: &str) -> FinanceResult<ImportReport<T>> {
        self.import_reader(data.as_bytes())
    }

    /// Import records from a CSV file on disk
    pub fn import_file<T: ImportRecord>(&self, path: &Path) -> FinanceResult<ImportReport<T>> {
        debug!(path = %path.display(), kind = %T::KIND, "Importing file");
        let file = std::fs::File::open(path).map_err(|e| {
            FinanceError::Io(format!("Failed to open {}: {}", path.display(), e))
        })?;
        self.import_reader(std::io::BufReader::new(file))
    }

    fn validate_record<T: ImportRecord>(
        &self,
        columns: &ColumnMap,
        record: &StringRecord,
    ) -> Result<T, ValidationErrors> {
        let fields = columns.canonical(record)?;
        T::validate_fields(self.validator, &fields)
    }
}
