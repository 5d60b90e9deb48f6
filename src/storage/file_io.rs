//! CSV file I/O with atomic writes
//!
//! Writes go to a temp file in the same directory and are renamed into
//! place, so a record file is either fully written or left untouched.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::FinanceError;

/// Write rows as CSV atomically (write to temp, then rename)
///
/// The header row is always written, even when `rows` is empty.
pub fn write_csv_atomic<T, P>(path: P, header: &[&str], rows: &[T]) -> Result<(), FinanceError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            FinanceError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp_path = path.with_extension("csv.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| FinanceError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(BufWriter::new(file));

    writer
        .write_record(header)
        .map_err(|e| FinanceError::Storage(format!("Failed to write header: {}", e)))?;
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| FinanceError::Storage(format!("Failed to serialize row: {}", e)))?;
    }

    let mut buffered = writer
        .into_inner()
        .map_err(|e| FinanceError::Storage(format!("Failed to flush data: {}", e)))?;
    buffered
        .flush()
        .map_err(|e| FinanceError::Storage(format!("Failed to flush data: {}", e)))?;

    // Sync to disk before rename
    buffered
        .get_ref()
        .sync_all()
        .map_err(|e| FinanceError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        FinanceError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}
