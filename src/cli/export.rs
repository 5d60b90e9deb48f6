//! CLI command for dashboard export
//!
//! Writes every record plus every computed report as one JSON or YAML
//! document, to a file or to stdout.

use std::io::{self, Write};
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::ValueEnum;
use tracing::info;

use crate::config::Settings;
use crate::error::FinanceResult;
use crate::export::{export_json, export_yaml, DashboardExport};
use crate::storage::Storage;

use super::write_to_file;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// JSON format
    Json,
    /// YAML format (human-readable)
    Yaml,
}

/// Handle export command
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    today: NaiveDate,
    format: ExportFormat,
    output: Option<PathBuf>,
    pretty: bool,
) -> FinanceResult<()> {
    let records = storage.load_all()?;
    let export = DashboardExport::build(&records, &settings.allocation, &settings.savings, today);
    info!(
        transactions = export.metadata.transaction_count,
        invoices = export.metadata.invoice_count,
        recurring = export.metadata.recurring_count,
        "Building dashboard export"
    );

    match output {
        Some(path) => {
            write_to_file(&path, |w| match format {
                ExportFormat::Json => export_json(&export, w, pretty),
                ExportFormat::Yaml => export_yaml(&export, w),
            })?;
            println!("Dashboard exported to: {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            match format {
                ExportFormat::Json => export_json(&export, &mut handle, pretty)?,
                ExportFormat::Yaml => export_yaml(&export, &mut handle)?,
            }
            writeln!(handle)?;
        }
    }

    Ok(())
}
