//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the report engine and storage.

pub mod add;
pub mod export;
pub mod import;
pub mod list;
pub mod report;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{FinanceError, FinanceResult};
use crate::models::{DueMonth, Money, Period};

pub use add::{handle_add_command, AddCommands};
pub use export::{handle_export_command, ExportFormat};
pub use import::{handle_import_command, ImportKind};
pub use list::{handle_list_command, ListCommands};
pub use report::{handle_report_command, ReportCommands};

/// clap value parser for `--period`
pub(crate) fn parse_period(s: &str) -> Result<Period, String> {
    Period::parse(s).map_err(|e| format!("{}. Use YYYY-MM, YYYY or YYYY-MM-DD..YYYY-MM-DD", e))
}

/// clap value parser for `--month`
pub(crate) fn parse_due_month(s: &str) -> Result<DueMonth, String> {
    DueMonth::parse(s).ok_or_else(|| format!("'{}' is not a month name", s))
}

/// clap value parser for money arguments
pub(crate) fn parse_money(s: &str) -> Result<Money, String> {
    Money::parse(s).map_err(|e| e.to_string())
}

/// Create `path` and hand a buffered writer to `write`
pub(crate) fn write_to_file(
    path: &Path,
    write: impl FnOnce(&mut BufWriter<File>) -> FinanceResult<()>,
) -> FinanceResult<()> {
    let file = File::create(path).map_err(|e| {
        FinanceError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    let mut writer = BufWriter::new(file);
    write(&mut writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_period_arg() {
        assert_eq!(parse_period("2024-01").unwrap(), Period::month(2024, 1).unwrap());
        assert!(parse_period("January").unwrap_err().contains("YYYY-MM"));
    }

    #[test]
    fn test_parse_due_month_arg() {
        assert_eq!(parse_due_month("march").unwrap(), DueMonth::new(3).unwrap());
        assert!(parse_due_month("Smarch").is_err());
    }

    #[test]
    fn test_parse_money_arg() {
        assert_eq!(parse_money("$2,500").unwrap(), Money::from_dollars(2500));
        assert!(parse_money("lots").is_err());
    }
}
