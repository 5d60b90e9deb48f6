//! YAML export of the computed dashboard

use std::io::Write;

use super::json::DashboardExport;
use crate::error::{FinanceError, FinanceResult};

/// Write the export as YAML with a short header comment
pub fn export_yaml<W: Write>(export: &DashboardExport, writer: &mut W) -> FinanceResult<()> {
    writeln!(writer, "# bizdash dashboard export")
        .map_err(|e| FinanceError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", export.exported_at)
        .map_err(|e| FinanceError::Export(e.to_string()))?;
    writeln!(writer, "# As of: {}", export.as_of).map_err(|e| FinanceError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| FinanceError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, export).map_err(|e| FinanceError::Export(e.to_string()))?;

    Ok(())
}
