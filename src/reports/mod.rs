//! Reports module for bizdash
//!
//! The computation engine. Every report is a pure function of a record
//! snapshot plus explicit parameters (reference date, policy, heuristics),
//! so calling it twice with the same inputs gives the same result.

use std::io::Write;

use serde::Serialize;

use crate::error::{FinanceError, FinanceResult};

pub mod allocation;
pub mod cash_flow;
pub mod overview;
pub mod receivables;
pub mod recurring;
pub mod savings;
pub mod spending;

pub use allocation::AllocationResult;
pub use cash_flow::{CashFlowReport, MonthFill, MonthlySummary};
pub use overview::DashboardOverview;
pub use receivables::{ClientKpi, ReceivablesReport, StatusCounts};
pub use recurring::{FrequencyTotals, RecurringDueList, RecurringItem, RecurringReport};
pub use savings::{SavingsHeuristics, SavingsSuggestion, SuggestionKind};
pub use spending::{CategoryBreakdown, CategoryShare};

/// Write a header and one CSV record per row, quoting fields as needed
///
/// The header is written even when there are no rows.
pub(crate) fn write_csv_rows<W, R, I>(writer: W, header: &[&str], rows: I) -> FinanceResult<()>
where
    W: Write,
    R: Serialize,
    I: IntoIterator<Item = R>,
{
    let export_err = |e: csv::Error| FinanceError::Export(e.to_string());

    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv.write_record(header).map_err(export_err)?;
    for row in rows {
        csv.serialize(row).map_err(export_err)?;
    }
    csv.flush().map_err(|e| FinanceError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Row<'a> {
        name: &'a str,
        amount: String,
    }

    #[test]
    fn test_fields_with_commas_are_quoted() {
        let mut out = Vec::new();
        write_csv_rows(
            &mut out,
            &["Name", "Amount"],
            [Row {
                name: "Meals, Travel",
                amount: "45.00".into(),
            }],
        )
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "Name,Amount\n\"Meals, Travel\",45.00\n");
    }

    #[test]
    fn test_header_without_rows() {
        let mut out = Vec::new();
        write_csv_rows(&mut out, &["Name", "Amount"], Vec::<Row>::new()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Name,Amount\n");
    }
}
