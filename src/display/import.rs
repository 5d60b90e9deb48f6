//! Import result display

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::services::import::{ImportReport, RecordKind};

#[derive(Tabled)]
struct RejectedRow {
    #[tabled(rename = "Row")]
    row: usize,
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "Problem")]
    problem: String,
}

/// Summary line plus one table row per rejected field
pub fn format_import_report<T>(kind: RecordKind, report: &ImportReport<T>) -> String {
    let mut output = format!(
        "{}: {} row(s) imported, {} rejected\n",
        kind,
        report.accepted_count(),
        report.rejected_count()
    );

    if report.is_clean() {
        return output;
    }

    let rows = report.rejected.iter().flat_map(|rejected| {
        rejected.errors.iter().map(move |error| RejectedRow {
            row: rejected.row,
            field: error.field().unwrap_or("-").to_string(),
            problem: error.to_string(),
        })
    });

    let mut table = Table::new(rows);
    table.with(Style::sharp());
    output.push_str(&table.to_string());
    output.push('\n');
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Transaction;
    use crate::services::validation::Validator;
    use crate::services::ImportService;

    #[test]
    fn test_clean_import() {
        let validator = Validator::default();
        let report = ImportService::new(&validator)
            .import_str::<Transaction>(
                "Date,Type,Category,Amount,Description\n2024-01-05,Income,Sales,10,\n",
            )
            .unwrap();

        assert_eq!(
            format_import_report(RecordKind::Transactions, &report),
            "Transactions: 1 row(s) imported, 0 rejected\n"
        );
    }

    #[test]
    fn test_rejected_rows_listed() {
        let validator = Validator::default();
        let report = ImportService::new(&validator)
            .import_str::<Transaction>(
                "Date,Type,Category,Amount,Description\n2024-01-05,Refund,Sales,-1,\n",
            )
            .unwrap();

        let output = format_import_report(RecordKind::Transactions, &report);
        assert!(output.starts_with("Transactions: 0 row(s) imported, 1 rejected"));
        assert!(output.contains("Type 'Refund' is not one of: Income, Expense"));
        assert!(output.contains("Amount must be a non-negative number"));
    }
}
