//! JSON export of the computed dashboard
//!
//! Bundles the stored records with every derived summary so the output can be
//! consumed without re-running the engine.

use std::io::Write;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::error::{FinanceError, FinanceResult};
use crate::models::{AllocationPolicy, DueMonth, Period, RecordSet};
use crate::reports::{
    savings, AllocationResult, CashFlowReport, CategoryBreakdown, DashboardOverview, MonthFill,
    ReceivablesReport, RecurringReport, SavingsHeuristics, SavingsSuggestion,
};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Record counts and date span of an export
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportMetadata {
    pub transaction_count: usize,
    pub invoice_count: usize,
    pub recurring_count: usize,
    pub earliest_transaction: Option<NaiveDate>,
    pub latest_transaction: Option<NaiveDate>,
}

/// Everything the dashboard shows, computed as of one reference date
#[derive(Debug, Clone, Serialize)]
pub struct DashboardExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    pub app_version: String,
    pub as_of: NaiveDate,
    pub metadata: ExportMetadata,
    pub records: RecordSet,
    pub overview: DashboardOverview,
    pub cash_flow: CashFlowReport,
    pub expense_categories: CategoryBreakdown,
    pub income_sources: CategoryBreakdown,
    /// Year to date under the configured policy
    pub allocation: AllocationResult,
    pub receivables: ReceivablesReport,
    pub recurring: RecurringReport,
    pub savings_suggestions: Vec<SavingsSuggestion>,
}

impl DashboardExport {
    pub fn build(
        records: &RecordSet,
        policy: &AllocationPolicy,
        heuristics: &SavingsHeuristics,
        today: NaiveDate,
    ) -> Self {
        let dates = records.transactions.iter().map(|t| t.date);
        let metadata = ExportMetadata {
            transaction_count: records.transactions.len(),
            invoice_count: records.invoices.len(),
            recurring_count: records.recurring.len(),
            earliest_transaction: dates.clone().min(),
            latest_transaction: dates.max(),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            as_of: today,
            metadata,
            overview: DashboardOverview::generate(records, today),
            cash_flow: CashFlowReport::generate(&records.transactions, MonthFill::Sparse),
            expense_categories: CategoryBreakdown::expenses(&records.transactions, None),
            income_sources: CategoryBreakdown::income_sources(&records.transactions, None),
            allocation: AllocationResult::from_transactions(
                &records.transactions,
                &Period::year_to_date(today),
                policy,
            ),
            receivables: ReceivablesReport::generate(&records.invoices, today),
            recurring: RecurringReport::generate(&records.recurring, DueMonth::of(today)),
            savings_suggestions: savings::suggest(&records.recurring, heuristics),
            records: records.clone(),
        }
    }
}

/// Write the export as JSON
pub fn export_json<W: Write>(export: &DashboardExport, writer: &mut W, pretty: bool) -> FinanceResult<()> {
    if pretty {
        serde_json::to_writer_pretty(writer, export)
    } else {
        serde_json::to_writer(writer, export)
    }
    .map_err(|e| FinanceError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    fn sample_export() -> DashboardExport {
        DashboardExport::build(
            &seed::sample_records(),
            &AllocationPolicy::default(),
            &SavingsHeuristics::default(),
            NaiveDate::from_ymd_opt(2024, 2, 20).unwrap(),
        )
    }

    #[test]
    fn test_build() {
        let export = sample_export();

        assert_eq!(export.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(export.metadata.transaction_count, 5);
        assert_eq!(export.metadata.invoice_count, 3);
        assert_eq!(
            export.metadata.earliest_transaction,
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
        assert_eq!(export.cash_flow.months.len(), 2);
        assert_eq!(export.receivables.count_overdue, 1);
    }

    #[test]
    fn test_json_keeps_field_names() {
        let mut out = Vec::new();
        export_json(&sample_export(), &mut out, true).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert!(value["cash_flow"]["months"][0]["margin_pct"].is_number());
        assert!(value["allocation"]["net_cushion"].is_number());
        assert!(value["receivables"]["clients"][0]["total_outstanding"].is_number());
        assert_eq!(value["recurring"]["total_monthly_equivalent"], 44900);
    }

    #[test]
    fn test_compact_json() {
        let mut out = Vec::new();
        export_json(&sample_export(), &mut out, false).unwrap();
        assert!(!String::from_utf8(out).unwrap().contains('\n'));
    }
}
