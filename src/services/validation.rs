//! Validation layer
//!
//! Turns raw string records (form input or CSV rows) into typed models.
//! Every field is checked, so a rejected record reports all of its problems
//! at once rather than only the first.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationErrors};
use crate::models::{
    ClientInvoice, DueMonth, Frequency, InvoiceStatus, Money, RecurringExpense, Transaction,
    TransactionType,
};

/// Unvalidated transaction fields, named after their CSV headers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTransaction {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Amount")]
    pub amount: String,
    #[serde(rename = "Description")]
    pub description: String,
}

impl RawTransaction {
    pub const COLUMNS: [&'static str; 5] = ["Date", "Type", "Category", "Amount", "Description"];

    /// Build from fields laid out in [`Self::COLUMNS`] order
    pub fn from_fields(fields: &[&str]) -> Self {
        let field = |i: usize| fields.get(i).copied().unwrap_or_default().to_string();
        Self {
            date: field(0),
            kind: field(1),
            category: field(2),
            amount: field(3),
            description: field(4),
        }
    }

    /// Render a stored transaction back into its string form
    pub fn from_model(txn: &Transaction, date_format: &str) -> Self {
        Self {
            date: txn.date.format(date_format).to_string(),
            kind: txn.kind.as_str().to_string(),
            category: txn.category.clone(),
            amount: txn.amount.to_decimal_string(),
            description: txn.description.clone(),
        }
    }
}

/// Unvalidated client invoice fields, named after their CSV headers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInvoice {
    #[serde(rename = "Client")]
    pub client: String,
    #[serde(rename = "Project")]
    pub project: String,
    #[serde(rename = "Amount")]
    pub amount: String,
    #[serde(rename = "Invoice Sent")]
    pub invoice_sent: String,
    #[serde(rename = "Due Date")]
    pub due_date: String,
    #[serde(rename = "Status")]
    pub status: String,
}

impl RawInvoice {
    pub const COLUMNS: [&'static str; 6] = [
        "Client",
        "Project",
        "Amount",
        "Invoice Sent",
        "Due Date",
        "Status",
    ];

    /// Build from fields laid out in [`Self::COLUMNS`] order
    pub fn from_fields(fields: &[&str]) -> Self {
        let field = |i: usize| fields.get(i).copied().unwrap_or_default().to_string();
        Self {
            client: field(0),
            project: field(1),
            amount: field(2),
            invoice_sent: field(3),
            due_date: field(4),
            status: field(5),
        }
    }

    pub fn from_model(invoice: &ClientInvoice, date_format: &str) -> Self {
        Self {
            client: invoice.client.clone(),
            project: invoice.project.clone(),
            amount: invoice.amount.to_decimal_string(),
            invoice_sent: invoice.invoice_sent_date.format(date_format).to_string(),
            due_date: invoice.due_date.format(date_format).to_string(),
            status: invoice.status.as_str().to_string(),
        }
    }
}

/// Unvalidated recurring expense fields, named after their CSV headers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecurring {
    #[serde(rename = "Vendor")]
    pub vendor: String,
    #[serde(rename = "Frequency")]
    pub frequency: String,
    #[serde(rename = "Amount")]
    pub amount: String,
    #[serde(rename = "Due Month")]
    pub due_month: String,
    #[serde(rename = "Notes")]
    pub notes: String,
}

impl RawRecurring {
    pub const COLUMNS: [&'static str; 5] = ["Vendor", "Frequency", "Amount", "Due Month", "Notes"];

    /// Build from fields laid out in [`Self::COLUMNS`] order
    pub fn from_fields(fields: &[&str]) -> Self {
        let field = |i: usize| fields.get(i).copied().unwrap_or_default().to_string();
        Self {
            vendor: field(0),
            frequency: field(1),
            amount: field(2),
            due_month: field(3),
            notes: field(4),
        }
    }

    pub fn from_model(expense: &RecurringExpense) -> Self {
        Self {
            vendor: expense.vendor.clone(),
            frequency: expense.frequency.as_str().to_string(),
            amount: expense.amount.to_decimal_string(),
            due_month: expense
                .due_month
                .map(|m| m.name().to_string())
                .unwrap_or_default(),
            notes: expense.notes.clone(),
        }
    }
}

/// Validates raw records under a single accepted date format
#[derive(Debug, Clone)]
pub struct Validator {
    date_format: String,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new("%Y-%m-%d")
    }
}

impl Validator {
    pub fn new(date_format: impl Into<String>) -> Self {
        Self {
            date_format: date_format.into(),
        }
    }

    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    /// Validate and normalize a transaction
    pub fn transaction(&self, raw: &RawTransaction) -> Result<Transaction, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let date = self.date(&mut errors, "Date", &raw.date);
        let kind = parse_enum(
            &mut errors,
            "Type",
            &raw.kind,
            TransactionType::parse,
            TransactionType::ALL.iter().map(|t| t.as_str()).collect(),
        );
        let category = required(&mut errors, "Category", &raw.category);
        let amount = amount(&mut errors, "Amount", &raw.amount);

        match (date, kind, category, amount) {
            (Some(date), Some(kind), Some(category), Some(amount)) if errors.is_empty() => {
                Ok(Transaction::new(date, kind, category, amount)
                    .with_description(raw.description.trim()))
            }
            _ => Err(errors),
        }
    }

    /// Validate and normalize a client invoice
    ///
    /// Fails with `InvalidDateRange` when the due date precedes the sent date.
    pub fn invoice(&self, raw: &RawInvoice) -> Result<ClientInvoice, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let client = required(&mut errors, "Client", &raw.client);
        let project = required(&mut errors, "Project", &raw.project);
        let amount = amount(&mut errors, "Amount", &raw.amount);
        let sent = self.date(&mut errors, "Invoice Sent", &raw.invoice_sent);
        let due = self.date(&mut errors, "Due Date", &raw.due_date);
        let status = parse_enum(
            &mut errors,
            "Status",
            &raw.status,
            InvoiceStatus::parse,
            InvoiceStatus::ALL.iter().map(|s| s.as_str()).collect(),
        );

        if let (Some(sent), Some(due)) = (sent, due) {
            if due < sent {
                errors.push(ValidationError::InvalidDateRange {
                    sent: sent.format(&self.date_format).to_string(),
                    due: due.format(&self.date_format).to_string(),
                });
            }
        }

        match (client, project, amount, sent, due, status) {
            (Some(client), Some(project), Some(amount), Some(sent), Some(due), Some(status))
                if errors.is_empty() =>
            {
                Ok(ClientInvoice::new(client, project, amount, sent, due, status))
            }
            _ => Err(errors),
        }
    }

    /// Validate and normalize a recurring expense
    ///
    /// The due month is required for cadences pinned to a calendar month and
    /// discarded for the others.
    pub fn recurring(&self, raw: &RawRecurring) -> Result<RecurringExpense, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let vendor = required(&mut errors, "Vendor", &raw.vendor);
        let frequency = parse_enum(
            &mut errors,
            "Frequency",
            &raw.frequency,
            Frequency::parse,
            Frequency::ALL.iter().map(|f| f.as_str()).collect(),
        );
        let amount = amount(&mut errors, "Amount", &raw.amount);

        let due_month = match frequency {
            Some(frequency) if frequency.requires_due_month() => {
                parse_enum(
                    &mut errors,
                    "Due Month",
                    &raw.due_month,
                    DueMonth::parse,
                    DueMonth::names().to_vec(),
                )
            }
            _ => None,
        };

        match (vendor, frequency, amount) {
            (Some(vendor), Some(frequency), Some(amount)) if errors.is_empty() => {
                Ok(RecurringExpense {
                    vendor,
                    frequency,
                    amount,
                    due_month,
                    notes: raw.notes.trim().to_string(),
                })
            }
            _ => Err(errors),
        }
    }

    fn date(&self, errors: &mut ValidationErrors, field: &'static str, value: &str) -> Option<NaiveDate> {
        let value = required(errors, field, value)?;
        match NaiveDate::parse_from_str(&value, &self.date_format) {
            Ok(date) => Some(date),
            Err(_) => {
                errors.push(ValidationError::InvalidDate {
                    field,
                    value,
                    format: self.date_format.clone(),
                });
                None
            }
        }
    }
}

fn required(errors: &mut ValidationErrors, field: &'static str, value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        errors.push(ValidationError::MissingRequiredField { field });
        None
    } else {
        Some(value.to_string())
    }
}

fn amount(errors: &mut ValidationErrors, field: &'static str, value: &str) -> Option<Money> {
    let value = required(errors, field, value)?;
    match Money::parse(&value) {
        Ok(money) if !money.is_negative() => Some(money),
        _ => {
            errors.push(ValidationError::InvalidAmount { field, value });
            None
        }
    }
}

fn parse_enum<T>(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &str,
    parse: impl Fn(&str) -> Option<T>,
    expected: Vec<&'static str>,
) -> Option<T> {
    let value = required(errors, field, value)?;
    let parsed = parse(&value);
    if parsed.is_none() {
        errors.push(ValidationError::InvalidEnumValue {
            field,
            value,
            expected,
        });
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_txn(date: &str, kind: &str, category: &str, amount: &str) -> RawTransaction {
        RawTransaction {
            date: date.into(),
            kind: kind.into(),
            category: category.into(),
            amount: amount.into(),
            description: String::new(),
        }
    }

    fn raw_invoice(sent: &str, due: &str, status: &str) -> RawInvoice {
        RawInvoice {
            client: "ABC Corp".into(),
            project: "Website".into(),
            amount: "8000".into(),
            invoice_sent: sent.into(),
            due_date: due.into(),
            status: status.into(),
        }
    }

    #[test]
    fn test_valid_transaction_is_normalized() {
        let validator = Validator::default();
        let mut raw = raw_txn(" 2024-01-05 ", "income", " Sales ", "$1,000.00");
        raw.description = "  Project Alpha ".into();

        let txn = validator.transaction(&raw).unwrap();
        assert_eq!(txn.date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(txn.kind, TransactionType::Income);
        assert_eq!(txn.category, "Sales");
        assert_eq!(txn.amount, Money::from_dollars(1000));
        assert_eq!(txn.description, "Project Alpha");
    }

    #[test]
    fn test_transaction_reports_every_bad_field() {
        let validator = Validator::default();
        let raw = raw_txn("05/01/2024", "Refund", "", "-3");

        let errors = validator.transaction(&raw).unwrap_err();
        assert_eq!(errors.fields(), vec!["Date", "Type", "Category", "Amount"]);
    }

    #[test]
    fn test_negative_and_non_numeric_amounts() {
        let validator = Validator::default();

        for bad in ["-10", "ten", "1.2.3"] {
            let errors = validator
                .transaction(&raw_txn("2024-01-05", "Expense", "Rent", bad))
                .unwrap_err();
            assert!(errors.any(|e| matches!(e, ValidationError::InvalidAmount { .. })));
        }

        let zero = validator
            .transaction(&raw_txn("2024-01-05", "Expense", "Rent", "0"))
            .unwrap();
        assert!(zero.amount.is_zero());
    }

    #[test]
    fn test_amount_above_max_is_invalid() {
        let validator = Validator::default();
        let errors = validator
            .transaction(&raw_txn("2024-01-05", "Income", "Sales", "90000000000000000"))
            .unwrap_err();
        assert_eq!(errors.fields(), vec!["Amount"]);
        assert!(errors.any(|e| matches!(e, ValidationError::InvalidAmount { .. })));
    }

    #[test]
    fn test_missing_amount_is_missing_field() {
        let validator = Validator::default();
        let errors = validator
            .transaction(&raw_txn("2024-01-05", "Expense", "Rent", "  "))
            .unwrap_err();
        assert_eq!(
            errors.iter().next(),
            Some(&ValidationError::MissingRequiredField { field: "Amount" })
        );
    }

    #[test]
    fn test_custom_date_format() {
        let validator = Validator::new("%m/%d/%Y");
        let txn = validator
            .transaction(&raw_txn("01/05/2024", "Expense", "Rent", "400"))
            .unwrap();
        assert_eq!(txn.date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());

        assert!(validator
            .transaction(&raw_txn("2024-01-05", "Expense", "Rent", "400"))
            .is_err());
    }

    #[test]
    fn test_invoice_due_before_sent() {
        let validator = Validator::default();
        let errors = validator
            .invoice(&raw_invoice("2024-02-10", "2024-01-10", "Sent"))
            .unwrap_err();

        assert_eq!(
            errors.iter().collect::<Vec<_>>(),
            vec![&ValidationError::InvalidDateRange {
                sent: "2024-02-10".into(),
                due: "2024-01-10".into(),
            }]
        );
    }

    #[test]
    fn test_invoice_same_day_due_is_valid() {
        let validator = Validator::default();
        let invoice = validator
            .invoice(&raw_invoice("2024-01-10", "2024-01-10", "due"))
            .unwrap();
        assert_eq!(invoice.status, InvoiceStatus::Due);
    }

    #[test]
    fn test_invoice_unknown_status() {
        let validator = Validator::default();
        let errors = validator
            .invoice(&raw_invoice("2024-01-10", "2024-02-10", "Pending"))
            .unwrap_err();
        assert!(errors.any(|e| matches!(
            e,
            ValidationError::InvalidEnumValue { field: "Status", .. }
        )));
    }

    #[test]
    fn test_recurring_due_month_rules() {
        let validator = Validator::default();

        let annual = RawRecurring {
            vendor: "Insurance".into(),
            frequency: "annual".into(),
            amount: "2400".into(),
            due_month: "".into(),
            notes: String::new(),
        };
        let errors = validator.recurring(&annual).unwrap_err();
        assert_eq!(errors.fields(), vec!["Due Month"]);

        let annual = RawRecurring {
            due_month: "Jan".into(),
            ..annual
        };
        let expense = validator.recurring(&annual).unwrap();
        assert_eq!(expense.frequency, Frequency::Annual);
        assert_eq!(expense.due_month, DueMonth::new(1));

        let monthly = RawRecurring {
            vendor: "AWS".into(),
            frequency: "Monthly".into(),
            amount: "50".into(),
            due_month: "March".into(),
            notes: "Cloud hosting".into(),
        };
        let expense = validator.recurring(&monthly).unwrap();
        assert_eq!(expense.due_month, None);

        for due_month in ["", "June"] {
            let weekly = RawRecurring {
                vendor: "Cleaner".into(),
                frequency: "Weekly".into(),
                amount: "40".into(),
                due_month: due_month.into(),
                notes: String::new(),
            };
            let expense = validator.recurring(&weekly).unwrap();
            assert_eq!(expense.frequency, Frequency::Weekly);
            assert_eq!(expense.due_month, None);
        }
    }

    #[test]
    fn test_recurring_bad_due_month() {
        let validator = Validator::default();
        let raw = RawRecurring {
            vendor: "Microsoft".into(),
            frequency: "Quarterly".into(),
            amount: "300".into(),
            due_month: "13".into(),
            notes: String::new(),
        };
        let errors = validator.recurring(&raw).unwrap_err();
        assert!(errors.any(|e| matches!(
            e,
            ValidationError::InvalidEnumValue { field: "Due Month", .. }
        )));
    }

    #[test]
    fn test_model_renders_back_to_valid_raw() {
        let validator = Validator::default();
        let raw = raw_invoice("2024-01-15", "2024-02-15", "Due");
        let invoice = validator.invoice(&raw).unwrap();

        let rendered = RawInvoice::from_model(&invoice, validator.date_format());
        assert_eq!(rendered.amount, "8000.00");
        assert_eq!(validator.invoice(&rendered).unwrap(), invoice);
    }
}
