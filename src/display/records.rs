//! Record tables
//!
//! Renders stored records with `tabled` for the `list` command.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::{ClientInvoice, RecurringExpense, Transaction};

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    kind: &'static str,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Description")]
    description: String,
}

#[derive(Tabled)]
struct InvoiceRow {
    #[tabled(rename = "Client")]
    client: String,
    #[tabled(rename = "Project")]
    project: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Sent")]
    sent: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Status")]
    status: &'static str,
}

#[derive(Tabled)]
struct RecurringRow {
    #[tabled(rename = "Vendor")]
    vendor: String,
    #[tabled(rename = "Frequency")]
    frequency: &'static str,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Due Month")]
    due_month: String,
    #[tabled(rename = "Monthly Equiv.")]
    monthly: String,
    #[tabled(rename = "Notes")]
    notes: String,
}

/// Format transactions as a table, oldest first
pub fn format_transactions(transactions: &[Transaction], symbol: &str) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by_key(|t| t.date);

    let rows = sorted.into_iter().map(|t| TransactionRow {
        date: t.date.format("%Y-%m-%d").to_string(),
        kind: t.kind.as_str(),
        category: t.category.clone(),
        amount: t.amount.format_with_symbol(symbol),
        description: t.description.clone(),
    });

    render(Table::new(rows), 3)
}

/// Format invoices as a table with the statuses they carry
pub fn format_invoices(invoices: &[ClientInvoice], symbol: &str) -> String {
    if invoices.is_empty() {
        return "No invoices found.\n".to_string();
    }

    let rows = invoices.iter().map(|i| InvoiceRow {
        client: i.client.clone(),
        project: i.project.clone(),
        amount: i.amount.format_with_symbol(symbol),
        sent: i.invoice_sent_date.format("%Y-%m-%d").to_string(),
        due: i.due_date.format("%Y-%m-%d").to_string(),
        status: i.status.as_str(),
    });

    render(Table::new(rows), 2)
}

/// Format recurring expenses as a table
pub fn format_recurring(expenses: &[RecurringExpense], symbol: &str) -> String {
    if expenses.is_empty() {
        return "No recurring expenses found.\n".to_string();
    }

    let rows = expenses.iter().map(|e| RecurringRow {
        vendor: e.vendor.clone(),
        frequency: e.frequency.as_str(),
        amount: e.amount.format_with_symbol(symbol),
        due_month: e.due_month.map(|m| m.name().to_string()).unwrap_or_default(),
        monthly: e.monthly_equivalent().format_with_symbol(symbol),
        notes: e.notes.clone(),
    });

    let mut table = Table::new(rows);
    table.with(Modify::new(Columns::single(4)).with(Alignment::right()));
    render(table, 2)
}

/// Apply the shared style and right-align the amount column
fn render(mut table: Table, amount_column: usize) -> String {
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::single(amount_column)).with(Alignment::right()));
    format!("{}\n", table)
}
