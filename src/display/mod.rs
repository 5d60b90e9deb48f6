//! Display formatting for terminal output
//!
//! Record tables, import results and savings suggestions. Reports format
//! themselves through their own `format_terminal`.

pub mod import;
pub mod records;
pub mod savings;

pub use import::format_import_report;
pub use records::{format_invoices, format_recurring, format_transactions};
pub use savings::format_suggestions;
