//! Core data models for bizdash
//!
//! The three record kinds (transactions, client invoices, recurring
//! expenses), the money and calendar types they are built from, and the
//! allocation policy that parameterizes income splitting.

pub mod invoice;
pub mod money;
pub mod period;
pub mod policy;
pub mod recurring;
pub mod transaction;

use serde::{Deserialize, Serialize};

pub use invoice::{ClientInvoice, InvoiceStatus};
pub use money::Money;
pub use period::{Month, Period};
pub use policy::{AllocationPolicy, PolicyError};
pub use recurring::{DueMonth, Frequency, RecurringExpense};
pub use transaction::{Transaction, TransactionType};

/// A snapshot of every stored record, handed to the engine per call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSet {
    pub transactions: Vec<Transaction>,
    pub invoices: Vec<ClientInvoice>,
    pub recurring: Vec<RecurringExpense>,
}

impl RecordSet {
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty() && self.invoices.is_empty() && self.recurring.is_empty()
    }
}
