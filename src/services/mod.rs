//! Service layer for bizdash
//!
//! Validation of raw records and bulk CSV import. Both are pure with respect
//! to storage: they turn strings into models and leave persisting to the
//! caller.

pub mod import;
pub mod validation;

pub use import::{ImportRecord, ImportReport, ImportService, RecordKind, RowError};
pub use validation::{RawInvoice, RawRecurring, RawTransaction, Validator};
