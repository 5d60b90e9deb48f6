//! bizdash - Small-business financial dashboard
//!
//! This library provides the computation and validation engine behind the
//! `bizdash` command: CSV schema checks and row validation, cash-flow and
//! category reports, income allocation, receivables tracking, recurring cost
//! analysis and savings suggestions.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Records, money, calendar periods and the allocation policy
//! - `services`: Row validation and CSV import
//! - `reports`: The computation engine
//! - `storage`: CSV file storage layer
//! - `export`: JSON and YAML dashboard export
//! - `display`: Terminal tables
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use bizdash::reports::DashboardOverview;
//!
//! let records = bizdash::seed::sample_records();
//! let today = chrono::NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
//! let overview = DashboardOverview::generate(&records, today);
//! println!("{}", overview.format_terminal("$"));
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod seed;
pub mod services;
pub mod storage;

pub use error::{FinanceError, FinanceResult};
