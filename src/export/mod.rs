//! Export module for bizdash
//!
//! Serializes the full computed dashboard:
//! - JSON: machine-readable
//! - YAML: human-readable

pub mod json;
pub mod yaml;

pub use json::{export_json, DashboardExport, ExportMetadata, EXPORT_SCHEMA_VERSION};
pub use yaml::export_yaml;
