//! Configuration module for bizdash
//!
//! - Data directory resolution
//! - Persisted user settings, including the allocation policy

pub mod paths;
pub mod settings;

pub use paths::BizdashPaths;
pub use settings::Settings;
