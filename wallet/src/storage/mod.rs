//! Storage and persistence layer
//!
//! - File system operations
//! - Preference models

mod file_system;
mod models;

pub use file_system::PreferenceStore;
pub use models::Preferences;
