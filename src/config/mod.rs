//! Configuration management for the barcode generator
//!
//! - **app_config**: the persisted `AppConfig` document
//! - **store**: loading and saving it at the per-user data path

pub mod app_config;
pub mod store;

// Re-export commonly used types
pub use app_config::AppConfig;
pub use store::ConfigStore;
