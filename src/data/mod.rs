//! Data loading and external game content
//!
//! Authored item definitions and inventory configuration live on disk so
//! they can be edited without rebuilding.

pub mod loader;
pub mod catalog;
pub mod config;

pub use loader::DataManager;
pub use catalog::{ItemCatalog, CatalogError};
pub use config::{InventoryConfig, ConfigError, CONFIG_FILE};
