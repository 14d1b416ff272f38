//! Data loader
//!
//! Loads the inventory config and the item catalog it points at.

use std::path::Path;

use super::catalog::{CatalogError, ItemCatalog};
use super::config::InventoryConfig;
use crate::save::FsResolver;

/// Manages all external game data
#[derive(Debug, Clone)]
pub struct DataManager {
    pub config: InventoryConfig,
    pub catalog: ItemCatalog,
}

impl DataManager {
    /// Load the config (with fallback) and then the catalog.
    ///
    /// The catalog does not fall back: bad item data stops startup.
    pub fn load(config_path: &Path) -> Result<Self, CatalogError> {
        let config = InventoryConfig::load(config_path);
        Self::with_config(config)
    }

    pub fn with_config(config: InventoryConfig) -> Result<Self, CatalogError> {
        let resolver = FsResolver::new(&config.asset_dir);
        let catalog = if config.catalog_dir.is_dir() {
            ItemCatalog::load_from_dir(&config.catalog_dir, &resolver)?
        } else {
            log::warn!("Catalog folder {} not found, starting with no items", config.catalog_dir.display());
            ItemCatalog::default()
        };
        Ok(Self { config, catalog })
    }

    /// Image resolver rooted at the configured asset folder
    pub fn resolver(&self) -> FsResolver {
        FsResolver::new(&self.config.asset_dir)
    }
}
