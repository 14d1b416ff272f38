//! Inventory configuration
//!
//! Read from a RON file; anything missing falls back to defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::save::default_save_path;

/// Default location of the config file
pub const CONFIG_FILE: &str = "assets/data/inventory.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] ron::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// Where the inventory is saved; `None` uses the platform data directory
    pub save_path: Option<PathBuf>,
    /// Root of the per-kind item folders
    pub catalog_dir: PathBuf,
    /// Root images are resolved against
    pub asset_dir: PathBuf,
    /// Snapshot on activation and restore on deactivation
    pub retain_initial_data: bool,
    /// Wipe the inventory when the session ends instead of saving it
    pub clear_on_play_end: bool,
    /// Credits a brand new inventory starts with
    pub starting_credits: i64,
    /// Catalog slugs a brand new inventory starts with
    pub starting_items: Vec<String>,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            save_path: None,
            catalog_dir: PathBuf::from("assets/items"),
            asset_dir: PathBuf::from("assets"),
            retain_initial_data: false,
            clear_on_play_end: false,
            starting_credits: 0,
            starting_items: Vec::new(),
        }
    }
}

impl InventoryConfig {
    /// Load from `path`, falling back to defaults on any error
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        Self::try_load(path).unwrap_or_else(|e| {
            log::warn!("Failed to load {}: {}. Using defaults.", path.display(), e);
            Self::default()
        })
    }

    pub fn try_load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(ron::from_str(&content)?)
    }

    /// Write this config out as pretty RON
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let text = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        fs::write(path, text)?;
        Ok(())
    }

    /// The configured save path, or the platform default
    pub fn resolved_save_path(&self) -> PathBuf {
        self.save_path.clone().unwrap_or_else(default_save_path)
    }
}
