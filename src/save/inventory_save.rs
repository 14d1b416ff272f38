//! Inventory save/load
//!
//! One JSON file per inventory:
//!
//! ```json
//! { "_items": [ { "variant": "RangedWeapon", ... } ], "_credits": 1500, "_loadout": { "RangedWeapon1": 0 } }
//! ```
//!
//! Loading is all-or-nothing: the target inventory is only touched once
//! every record has decoded.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;

use super::codec::{AssetResolver, SerializedItem};
use crate::items::{Inventory, InventoryError, ItemError, ItemRef, Loadout, LoadoutSlot};

/// Default save location, relative to the data directory
pub const SAVE_FILE: &str = "SavedData/Inventory/playerInventory.json";

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid item at index {index}: {source}")]
    InvalidItem { index: usize, source: ItemError },
    #[error("invalid loadout entry for {slot:?}: {reason}")]
    InvalidLoadout { slot: LoadoutSlot, reason: String },
    #[error(transparent)]
    Inventory(#[from] InventoryError),
}

/// On-disk inventory layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryData {
    #[serde(rename = "_items")]
    pub items: Vec<SerializedItem>,
    #[serde(rename = "_credits")]
    pub credits: i64,
    /// Slot -> index into `items`
    #[serde(rename = "_loadout", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub loadout: BTreeMap<LoadoutSlot, usize>,
}

/// Decoded save contents, not yet applied to anything
#[derive(Debug, Clone)]
pub struct RestoredInventory {
    pub items: Vec<ItemRef>,
    pub credits: i64,
    pub loadout: Loadout,
}

impl InventoryData {
    /// Snapshot an inventory and its loadout
    pub fn capture(inventory: &Inventory, loadout: &Loadout) -> Self {
        let items = inventory.items().iter().map(|i| SerializedItem::from_item(i)).collect();

        let mut slots = BTreeMap::new();
        for (slot, item) in loadout.equipped() {
            match inventory.index_of(item) {
                Some(index) => {
                    slots.insert(slot, index);
                }
                None => log::warn!("Equipped '{}' is not in the inventory; not saving {}", item.name, slot.name()),
            }
        }

        Self {
            items,
            credits: inventory.credits(),
            loadout: slots,
        }
    }

    /// Decode every record. Any failure aborts the whole restore.
    pub fn restore(&self, resolver: &dyn AssetResolver) -> Result<RestoredInventory, SaveError> {
        if self.credits < 0 {
            return Err(InventoryError::NegativeCredits(self.credits).into());
        }

        let items = self
            .items
            .iter()
            .enumerate()
            .map(|(index, record)| {
                record
                    .to_item(resolver)
                    .map(ItemRef::new)
                    .map_err(|source| SaveError::InvalidItem { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut loadout = Loadout::new();
        for (&slot, &index) in &self.loadout {
            let item = items.get(index).ok_or_else(|| SaveError::InvalidLoadout {
                slot,
                reason: format!("index {index} is past the end of {} items", items.len()),
            })?;
            if item.kind() != slot.kind() {
                return Err(SaveError::InvalidLoadout {
                    slot,
                    reason: format!("'{}' is a {}, slot takes {}", item.name, item.kind(), slot.kind()),
                });
            }
            let position = LoadoutSlot::slots_for(slot.kind())
                .iter()
                .position(|s| *s == slot)
                .unwrap_or(0);
            loadout.equip(item, position).map_err(|e| SaveError::InvalidLoadout {
                slot,
                reason: e.to_string(),
            })?;
        }

        Ok(RestoredInventory {
            items,
            credits: self.credits,
            loadout,
        })
    }
}

impl RestoredInventory {
    /// Replace the contents of `inventory` and `loadout` with the restored state
    pub fn apply(self, inventory: &mut Inventory, loadout: &mut Loadout) -> Result<(), SaveError> {
        inventory.replace(self.items, self.credits)?;
        *loadout = self.loadout;
        Ok(())
    }
}

/// Get the default save path
pub fn default_save_path() -> PathBuf {
    use directories::ProjectDirs;

    if let Some(proj_dirs) = ProjectDirs::from("com", "starscourge", "Starscourge") {
        proj_dirs.data_local_dir().join(SAVE_FILE)
    } else {
        // Fallback to current directory
        PathBuf::from(".").join(SAVE_FILE)
    }
}

/// Check if a save exists at `path`
pub fn save_exists(path: &Path) -> bool {
    path.is_file()
}

/// Write already-captured data to disk
pub fn write_data(path: &Path, data: &InventoryData) -> Result<(), SaveError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }

    let json = serde_json::to_string_pretty(data)?;

    // Each write gets its own temp file beside the target, then renames over it
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(json.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Read and parse a save file without applying it
pub fn read_data(path: &Path) -> Result<InventoryData, SaveError> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// Save an inventory and loadout to `path`
pub fn save_inventory(path: &Path, inventory: &Inventory, loadout: &Loadout) -> Result<(), SaveError> {
    let data = InventoryData::capture(inventory, loadout);
    write_data(path, &data)?;
    log::info!("Saved {} items and {} credits to {}", data.items.len(), data.credits, path.display());
    Ok(())
}

/// Load `path` into an inventory and loadout, replacing their contents.
///
/// On error both are left exactly as they were.
pub fn load_inventory(
    path: &Path,
    resolver: &dyn AssetResolver,
    inventory: &mut Inventory,
    loadout: &mut Loadout,
) -> Result<(), SaveError> {
    let restored = read_data(path)?.restore(resolver)?;
    let count = restored.items.len();
    restored.apply(inventory, loadout)?;
    log::info!("Loaded {} items from {}", count, path.display());
    Ok(())
}

/// Delete a save file
pub fn delete_save(path: &Path) -> Result<(), SaveError> {
    if path.exists() {
        fs::remove_file(path)?;
        log::info!("Deleted save {}", path.display());
    }
    Ok(())
}
