//! Starscourge - item, inventory and loadout core
//!
//! Item definitions, the player's inventory and credits, on-foot loadouts,
//! and JSON persistence for all of it.

pub mod items;
pub mod save;
pub mod data;
pub mod game;

// Re-export commonly used types
pub use items::{Item, ItemKind, ItemRef, Inventory, Loadout, LoadoutSlot};
pub use game::{PlayerSession, SharedSession};
pub use data::{DataManager, ItemCatalog, InventoryConfig};
