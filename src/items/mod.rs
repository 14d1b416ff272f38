//! Item system

pub mod item;
pub mod variants;
pub mod inventory;
pub mod loadout;

pub use item::{Item, ItemId, ItemKind, Rarity, Manufacturer, ItemBonus, ImageHandle, ItemError, slugify};
pub use variants::{ItemVariant, VariantShape, WeaponStats, DamageType, FiringMode};
pub use inventory::{Inventory, InventoryError, ItemRef};
pub use loadout::{Loadout, LoadoutSlot, LoadoutError};
