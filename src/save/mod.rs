//! Save/load system
//!
//! Item codec and inventory persistence.

pub mod codec;
pub mod inventory_save;

pub use codec::{AssetResolver, FsResolver, NullResolver, SerializedItem, strip_extension};

pub use inventory_save::{
    InventoryData, RestoredInventory, SaveError, SAVE_FILE,
    save_inventory, load_inventory, read_data, write_data,
    delete_save, save_exists, default_save_path,
};
