//! Player session
//!
//! Owns the inventory and loadout for one play session and runs the
//! activation / deactivation / end hooks the host calls. There is no global
//! instance: the host builds a session and hands it (or a [`SharedSession`])
//! to whatever needs it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::data::{CatalogError, InventoryConfig, ItemCatalog};
use crate::items::{Inventory, InventoryError, Loadout};
use crate::save::{self, AssetResolver, InventoryData, SaveError};

/// Session handle for hosts that touch the inventory from more than one thread
pub type SharedSession = Arc<Mutex<PlayerSession>>;

/// Inventory, loadout and the flags that govern their lifecycle
#[derive(Debug, Clone)]
pub struct PlayerSession {
    config: InventoryConfig,
    pub inventory: Inventory,
    pub loadout: Loadout,
}

impl PlayerSession {
    /// Create a session with an empty inventory
    pub fn new(config: InventoryConfig) -> Self {
        Self {
            config,
            inventory: Inventory::new(),
            loadout: Loadout::new(),
        }
    }

    pub fn config(&self) -> &InventoryConfig {
        &self.config
    }

    pub fn save_path(&self) -> PathBuf {
        self.config.resolved_save_path()
    }

    /// Fill an empty session with the configured starting credits and items
    pub fn seed_from_catalog(&mut self, catalog: &ItemCatalog) -> Result<(), SessionError> {
        self.inventory.set_credits(self.config.starting_credits)?;
        for slug in &self.config.starting_items {
            let item = catalog.instantiate(slug)?;
            self.inventory.add(item);
        }
        log::info!(
            "Seeded new inventory with {} items and {} credits",
            self.inventory.len(),
            self.inventory.credits()
        );
        Ok(())
    }

    /// Load the saved inventory if there is one, otherwise seed from the catalog.
    /// Returns true when a save was loaded.
    pub fn load_or_seed(&mut self, catalog: &ItemCatalog, resolver: &dyn AssetResolver) -> Result<bool, SessionError> {
        let path = self.save_path();
        if save::save_exists(&path) {
            save::load_inventory(&path, resolver, &mut self.inventory, &mut self.loadout)?;
            Ok(true)
        } else {
            self.seed_from_catalog(catalog)?;
            Ok(false)
        }
    }

    /// Called when the session becomes active
    pub fn activate(&mut self) {
        self.inventory.save_initial_snapshot(self.config.retain_initial_data);
    }

    /// Called when the session is deactivated
    pub fn deactivate(&mut self) {
        if self.config.retain_initial_data {
            self.inventory.restore_initial_snapshot(true);
            self.loadout.prune_missing(&self.inventory);
            log::debug!("Inventory restored to its initial {} items", self.inventory.len());
        }
    }

    /// Called when play ends: either wipe or persist
    pub fn end(&mut self) -> Result<(), SaveError> {
        if self.config.clear_on_play_end {
            self.inventory.clear_all();
            self.loadout.clear();
            log::info!("Inventory cleared at end of play");
            Ok(())
        } else {
            self.save()
        }
    }

    /// Save to the configured path
    pub fn save(&self) -> Result<(), SaveError> {
        save::save_inventory(&self.save_path(), &self.inventory, &self.loadout)
    }

    /// Wrap in a shared handle
    pub fn into_shared(self) -> SharedSession {
        Arc::new(Mutex::new(self))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Save(#[from] SaveError),
    #[error(transparent)]
    Inventory(#[from] InventoryError),
}

/// Save a shared session to `path`.
///
/// The lock is held only while the inventory is captured; the disk write
/// works from that snapshot, so no mutation can show up mid-flush.
pub fn flush_shared(session: &SharedSession, path: &Path) -> Result<(), SaveError> {
    let data = {
        let guard = session.lock();
        InventoryData::capture(&guard.inventory, &guard.loadout)
    };
    save::write_data(path, &data)?;
    log::info!("Flushed {} items to {}", data.items.len(), path.display());
    Ok(())
}

/// Load `path` into a shared session. Decoding happens outside the lock.
pub fn load_shared(session: &SharedSession, path: &Path, resolver: &dyn AssetResolver) -> Result<(), SaveError> {
    let restored = save::read_data(path)?.restore(resolver)?;
    let mut guard = session.lock();
    let PlayerSession { inventory, loadout, .. } = &mut *guard;
    restored.apply(inventory, loadout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{Item, ItemKind, LoadoutSlot};
    use crate::save::NullResolver;
    use std::thread;

    fn catalog() -> ItemCatalog {
        ItemCatalog::from_items(vec![
            Item::new(1, "Service Pistol", ItemKind::PersonalRangedWeapon),
            Item::new(2, "Ration Pack", ItemKind::PersonalConsumable),
        ])
        .unwrap()
    }

    fn config(dir: &Path) -> InventoryConfig {
        InventoryConfig {
            save_path: Some(dir.join("inventory.json")),
            starting_credits: 250,
            starting_items: vec!["service-pistol".into(), "ration-pack".into()],
            ..Default::default()
        }
    }

    #[test]
    fn test_seed_from_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = PlayerSession::new(config(dir.path()));
        let loaded = session.load_or_seed(&catalog(), &NullResolver).unwrap();

        assert!(!loaded);
        assert_eq!(session.inventory.len(), 2);
        assert_eq!(session.inventory.credits(), 250);
    }

    #[test]
    fn test_seed_unknown_slug_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config(dir.path());
        cfg.starting_items.push("missing".into());
        let mut session = PlayerSession::new(cfg);
        assert!(matches!(session.seed_from_catalog(&catalog()), Err(SessionError::Catalog(_))));
    }

    #[test]
    fn test_end_saves_then_reload() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = PlayerSession::new(config(dir.path()));
        session.seed_from_catalog(&catalog()).unwrap();
        let pistol = session.inventory.get_item("Service Pistol").unwrap();
        session.loadout.equip(&pistol, 1).unwrap();
        session.end().unwrap();

        let mut reloaded = PlayerSession::new(config(dir.path()));
        assert!(reloaded.load_or_seed(&catalog(), &NullResolver).unwrap());
        assert_eq!(reloaded.inventory.len(), 2);
        assert_eq!(reloaded.loadout.get(LoadoutSlot::RangedWeapon2).unwrap().name, "Service Pistol");
    }

    #[test]
    fn test_end_clears_when_configured() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config(dir.path());
        cfg.clear_on_play_end = true;
        let mut session = PlayerSession::new(cfg);
        session.seed_from_catalog(&catalog()).unwrap();

        session.end().unwrap();
        assert!(session.inventory.is_empty());
        assert!(!save::save_exists(&session.save_path()));
    }

    #[test]
    fn test_retain_initial_data_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config(dir.path());
        cfg.retain_initial_data = true;
        let mut session = PlayerSession::new(cfg);
        session.seed_from_catalog(&catalog()).unwrap();

        session.activate();
        let loot = session.inventory.add(Item::new(9, "Helmet", ItemKind::PersonalHeadArmour));
        session.loadout.equip(&loot, 0).unwrap();
        assert_eq!(session.inventory.len(), 3);

        session.deactivate();
        assert_eq!(session.inventory.len(), 2);
        assert!(session.loadout.is_empty(LoadoutSlot::HeadArmour));
    }

    #[test]
    fn test_no_retain_keeps_changes() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = PlayerSession::new(config(dir.path()));
        session.activate();
        session.inventory.add(Item::new(9, "Helmet", ItemKind::PersonalHeadArmour));
        session.deactivate();
        assert_eq!(session.inventory.len(), 1);
    }

    #[test]
    fn test_flush_shared_sees_consistent_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shared.json");
        let shared = PlayerSession::new(config(dir.path())).into_shared();

        let writer = {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                for i in 0..50 {
                    let mut guard = shared.lock();
                    guard.inventory.add(Item::new(i, format!("Scrap {i}"), ItemKind::Junk));
                    guard.inventory.add_credits(1);
                }
            })
        };
        for _ in 0..10 {
            flush_shared(&shared, &path).unwrap();
            let data = save::read_data(&path).unwrap();
            // Every add happens together with a credit, so a torn read would show a mismatch
            assert_eq!(data.items.len() as i64, data.credits);
        }
        writer.join().unwrap();

        flush_shared(&shared, &path).unwrap();
        let fresh = PlayerSession::new(config(dir.path())).into_shared();
        load_shared(&fresh, &path, &NullResolver).unwrap();
        assert_eq!(fresh.lock().inventory.len(), 50);
        assert_eq!(fresh.lock().inventory.credits(), 50);
    }

    #[test]
    fn test_concurrent_flushes_to_same_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shared.json");
        let mut session = PlayerSession::new(config(dir.path()));
        for i in 0..2000 {
            session.inventory.add(Item::new(i, format!("Scrap {i}"), ItemKind::Junk));
        }
        session.inventory.set_credits(2000).unwrap();
        let shared = session.into_shared();

        let flushers: Vec<_> = (0..6)
            .map(|_| {
                let shared = Arc::clone(&shared);
                let path = path.clone();
                thread::spawn(move || {
                    for _ in 0..10 {
                        flush_shared(&shared, &path).unwrap();
                        let data = save::read_data(&path).unwrap();
                        assert_eq!(data.items.len(), 2000);
                    }
                })
            })
            .collect();
        for flusher in flushers {
            flusher.join().unwrap();
        }

        let data = save::read_data(&path).unwrap();
        assert_eq!(data.items.len() as i64, data.credits);
        let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }
}
