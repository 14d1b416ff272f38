//! Loadout system
//!
//! Maps inventory items into the player's on-foot equipment slots. A loadout
//! only references items; ownership stays with the [`Inventory`].

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::inventory::{Inventory, ItemRef};
use super::item::ItemKind;

/// Named loadout slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LoadoutSlot {
    RangedWeapon1,
    RangedWeapon2,
    MeleeWeapon,
    HeadArmour,
    UpperArmour,
    LowerArmour,
    LifeSupport,
    ThrusterPack,
    Gadget1,
    Gadget2,
    Gadget3,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadoutError {
    #[error("{0} items cannot be equipped")]
    NotEquippable(ItemKind),
    #[error("slot index {index} out of range for {kind} (has {slots} slots)")]
    SlotIndexOutOfRange { kind: ItemKind, index: usize, slots: usize },
}

impl LoadoutSlot {
    /// Get all slots in display order
    pub const ALL: [LoadoutSlot; 11] = [
        LoadoutSlot::RangedWeapon1,
        LoadoutSlot::RangedWeapon2,
        LoadoutSlot::MeleeWeapon,
        LoadoutSlot::HeadArmour,
        LoadoutSlot::UpperArmour,
        LoadoutSlot::LowerArmour,
        LoadoutSlot::LifeSupport,
        LoadoutSlot::ThrusterPack,
        LoadoutSlot::Gadget1,
        LoadoutSlot::Gadget2,
        LoadoutSlot::Gadget3,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            LoadoutSlot::RangedWeapon1 => "Primary Weapon",
            LoadoutSlot::RangedWeapon2 => "Secondary Weapon",
            LoadoutSlot::MeleeWeapon => "Melee Weapon",
            LoadoutSlot::HeadArmour => "Head",
            LoadoutSlot::UpperArmour => "Upper Body",
            LoadoutSlot::LowerArmour => "Lower Body",
            LoadoutSlot::LifeSupport => "Life Support",
            LoadoutSlot::ThrusterPack => "Thruster Pack",
            LoadoutSlot::Gadget1 => "Gadget 1",
            LoadoutSlot::Gadget2 => "Gadget 2",
            LoadoutSlot::Gadget3 => "Gadget 3",
        }
    }

    /// The kind of item this slot accepts
    pub fn kind(&self) -> ItemKind {
        match self {
            LoadoutSlot::RangedWeapon1 | LoadoutSlot::RangedWeapon2 => ItemKind::PersonalRangedWeapon,
            LoadoutSlot::MeleeWeapon => ItemKind::PersonalMeleeWeapon,
            LoadoutSlot::HeadArmour => ItemKind::PersonalHeadArmour,
            LoadoutSlot::UpperArmour => ItemKind::PersonalUpperArmour,
            LoadoutSlot::LowerArmour => ItemKind::PersonalLowerArmour,
            LoadoutSlot::LifeSupport => ItemKind::PersonalLifeSupport,
            LoadoutSlot::ThrusterPack => ItemKind::PersonalThrusterPack,
            LoadoutSlot::Gadget1 | LoadoutSlot::Gadget2 | LoadoutSlot::Gadget3 => ItemKind::PersonalGadget,
        }
    }

    /// Slots that accept a kind, in index order. Empty if the kind is not equippable.
    pub fn slots_for(kind: ItemKind) -> &'static [LoadoutSlot] {
        match kind {
            ItemKind::PersonalRangedWeapon => &[LoadoutSlot::RangedWeapon1, LoadoutSlot::RangedWeapon2],
            ItemKind::PersonalMeleeWeapon => &[LoadoutSlot::MeleeWeapon],
            ItemKind::PersonalHeadArmour => &[LoadoutSlot::HeadArmour],
            ItemKind::PersonalUpperArmour => &[LoadoutSlot::UpperArmour],
            ItemKind::PersonalLowerArmour => &[LoadoutSlot::LowerArmour],
            ItemKind::PersonalLifeSupport => &[LoadoutSlot::LifeSupport],
            ItemKind::PersonalThrusterPack => &[LoadoutSlot::ThrusterPack],
            ItemKind::PersonalGadget => &[LoadoutSlot::Gadget1, LoadoutSlot::Gadget2, LoadoutSlot::Gadget3],
            _ => &[],
        }
    }

    /// Resolve the slot for a kind and index.
    ///
    /// The index only matters for multi-slot kinds; single-slot kinds ignore it.
    pub fn for_kind(kind: ItemKind, index: usize) -> Result<LoadoutSlot, LoadoutError> {
        match LoadoutSlot::slots_for(kind) {
            [] => Err(LoadoutError::NotEquippable(kind)),
            [only] => Ok(*only),
            slots => slots.get(index).copied().ok_or(LoadoutError::SlotIndexOutOfRange {
                kind,
                index,
                slots: slots.len(),
            }),
        }
    }
}

/// The player's equipped items
#[derive(Debug, Clone, Default)]
pub struct Loadout {
    slots: BTreeMap<LoadoutSlot, ItemRef>,
}

impl Loadout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Equip an item, returning whatever previously occupied the slot.
    ///
    /// The previous occupant is simply dropped from the loadout; it stays in
    /// the inventory either way.
    pub fn equip(&mut self, item: &ItemRef, index: usize) -> Result<Option<ItemRef>, LoadoutError> {
        let slot = LoadoutSlot::for_kind(item.kind(), index)?;
        Ok(self.slots.insert(slot, Arc::clone(item)))
    }

    /// Unequip an item from the slot its kind and index select.
    ///
    /// The slot is only cleared when it holds this exact item.
    pub fn unequip(&mut self, item: &ItemRef, index: usize) -> Result<Option<ItemRef>, LoadoutError> {
        let slot = LoadoutSlot::for_kind(item.kind(), index)?;
        match self.slots.get(&slot) {
            Some(current) if Arc::ptr_eq(current, item) => Ok(self.slots.remove(&slot)),
            _ => Ok(None),
        }
    }

    /// Clear a slot regardless of what is in it
    pub fn clear_slot(&mut self, slot: LoadoutSlot) -> Option<ItemRef> {
        self.slots.remove(&slot)
    }

    /// Get item in a slot
    pub fn get(&self, slot: LoadoutSlot) -> Option<&ItemRef> {
        self.slots.get(&slot)
    }

    /// Check if a slot is empty
    pub fn is_empty(&self, slot: LoadoutSlot) -> bool {
        !self.slots.contains_key(&slot)
    }

    /// Find which slot holds this exact item
    pub fn slot_of(&self, item: &ItemRef) -> Option<LoadoutSlot> {
        self.slots
            .iter()
            .find(|(_, equipped)| Arc::ptr_eq(equipped, item))
            .map(|(slot, _)| *slot)
    }

    /// Equipped items with their slots, in slot order
    pub fn equipped(&self) -> impl Iterator<Item = (LoadoutSlot, &ItemRef)> {
        self.slots.iter().map(|(slot, item)| (*slot, item))
    }

    /// Total power draw of everything equipped
    pub fn total_power_draw(&self) -> i32 {
        self.slots.values().map(|item| item.power_consumption).sum()
    }

    /// Drop any equipped item the inventory no longer owns
    pub fn prune_missing(&mut self, inventory: &Inventory) -> usize {
        let before = self.slots.len();
        self.slots.retain(|slot, item| {
            let owned = inventory.contains(item);
            if !owned {
                log::debug!("Unequipping '{}' from {}: no longer in inventory", item.name, slot.name());
            }
            owned
        });
        before - self.slots.len()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::Item;

    fn make(kind: ItemKind, name: &str) -> ItemRef {
        Arc::new(Item::new(1, name, kind))
    }

    #[test]
    fn test_equip_then_query() {
        let mut loadout = Loadout::new();
        let rifle = make(ItemKind::PersonalRangedWeapon, "Rifle");
        let pistol = make(ItemKind::PersonalRangedWeapon, "Pistol");

        assert!(loadout.equip(&rifle, 0).unwrap().is_none());
        assert!(loadout.equip(&pistol, 1).unwrap().is_none());

        assert!(Arc::ptr_eq(loadout.get(LoadoutSlot::RangedWeapon1).unwrap(), &rifle));
        assert!(Arc::ptr_eq(loadout.get(LoadoutSlot::RangedWeapon2).unwrap(), &pistol));
        assert_eq!(loadout.slot_of(&pistol), Some(LoadoutSlot::RangedWeapon2));
    }

    #[test]
    fn test_equip_overwrites_occupied_slot() {
        let mut loadout = Loadout::new();
        let old = make(ItemKind::PersonalHeadArmour, "Old Helmet");
        let new = make(ItemKind::PersonalHeadArmour, "New Helmet");

        loadout.equip(&old, 0).unwrap();
        let previous = loadout.equip(&new, 0).unwrap();

        assert!(Arc::ptr_eq(&previous.unwrap(), &old));
        assert!(Arc::ptr_eq(loadout.get(LoadoutSlot::HeadArmour).unwrap(), &new));
    }

    #[test]
    fn test_single_slot_kinds_ignore_index() {
        let mut loadout = Loadout::new();
        let knife = make(ItemKind::PersonalMeleeWeapon, "Knife");
        loadout.equip(&knife, 7).unwrap();
        assert!(loadout.get(LoadoutSlot::MeleeWeapon).is_some());
    }

    #[test]
    fn test_gadget_index_validated() {
        let mut loadout = Loadout::new();
        let gadget = make(ItemKind::PersonalGadget, "Decoy");
        loadout.equip(&gadget, 2).unwrap();
        assert!(loadout.get(LoadoutSlot::Gadget3).is_some());
        assert_eq!(
            loadout.equip(&gadget, 3),
            Err(LoadoutError::SlotIndexOutOfRange { kind: ItemKind::PersonalGadget, index: 3, slots: 3 })
        );
    }

    #[test]
    fn test_non_equippable_rejected() {
        let mut loadout = Loadout::new();
        let scrap = make(ItemKind::Junk, "Scrap");
        assert_eq!(loadout.equip(&scrap, 0), Err(LoadoutError::NotEquippable(ItemKind::Junk)));
    }

    #[test]
    fn test_unequip_requires_same_item() {
        let mut loadout = Loadout::new();
        let equipped = make(ItemKind::PersonalGadget, "Grapple");
        let other = make(ItemKind::PersonalGadget, "Grapple");

        loadout.equip(&equipped, 0).unwrap();
        assert!(loadout.unequip(&other, 0).unwrap().is_none());
        assert!(!loadout.is_empty(LoadoutSlot::Gadget1));

        assert!(loadout.unequip(&equipped, 0).unwrap().is_some());
        assert!(loadout.is_empty(LoadoutSlot::Gadget1));
    }

    #[test]
    fn test_equip_does_not_touch_inventory() {
        let mut inventory = Inventory::new();
        let mut loadout = Loadout::new();
        let pack = inventory.add(Item::new(4, "Jump Pack", ItemKind::PersonalThrusterPack));

        loadout.equip(&pack, 0).unwrap();
        loadout.clear_slot(LoadoutSlot::ThrusterPack);
        assert_eq!(inventory.len(), 1);
        assert!(inventory.contains(&pack));
    }

    #[test]
    fn test_prune_missing() {
        let mut inventory = Inventory::new();
        let mut loadout = Loadout::new();
        let vest = inventory.add(Item::new(1, "Vest", ItemKind::PersonalUpperArmour));
        let legs = inventory.add(Item::new(2, "Greaves", ItemKind::PersonalLowerArmour));
        loadout.equip(&vest, 0).unwrap();
        loadout.equip(&legs, 0).unwrap();

        inventory.remove_item(&vest);
        assert_eq!(loadout.prune_missing(&inventory), 1);
        assert!(loadout.is_empty(LoadoutSlot::UpperArmour));
        assert!(!loadout.is_empty(LoadoutSlot::LowerArmour));
    }

    #[test]
    fn test_every_slot_round_trips_through_kind() {
        for slot in LoadoutSlot::ALL {
            let slots = LoadoutSlot::slots_for(slot.kind());
            let index = slots.iter().position(|s| *s == slot).unwrap();
            assert_eq!(LoadoutSlot::for_kind(slot.kind(), index), Ok(slot));
        }
    }
}
