//! Inventory system
//!
//! Ordered collection of owned items plus the player's credit balance.
//! Items are shared as [`ItemRef`]s so loadouts and snapshots can point at
//! the same entity the inventory owns.

use std::cmp::Ordering;
use std::sync::Arc;

use thiserror::Error;

use super::item::{Item, ItemKind};

/// Shared handle to an owned item. Identity is pointer identity.
pub type ItemRef = Arc<Item>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    #[error("no item named '{0}' in inventory")]
    NotFound(String),
    #[error("credit balance cannot be negative (got {0})")]
    NegativeCredits(i64),
}

/// Player inventory
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    /// Items in insertion order
    items: Vec<ItemRef>,
    /// Currency, never negative
    credits: i64,
    /// Shallow copy taken by [`Inventory::save_initial_snapshot`]
    initial: Option<Vec<ItemRef>>,
}

impl Inventory {
    /// Create an empty inventory
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty inventory with a starting balance
    pub fn with_credits(credits: i64) -> Result<Self, InventoryError> {
        let mut inventory = Self::new();
        inventory.set_credits(credits)?;
        Ok(inventory)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All items in insertion order
    pub fn items(&self) -> &[ItemRef] {
        &self.items
    }

    /// Add an owned item, returning the shared handle
    pub fn add(&mut self, item: Item) -> ItemRef {
        let item = Arc::new(item);
        self.items.push(Arc::clone(&item));
        item
    }

    /// Append an item. `None` is a no-op; duplicates are allowed.
    pub fn add_item(&mut self, item: Option<ItemRef>) {
        if let Some(item) = item {
            self.items.push(item);
        }
    }

    /// Remove the first occurrence of this exact item. Absent items are ignored.
    pub fn remove_item(&mut self, item: &ItemRef) -> Option<ItemRef> {
        let index = self.items.iter().position(|i| Arc::ptr_eq(i, item))?;
        Some(self.items.remove(index))
    }

    /// Remove the first item with this display name
    pub fn remove_item_by_name(&mut self, name: &str) -> Option<ItemRef> {
        match self.items.iter().position(|i| i.name == name) {
            Some(index) => Some(self.items.remove(index)),
            None => {
                log::warn!("No item named '{}' found to remove", name);
                None
            }
        }
    }

    /// Check if this exact item is owned
    pub fn contains(&self, item: &ItemRef) -> bool {
        self.items.iter().any(|i| Arc::ptr_eq(i, item))
    }

    /// Look up an item by display name.
    ///
    /// Unlike the kind queries this is a hard lookup: callers are expected to
    /// know the item exists.
    pub fn get_item(&self, name: &str) -> Result<ItemRef, InventoryError> {
        self.items
            .iter()
            .find(|i| i.name == name)
            .cloned()
            .ok_or_else(|| InventoryError::NotFound(name.to_string()))
    }

    /// Items of a single kind, in insertion order
    pub fn items_of_kind(&self, kind: ItemKind) -> Vec<ItemRef> {
        self.items
            .iter()
            .filter(|i| i.kind() == kind)
            .cloned()
            .collect()
    }

    /// Items of each kind in turn, concatenated in the order the kinds are given
    pub fn items_of_kinds(&self, kinds: &[ItemKind]) -> Vec<ItemRef> {
        kinds.iter().flat_map(|&kind| self.items_of_kind(kind)).collect()
    }

    /// Items sorted by display name
    pub fn sorted_by_name(&self, ascending: bool) -> Vec<ItemRef> {
        self.sorted(ascending, |a, b| a.name.cmp(&b.name))
    }

    /// Items sorted by kind label, ties broken by value in the same direction
    pub fn sorted_by_kind(&self, ascending: bool) -> Vec<ItemRef> {
        self.sorted(ascending, |a, b| {
            a.kind_name()
                .cmp(b.kind_name())
                .then_with(|| a.value.cmp(&b.value))
        })
    }

    /// Items sorted by currency value
    pub fn sorted_by_value(&self, ascending: bool) -> Vec<ItemRef> {
        self.sorted(ascending, |a, b| a.value.cmp(&b.value))
    }

    /// Stable sort of a copy of the item list
    fn sorted<F>(&self, ascending: bool, cmp: F) -> Vec<ItemRef>
    where
        F: Fn(&Item, &Item) -> Ordering,
    {
        let mut items = self.items.clone();
        if ascending {
            items.sort_by(|a, b| cmp(a, b));
        } else {
            items.sort_by(|a, b| cmp(b, a));
        }
        items
    }

    /// Get current credits
    pub fn credits(&self) -> i64 {
        self.credits
    }

    /// Overwrite the balance. Used when restoring saved state.
    pub fn set_credits(&mut self, credits: i64) -> Result<(), InventoryError> {
        if credits < 0 {
            return Err(InventoryError::NegativeCredits(credits));
        }
        self.credits = credits;
        Ok(())
    }

    /// Add credits. Spending goes through [`Inventory::try_take_credits`], so a
    /// negative amount is ignored.
    pub fn add_credits(&mut self, amount: i64) {
        if amount < 0 {
            log::warn!("Ignoring negative credit grant of {}", amount);
            return;
        }
        self.credits = self.credits.saturating_add(amount);
    }

    /// Spend credits, returns false and changes nothing if the balance is too low
    pub fn try_take_credits(&mut self, amount: i64) -> bool {
        if amount < 0 || amount > self.credits {
            return false;
        }
        self.credits -= amount;
        true
    }

    /// Check if the balance covers `amount`
    pub fn has_enough_credits(&self, amount: i64) -> bool {
        self.credits >= amount
    }

    /// Remember the current item list so it can be restored later.
    /// Does nothing unless `retain` is set.
    pub fn save_initial_snapshot(&mut self, retain: bool) {
        if retain {
            self.initial = Some(self.items.clone());
        }
    }

    /// Put back the item list captured by [`Inventory::save_initial_snapshot`].
    /// Does nothing unless `retain` is set and a snapshot exists.
    pub fn restore_initial_snapshot(&mut self, retain: bool) {
        if !retain {
            return;
        }
        if let Some(initial) = &self.initial {
            self.items = initial.clone();
        }
    }

    pub fn has_initial_snapshot(&self) -> bool {
        self.initial.is_some()
    }

    /// Remove every item, one at a time from the back
    pub fn clear_all(&mut self) {
        while self.items.pop().is_some() {}
    }

    /// Replace contents wholesale. Used by the loader once a file fully decodes.
    pub(crate) fn replace(&mut self, items: Vec<ItemRef>, credits: i64) -> Result<(), InventoryError> {
        if credits < 0 {
            return Err(InventoryError::NegativeCredits(credits));
        }
        self.items = items;
        self.credits = credits;
        Ok(())
    }

    /// Index of this exact item, if owned
    pub fn index_of(&self, item: &ItemRef) -> Option<usize> {
        self.items.iter().position(|i| Arc::ptr_eq(i, item))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_item(name: &str, kind: ItemKind, value: i64) -> Item {
        let mut item = Item::new(1, name, kind);
        item.value = value;
        item
    }

    #[test]
    fn test_credit_scenario() {
        let mut inv = Inventory::with_credits(100).unwrap();
        inv.add_credits(50);
        assert_eq!(inv.credits(), 150);

        assert!(!inv.try_take_credits(200));
        assert_eq!(inv.credits(), 150);

        assert!(inv.try_take_credits(150));
        assert_eq!(inv.credits(), 0);
    }

    #[test]
    fn test_credits_never_negative() {
        let mut inv = Inventory::with_credits(10).unwrap();
        for amount in [3, 8, 7, -5, 0, 1, 1, 1, 20] {
            inv.try_take_credits(amount);
            assert!(inv.credits() >= 0);
        }
        assert_eq!(inv.credits(), 0);
        assert!(!inv.try_take_credits(-5));
        assert!(Inventory::with_credits(-1).is_err());
    }

    #[test]
    fn test_add_credits_ignores_negative() {
        let mut inv = Inventory::with_credits(30).unwrap();
        inv.add_credits(-100);
        assert_eq!(inv.credits(), 30);
        inv.add_credits(0);
        assert_eq!(inv.credits(), 30);
    }

    #[test]
    fn test_add_credits_saturates() {
        let mut inv = Inventory::with_credits(i64::MAX - 5).unwrap();
        inv.add_credits(100);
        assert_eq!(inv.credits(), i64::MAX);
        assert!(inv.try_take_credits(i64::MAX));
        assert_eq!(inv.credits(), 0);
    }

    #[test]
    fn test_has_enough_credits_is_pure() {
        let inv = Inventory::with_credits(40).unwrap();
        assert!(inv.has_enough_credits(40));
        assert!(!inv.has_enough_credits(41));
        assert_eq!(inv.credits(), 40);
    }

    #[test]
    fn test_items_of_kind_preserves_order() {
        let mut inv = Inventory::new();
        let a = inv.add(make_item("Rifle A", ItemKind::PersonalRangedWeapon, 10));
        let b = inv.add(make_item("Vest", ItemKind::PersonalUpperArmour, 20));
        let c = inv.add(make_item("Rifle B", ItemKind::PersonalRangedWeapon, 30));

        let weapons = inv.items_of_kind(ItemKind::PersonalRangedWeapon);
        assert_eq!(weapons.len(), 2);
        assert!(Arc::ptr_eq(&weapons[0], &a));
        assert!(Arc::ptr_eq(&weapons[1], &c));

        let armour = inv.items_of_kind(ItemKind::PersonalUpperArmour);
        assert_eq!(armour.len(), 1);
        assert!(Arc::ptr_eq(&armour[0], &b));

        assert!(inv.items_of_kind(ItemKind::Junk).is_empty());
    }

    #[test]
    fn test_items_of_kinds_concatenates_per_kind() {
        let mut inv = Inventory::new();
        inv.add(make_item("Vest", ItemKind::PersonalUpperArmour, 0));
        inv.add(make_item("Rifle", ItemKind::PersonalRangedWeapon, 0));
        inv.add(make_item("Helmet", ItemKind::PersonalHeadArmour, 0));

        let found = inv.items_of_kinds(&[ItemKind::PersonalRangedWeapon, ItemKind::PersonalUpperArmour]);
        let names: Vec<_> = found.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Rifle", "Vest"]);
    }

    #[test]
    fn test_remove_then_contains() {
        let mut inv = Inventory::new();
        let item = inv.add(make_item("Ore", ItemKind::Material, 5));
        let twin = Arc::new(make_item("Ore", ItemKind::Material, 5));

        assert!(inv.contains(&item));
        assert!(!inv.contains(&twin));

        assert!(inv.remove_item(&item).is_some());
        assert!(!inv.contains(&item));

        // Removing again is a no-op
        assert!(inv.remove_item(&item).is_none());
        assert_eq!(inv.len(), 0);
    }

    #[test]
    fn test_remove_by_name_first_match_only() {
        let mut inv = Inventory::new();
        inv.add(make_item("Scrap", ItemKind::Junk, 1));
        inv.add(make_item("Scrap", ItemKind::Junk, 2));

        let removed = inv.remove_item_by_name("Scrap").unwrap();
        assert_eq!(removed.value, 1);
        assert_eq!(inv.len(), 1);
        assert!(inv.remove_item_by_name("Nothing").is_none());
        assert_eq!(inv.len(), 1);
    }

    #[test]
    fn test_get_item_not_found() {
        let mut inv = Inventory::new();
        inv.add(make_item("Medkit", ItemKind::PersonalConsumable, 50));
        assert_eq!(inv.get_item("Medkit").unwrap().value, 50);
        assert_eq!(
            inv.get_item("Stimpak").unwrap_err(),
            InventoryError::NotFound("Stimpak".to_string())
        );
    }

    #[test]
    fn test_add_none_is_noop() {
        let mut inv = Inventory::new();
        inv.add_item(None);
        assert!(inv.is_empty());
        let item = Arc::new(make_item("Fuse", ItemKind::Material, 1));
        inv.add_item(Some(Arc::clone(&item)));
        inv.add_item(Some(item));
        assert_eq!(inv.len(), 2);
    }

    #[test]
    fn test_sorting() {
        let mut inv = Inventory::new();
        inv.add(make_item("Bravo", ItemKind::Junk, 30));
        inv.add(make_item("Alpha", ItemKind::Cargo, 10));
        inv.add(make_item("Charlie", ItemKind::Cargo, 20));

        let names = |items: Vec<ItemRef>| items.iter().map(|i| i.name.clone()).collect::<Vec<_>>();

        assert_eq!(names(inv.sorted_by_name(true)), vec!["Alpha", "Bravo", "Charlie"]);
        assert_eq!(names(inv.sorted_by_name(false)), vec!["Charlie", "Bravo", "Alpha"]);
        assert_eq!(names(inv.sorted_by_value(true)), vec!["Alpha", "Charlie", "Bravo"]);
        assert_eq!(names(inv.sorted_by_kind(true)), vec!["Alpha", "Charlie", "Bravo"]);
        // Tie-break on value follows the outer direction
        assert_eq!(names(inv.sorted_by_kind(false)), vec!["Bravo", "Charlie", "Alpha"]);

        // Sorting returns a copy
        assert_eq!(inv.items()[0].name, "Bravo");
    }

    #[test]
    fn test_sort_is_stable() {
        let mut inv = Inventory::new();
        let first = inv.add(make_item("Same", ItemKind::Junk, 1));
        let second = inv.add(make_item("Same", ItemKind::Junk, 1));
        let sorted = inv.sorted_by_value(false);
        assert!(Arc::ptr_eq(&sorted[0], &first));
        assert!(Arc::ptr_eq(&sorted[1], &second));
    }

    #[test]
    fn test_snapshot_restore() {
        let mut inv = Inventory::new();
        let keep = inv.add(make_item("Keep", ItemKind::Cargo, 1));

        inv.save_initial_snapshot(true);
        inv.add(make_item("Loot", ItemKind::Junk, 1));
        inv.remove_item(&keep);
        assert_eq!(inv.len(), 1);

        inv.restore_initial_snapshot(true);
        assert_eq!(inv.len(), 1);
        assert!(inv.contains(&keep));
    }

    #[test]
    fn test_snapshot_requires_retain_flag() {
        let mut inv = Inventory::new();
        inv.add(make_item("Keep", ItemKind::Cargo, 1));
        inv.save_initial_snapshot(false);
        assert!(!inv.has_initial_snapshot());

        inv.save_initial_snapshot(true);
        inv.clear_all();
        inv.restore_initial_snapshot(false);
        assert!(inv.is_empty());
    }

    #[test]
    fn test_clear_all() {
        let mut inv = Inventory::with_credits(99).unwrap();
        for i in 0..5 {
            inv.add(make_item(&format!("Item {i}"), ItemKind::Junk, i));
        }
        let kept = Arc::clone(&inv.items()[2]);
        inv.clear_all();
        assert!(inv.is_empty());
        assert_eq!(inv.credits(), 99);
        // Cleared items are released, not retained by the inventory
        assert_eq!(Arc::strong_count(&kept), 1);
    }

    #[test]
    fn test_clear_all_large_inventory() {
        let mut inv = Inventory::new();
        let shared = Arc::new(make_item("Scrap", ItemKind::Junk, 1));
        for _ in 0..20_000 {
            inv.add_item(Some(Arc::clone(&shared)));
        }
        inv.clear_all();
        assert!(inv.is_empty());
        assert_eq!(Arc::strong_count(&shared), 1);
    }
}
