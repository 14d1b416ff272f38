//! Item definitions
//!
//! Core item kinds, rarities, brands and the shared base record every item carries.

use std::path::{Path, PathBuf};

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::variants::{ItemVariant, VariantShape};

/// Numeric item identity as authored in the catalog
pub type ItemId = u32;

/// Item rarity tiers, ordered from least to most valuable
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Rarity {
    Trash,      // Gray
    #[default]
    Common,     // White
    Uncommon,   // Green
    Rare,       // Blue
    Mythic,     // Purple
    Legendary,  // Yellow
    Set,
}

impl Rarity {
    /// All rarities in ascending order
    pub const ALL: [Rarity; 7] = [
        Rarity::Trash,
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Mythic,
        Rarity::Legendary,
        Rarity::Set,
    ];

    /// Get rarity name
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Trash => "Trash",
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Mythic => "Mythic",
            Rarity::Legendary => "Legendary",
            Rarity::Set => "Set",
        }
    }

    /// Pick a rarity uniformly at random
    pub fn random<R: Rng>(rng: &mut R) -> Rarity {
        Rarity::ALL[rng.gen_range(0..Rarity::ALL.len())]
    }
}

/// Which corporation manufactured an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Manufacturer {
    TenlossCorporation,
    MotaraCorporation,
    ChitekSystems,
    SintaraDesigns,
    ArkangelMunitions,
    Unknown,
}

impl Manufacturer {
    pub const ALL: [Manufacturer; 6] = [
        Manufacturer::TenlossCorporation,
        Manufacturer::MotaraCorporation,
        Manufacturer::ChitekSystems,
        Manufacturer::SintaraDesigns,
        Manufacturer::ArkangelMunitions,
        Manufacturer::Unknown,
    ];

    /// Brand string as shown on item tooltips
    pub fn brand_name(&self) -> &'static str {
        match self {
            Manufacturer::TenlossCorporation => "Tenloss Corporation",
            Manufacturer::MotaraCorporation => "Motara Corporation",
            Manufacturer::ChitekSystems => "Chitek Systems",
            Manufacturer::SintaraDesigns => "Sintara Designs",
            Manufacturer::ArkangelMunitions => "Arkangel Munitions",
            Manufacturer::Unknown => "Unknown",
        }
    }

    pub fn random<R: Rng>(rng: &mut R) -> Manufacturer {
        Manufacturer::ALL[rng.gen_range(0..Manufacturer::ALL.len())]
    }
}

/// Item kinds
///
/// Closed taxonomy of everything the player can own, from ship hardware to
/// on-foot gear and trade goods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    // Ship weapons
    ShipLightWeapon,
    ShipMediumWeapon,
    ShipHeavyWeapon,
    ShipPrototypeWeapon,
    // Ship propulsion
    ShipImpulseEngine,
    ShipManeuveringThrusters,
    ShipAfterburnerDrive,
    ShipPhaseRiftDrive,
    // Ship defence
    ShipPrimaryHullPlating,
    ShipSecondaryHullPlating,
    ShipCombatShields,
    ShipDeflectorShields,
    // Ship auxiliary
    ShipOffensiveAuxiliarySystem,
    ShipDefensiveAuxiliarySystem,
    ShipTacticalAuxiliarySystem,
    // Ship critical
    ShipPowerSupply,
    ShipLifeSupport,
    // Ship sensors
    ShipShortRangeSensors,
    ShipLongRangeSensors,
    ShipTransponder,
    ShipConsumable,
    // Personal
    PersonalMeleeWeapon,
    PersonalRangedWeapon,
    PersonalHeadArmour,
    PersonalLowerArmour,
    PersonalUpperArmour,
    PersonalThrusterPack,
    PersonalLifeSupport,
    PersonalConsumable,
    PersonalGadget,
    // Misc
    Cargo,
    Material,
    Junk,
}

impl ItemKind {
    /// Every kind, in declaration order
    pub const ALL: [ItemKind; 33] = [
        ItemKind::ShipLightWeapon,
        ItemKind::ShipMediumWeapon,
        ItemKind::ShipHeavyWeapon,
        ItemKind::ShipPrototypeWeapon,
        ItemKind::ShipImpulseEngine,
        ItemKind::ShipManeuveringThrusters,
        ItemKind::ShipAfterburnerDrive,
        ItemKind::ShipPhaseRiftDrive,
        ItemKind::ShipPrimaryHullPlating,
        ItemKind::ShipSecondaryHullPlating,
        ItemKind::ShipCombatShields,
        ItemKind::ShipDeflectorShields,
        ItemKind::ShipOffensiveAuxiliarySystem,
        ItemKind::ShipDefensiveAuxiliarySystem,
        ItemKind::ShipTacticalAuxiliarySystem,
        ItemKind::ShipPowerSupply,
        ItemKind::ShipLifeSupport,
        ItemKind::ShipShortRangeSensors,
        ItemKind::ShipLongRangeSensors,
        ItemKind::ShipTransponder,
        ItemKind::ShipConsumable,
        ItemKind::PersonalMeleeWeapon,
        ItemKind::PersonalRangedWeapon,
        ItemKind::PersonalHeadArmour,
        ItemKind::PersonalLowerArmour,
        ItemKind::PersonalUpperArmour,
        ItemKind::PersonalThrusterPack,
        ItemKind::PersonalLifeSupport,
        ItemKind::PersonalConsumable,
        ItemKind::PersonalGadget,
        ItemKind::Cargo,
        ItemKind::Material,
        ItemKind::Junk,
    ];

    /// Human-readable label, also used as the catalog folder name
    pub fn display_name(&self) -> &'static str {
        match self {
            ItemKind::ShipLightWeapon => "Ship Light Weapon",
            ItemKind::ShipMediumWeapon => "Ship Medium Weapon",
            ItemKind::ShipHeavyWeapon => "Ship Heavy Weapon",
            ItemKind::ShipPrototypeWeapon => "Ship Prototype Weapon",
            ItemKind::ShipImpulseEngine => "Ship Impulse Engine",
            ItemKind::ShipManeuveringThrusters => "Ship Maneuvering Thrusters",
            ItemKind::ShipAfterburnerDrive => "Ship Afterburner Drive",
            ItemKind::ShipPhaseRiftDrive => "Ship Phase Rift Drive",
            ItemKind::ShipPrimaryHullPlating => "Ship Primary Hull Plating",
            ItemKind::ShipSecondaryHullPlating => "Ship Secondary Hull Plating",
            ItemKind::ShipCombatShields => "Ship Combat Shields",
            ItemKind::ShipDeflectorShields => "Ship Deflector Shields",
            ItemKind::ShipOffensiveAuxiliarySystem => "Ship Offensive Auxiliary System",
            ItemKind::ShipDefensiveAuxiliarySystem => "Ship Defensive Auxiliary System",
            ItemKind::ShipTacticalAuxiliarySystem => "Ship Tactical Auxiliary System",
            ItemKind::ShipPowerSupply => "Ship Power Supply",
            ItemKind::ShipLifeSupport => "Ship Life Support",
            ItemKind::ShipShortRangeSensors => "Ship Short Range Sensors",
            ItemKind::ShipLongRangeSensors => "Ship Long Range Sensors",
            ItemKind::ShipTransponder => "Ship Transponder",
            ItemKind::ShipConsumable => "Ship Consumable",
            ItemKind::PersonalMeleeWeapon => "Personal Melee Weapon",
            ItemKind::PersonalRangedWeapon => "Personal Ranged Weapon",
            ItemKind::PersonalHeadArmour => "Personal Head Armour",
            ItemKind::PersonalLowerArmour => "Personal Lower Armour",
            ItemKind::PersonalUpperArmour => "Personal Upper Armour",
            ItemKind::PersonalThrusterPack => "Personal Thruster Pack",
            ItemKind::PersonalLifeSupport => "Personal Life Support",
            ItemKind::PersonalConsumable => "Personal Consumable",
            ItemKind::PersonalGadget => "Personal Gadget",
            ItemKind::Cargo => "Cargo",
            ItemKind::Material => "Material",
            ItemKind::Junk => "Junk",
        }
    }

    /// Inverse of [`ItemKind::display_name`]
    pub fn from_display_name(name: &str) -> Option<ItemKind> {
        ItemKind::ALL.iter().copied().find(|k| k.display_name() == name)
    }

    /// The variant payload shape items of this kind carry
    pub fn variant_shape(&self) -> VariantShape {
        match self {
            ItemKind::ShipLightWeapon
            | ItemKind::ShipMediumWeapon
            | ItemKind::ShipHeavyWeapon
            | ItemKind::ShipPrototypeWeapon => VariantShape::ShipWeapon,
            ItemKind::ShipImpulseEngine
            | ItemKind::ShipAfterburnerDrive
            | ItemKind::ShipPhaseRiftDrive => VariantShape::Engine,
            ItemKind::ShipManeuveringThrusters => VariantShape::Thruster,
            ItemKind::ShipPrimaryHullPlating | ItemKind::ShipSecondaryHullPlating => {
                VariantShape::HullPlating
            }
            ItemKind::ShipCombatShields | ItemKind::ShipDeflectorShields => VariantShape::Shield,
            ItemKind::ShipOffensiveAuxiliarySystem
            | ItemKind::ShipDefensiveAuxiliarySystem
            | ItemKind::ShipTacticalAuxiliarySystem => VariantShape::AuxiliarySystem,
            ItemKind::ShipPowerSupply => VariantShape::PowerSupply,
            ItemKind::ShipLifeSupport | ItemKind::PersonalLifeSupport => VariantShape::LifeSupport,
            ItemKind::ShipShortRangeSensors | ItemKind::ShipLongRangeSensors => VariantShape::Sensor,
            ItemKind::ShipTransponder => VariantShape::Transponder,
            ItemKind::PersonalMeleeWeapon => VariantShape::MeleeWeapon,
            ItemKind::PersonalRangedWeapon => VariantShape::RangedWeapon,
            ItemKind::PersonalHeadArmour
            | ItemKind::PersonalLowerArmour
            | ItemKind::PersonalUpperArmour => VariantShape::PersonalArmour,
            ItemKind::PersonalThrusterPack => VariantShape::ThrusterPack,
            ItemKind::PersonalGadget => VariantShape::Gadget,
            ItemKind::ShipConsumable
            | ItemKind::PersonalConsumable
            | ItemKind::Cargo
            | ItemKind::Material
            | ItemKind::Junk => VariantShape::Base,
        }
    }

    /// Check if this kind is fitted to a ship
    pub fn is_ship_part(&self) -> bool {
        matches!(self.variant_shape(),
            VariantShape::ShipWeapon | VariantShape::Engine | VariantShape::Thruster |
            VariantShape::HullPlating | VariantShape::Shield | VariantShape::AuxiliarySystem |
            VariantShape::PowerSupply | VariantShape::Sensor | VariantShape::Transponder
        ) || *self == ItemKind::ShipLifeSupport
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Attribute modifier attached to an item. Carried verbatim, never interpreted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemBonus {
    pub attribute: String,
    pub amount: f64,
}

/// A resolved image asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHandle {
    path: PathBuf,
}

impl ImageHandle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemError {
    #[error("stack amount {current} exceeds max stack {max} on '{name}'")]
    StackOverflow { name: String, current: u32, max: u32 },
    #[error("'{name}' is a {kind} and needs a {expected:?} payload, got {found:?}")]
    VariantMismatch {
        name: String,
        kind: ItemKind,
        expected: VariantShape,
        found: VariantShape,
    },
}

/// A single piece of acquirable content
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// Display name
    pub name: String,
    pub id: ItemId,
    /// Brand display string
    pub brand: String,
    /// Shorthand identifier used by data files
    pub slug: String,
    pub description: String,
    /// Image path relative to the asset root
    pub image_path: String,
    /// Resolved image; never persisted
    pub image: Option<ImageHandle>,
    kind: ItemKind,
    pub rarity: Rarity,
    pub level: i32,
    /// Currency value
    pub value: i64,
    pub power_consumption: i32,
    max_stack: u32,
    current_stack: u32,
    pub bonuses: Vec<ItemBonus>,
    variant: ItemVariant,
}

impl Item {
    /// Create an item with the default payload for its kind
    pub fn new(id: ItemId, name: impl Into<String>, kind: ItemKind) -> Self {
        let name = name.into();
        Self {
            slug: slugify(&name),
            name,
            id,
            brand: Manufacturer::Unknown.brand_name().to_string(),
            description: String::new(),
            image_path: String::new(),
            image: None,
            kind,
            rarity: Rarity::Common,
            level: 1,
            value: 0,
            power_consumption: 0,
            max_stack: 1,
            current_stack: 1,
            bonuses: Vec::new(),
            variant: ItemVariant::default_for(kind.variant_shape()),
        }
    }

    /// Builder form of [`Item::set_variant`]
    pub fn with_variant(mut self, variant: ItemVariant) -> Result<Self, ItemError> {
        self.set_variant(variant)?;
        Ok(self)
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn variant(&self) -> &ItemVariant {
        &self.variant
    }

    /// Replace the variant payload; the payload must match the item's kind
    pub fn set_variant(&mut self, variant: ItemVariant) -> Result<(), ItemError> {
        let expected = self.kind.variant_shape();
        if variant.shape() != expected {
            return Err(ItemError::VariantMismatch {
                name: self.name.clone(),
                kind: self.kind,
                expected,
                found: variant.shape(),
            });
        }
        self.variant = variant;
        Ok(())
    }

    pub fn max_stack(&self) -> u32 {
        self.max_stack
    }

    pub fn current_stack(&self) -> u32 {
        self.current_stack
    }

    /// Set both stack bounds; `current` may never exceed `max`
    pub fn set_stack(&mut self, current: u32, max: u32) -> Result<(), ItemError> {
        if current > max {
            return Err(ItemError::StackOverflow {
                name: self.name.clone(),
                current,
                max,
            });
        }
        self.current_stack = current;
        self.max_stack = max;
        Ok(())
    }

    /// Check if more than one of this item fits on a stack
    pub fn is_stackable(&self) -> bool {
        self.max_stack > 1
    }

    /// Display label for this item's kind
    pub fn kind_name(&self) -> &'static str {
        self.kind.display_name()
    }

    /// (label, value) pairs for tooltips
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        self.variant.attributes(self.value)
    }

    pub fn attribute_labels(&self) -> Vec<&'static str> {
        self.attributes().into_iter().map(|(label, _)| label).collect()
    }

    pub fn attribute_values(&self) -> Vec<String> {
        self.attributes().into_iter().map(|(_, value)| value).collect()
    }

    pub fn randomize_rarity<R: Rng>(&mut self, rng: &mut R) {
        self.rarity = Rarity::random(rng);
    }

    pub fn randomize_brand<R: Rng>(&mut self, rng: &mut R) {
        self.brand = Manufacturer::random(rng).brand_name().to_string();
    }
}

/// Lowercase, dash-separated form of a display name
pub fn slugify(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| part.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}
