//! Kind-specific item payloads
//!
//! Every item carries exactly one [`ItemVariant`]. Which variant is legal is
//! fixed by [`ItemKind::variant_shape`](super::ItemKind::variant_shape).

use serde::{Deserialize, Serialize};

/// Discriminator for [`ItemVariant`], without the payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VariantShape {
    Base,
    ShipWeapon,
    Engine,
    Thruster,
    HullPlating,
    Shield,
    AuxiliarySystem,
    PowerSupply,
    LifeSupport,
    Sensor,
    Transponder,
    MeleeWeapon,
    RangedWeapon,
    PersonalArmour,
    ThrusterPack,
    Gadget,
}

/// Stats shared by every weapon, ship-mounted or handheld
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WeaponStats {
    pub min_damage: i32,
    pub max_damage: i32,
    /// Percent chance to crit (0-100, not clamped)
    pub crit_chance: i32,
    /// Seconds between shots or swings
    pub fire_rate: f32,
    /// Seconds to reload
    pub reload_time: f32,
}

impl WeaponStats {
    /// Damage range as shown on tooltips
    pub fn damage_label(&self) -> String {
        format!("{} - {}", self.min_damage, self.max_damage)
    }

    /// Average damage per hit, before crits
    pub fn average_damage(&self) -> f32 {
        (self.min_damage + self.max_damage) as f32 / 2.0
    }
}

/// Melee damage types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DamageType {
    #[default]
    Slice,
    Crush,
    Plasma,
    Ion,
    Phase,
}

/// Ranged firing modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FiringMode {
    #[default]
    SemiAutomatic,
    BurstFire,
    Automatic,
}

impl FiringMode {
    pub fn name(&self) -> &'static str {
        match self {
            FiringMode::SemiAutomatic => "Semi-Automatic",
            FiringMode::BurstFire => "Burst Fire",
            FiringMode::Automatic => "Automatic",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ShipWeaponData {
    #[serde(flatten)]
    pub weapon: WeaponStats,
    /// Key of the projectile prefab this weapon spawns
    pub projectile_token: String,
    /// Key of the firing pattern data
    pub firing_data_token: String,
    pub power_per_shot: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MeleeWeaponData {
    #[serde(flatten)]
    pub weapon: WeaponStats,
    pub damage_type: DamageType,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RangedWeaponData {
    #[serde(flatten)]
    pub weapon: WeaponStats,
    pub fire_mode: FiringMode,
    /// Rounds per magazine
    pub max_capacity: i32,
    /// Accuracy rating, 0-100
    pub accuracy: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EngineData {
    pub thrust: f32,
    pub top_speed: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ThrusterData {
    /// Degrees per second
    pub turn_rate: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ArmourData {
    pub armour_rating: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ShieldData {
    pub capacity: i32,
    /// Points per second
    pub recharge_rate: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AuxiliarySystemData {
    pub cooldown: f32,
    pub duration: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PowerSupplyData {
    pub output: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LifeSupportData {
    /// Seconds of breathable air
    pub oxygen_capacity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SensorData {
    pub range: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TransponderData {
    pub signature: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ThrusterPackData {
    pub fuel_capacity: f32,
    pub boost_force: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GadgetData {
    pub charges: u32,
    pub cooldown: f32,
}

/// Kind-specific payload layered on top of the base item fields.
///
/// Serialized with an explicit `"variant"` tag so a record can always be
/// routed back to the right payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant")]
pub enum ItemVariant {
    Base,
    ShipWeapon(ShipWeaponData),
    Engine(EngineData),
    Thruster(ThrusterData),
    HullPlating(ArmourData),
    Shield(ShieldData),
    AuxiliarySystem(AuxiliarySystemData),
    PowerSupply(PowerSupplyData),
    LifeSupport(LifeSupportData),
    Sensor(SensorData),
    Transponder(TransponderData),
    MeleeWeapon(MeleeWeaponData),
    RangedWeapon(RangedWeaponData),
    PersonalArmour(ArmourData),
    ThrusterPack(ThrusterPackData),
    Gadget(GadgetData),
}

impl ItemVariant {
    /// Zeroed payload for a shape
    pub fn default_for(shape: VariantShape) -> ItemVariant {
        match shape {
            VariantShape::Base => ItemVariant::Base,
            VariantShape::ShipWeapon => ItemVariant::ShipWeapon(ShipWeaponData::default()),
            VariantShape::Engine => ItemVariant::Engine(EngineData::default()),
            VariantShape::Thruster => ItemVariant::Thruster(ThrusterData::default()),
            VariantShape::HullPlating => ItemVariant::HullPlating(ArmourData::default()),
            VariantShape::Shield => ItemVariant::Shield(ShieldData::default()),
            VariantShape::AuxiliarySystem => ItemVariant::AuxiliarySystem(AuxiliarySystemData::default()),
            VariantShape::PowerSupply => ItemVariant::PowerSupply(PowerSupplyData::default()),
            VariantShape::LifeSupport => ItemVariant::LifeSupport(LifeSupportData::default()),
            VariantShape::Sensor => ItemVariant::Sensor(SensorData::default()),
            VariantShape::Transponder => ItemVariant::Transponder(TransponderData::default()),
            VariantShape::MeleeWeapon => ItemVariant::MeleeWeapon(MeleeWeaponData::default()),
            VariantShape::RangedWeapon => ItemVariant::RangedWeapon(RangedWeaponData::default()),
            VariantShape::PersonalArmour => ItemVariant::PersonalArmour(ArmourData::default()),
            VariantShape::ThrusterPack => ItemVariant::ThrusterPack(ThrusterPackData::default()),
            VariantShape::Gadget => ItemVariant::Gadget(GadgetData::default()),
        }
    }

    pub fn shape(&self) -> VariantShape {
        match self {
            ItemVariant::Base => VariantShape::Base,
            ItemVariant::ShipWeapon(_) => VariantShape::ShipWeapon,
            ItemVariant::Engine(_) => VariantShape::Engine,
            ItemVariant::Thruster(_) => VariantShape::Thruster,
            ItemVariant::HullPlating(_) => VariantShape::HullPlating,
            ItemVariant::Shield(_) => VariantShape::Shield,
            ItemVariant::AuxiliarySystem(_) => VariantShape::AuxiliarySystem,
            ItemVariant::PowerSupply(_) => VariantShape::PowerSupply,
            ItemVariant::LifeSupport(_) => VariantShape::LifeSupport,
            ItemVariant::Sensor(_) => VariantShape::Sensor,
            ItemVariant::Transponder(_) => VariantShape::Transponder,
            ItemVariant::MeleeWeapon(_) => VariantShape::MeleeWeapon,
            ItemVariant::RangedWeapon(_) => VariantShape::RangedWeapon,
            ItemVariant::PersonalArmour(_) => VariantShape::PersonalArmour,
            ItemVariant::ThrusterPack(_) => VariantShape::ThrusterPack,
            ItemVariant::Gadget(_) => VariantShape::Gadget,
        }
    }

    /// Weapon stats, for any weapon payload
    pub fn weapon_stats(&self) -> Option<&WeaponStats> {
        match self {
            ItemVariant::ShipWeapon(w) => Some(&w.weapon),
            ItemVariant::MeleeWeapon(w) => Some(&w.weapon),
            ItemVariant::RangedWeapon(w) => Some(&w.weapon),
            _ => None,
        }
    }

    /// Tooltip (label, value) pairs. `value` is the owning item's currency value.
    pub fn attributes(&self, value: i64) -> Vec<(&'static str, String)> {
        match self {
            ItemVariant::Base => vec![("Value", value.to_string())],
            ItemVariant::ShipWeapon(w) => vec![
                ("Damage", w.weapon.damage_label()),
                ("Fire Rate", w.weapon.fire_rate.to_string()),
                ("Crit Chance", w.weapon.crit_chance.to_string()),
                ("Power Per Shot", w.power_per_shot.to_string()),
                ("Value", value.to_string()),
            ],
            ItemVariant::MeleeWeapon(w) => vec![
                ("Damage", w.weapon.damage_label()),
                ("Damage Type", format!("{:?}", w.damage_type)),
                ("Attack Speed", w.weapon.fire_rate.to_string()),
                ("Value", value.to_string()),
            ],
            ItemVariant::RangedWeapon(w) => vec![
                ("Damage", w.weapon.damage_label()),
                ("Fire Mode", w.fire_mode.name().to_string()),
                ("Capacity", w.max_capacity.to_string()),
                ("Fire Rate", w.weapon.fire_rate.to_string()),
                ("Accuracy", w.accuracy.to_string()),
                ("Crit Chance", w.weapon.crit_chance.to_string()),
            ],
            ItemVariant::Engine(e) => vec![
                ("Thrust", e.thrust.to_string()),
                ("Top Speed", e.top_speed.to_string()),
            ],
            ItemVariant::Thruster(t) => vec![("Turn Rate", t.turn_rate.to_string())],
            ItemVariant::HullPlating(a) | ItemVariant::PersonalArmour(a) => {
                vec![("Armour", a.armour_rating.to_string())]
            }
            ItemVariant::Shield(s) => vec![
                ("Capacity", s.capacity.to_string()),
                ("Recharge Rate", s.recharge_rate.to_string()),
            ],
            ItemVariant::AuxiliarySystem(a) => vec![
                ("Cooldown", a.cooldown.to_string()),
                ("Duration", a.duration.to_string()),
            ],
            ItemVariant::PowerSupply(p) => vec![("Output", p.output.to_string())],
            ItemVariant::LifeSupport(l) => vec![("Oxygen", l.oxygen_capacity.to_string())],
            ItemVariant::Sensor(s) => vec![("Range", s.range.to_string())],
            ItemVariant::Transponder(t) => vec![("Signature", t.signature.to_string())],
            ItemVariant::ThrusterPack(t) => vec![
                ("Fuel", t.fuel_capacity.to_string()),
                ("Boost", t.boost_force.to_string()),
            ],
            ItemVariant::Gadget(g) => vec![
                ("Charges", g.charges.to_string()),
                ("Cooldown", g.cooldown.to_string()),
            ],
        }
    }
}
