//! Derived stats and their combination rules.
//!
//! Every stat a [`Unit`](crate::Unit) exposes is listed in [`Stat`], and
//! [`Stat::rule`] maps it to exactly one [`StatRule`] together with the
//! field names the rule reads. Several stats deliberately read a key that
//! differs from their own name:
//!
//! | stat            | unit type key    | bonus key          | equipment key  |
//! |-----------------|------------------|--------------------|----------------|
//! | `org`           | `org`            | `max_organisation` |                |
//! | `recovery_rate` | `recovery_rate`  | `default_morale`   |                |
//! | `piercing`      | `ap_attack`      | `ap_attack`        | `ap_attack`    |
//! | `armor`         | `armor_value`    | `armor_value`      | `armor_value`  |
//! | `speed`         | `maximum_speed`  | (none)             | `maximum_speed`|

use crate::equipment::EquipmentStat;
use serde::{Deserialize, Serialize};

/// Speed of a unit whose equipment declares none.
pub const DEFAULT_MAXIMUM_SPEED: f64 = 4.0;

/// How a derived stat combines unit type, equipment and country bonus.
///
/// Equipment sums run over the *distinct* records of a unit; how many of
/// each record the unit needs does not matter here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatRule {
    /// `unit_type[unit_key] + bonus[bonus_key]`
    UnitTypeAdditive {
        unit_key: &'static str,
        bonus_key: &'static str,
    },
    /// `sum(equipment[equipment]) + bonus[bonus_key]`
    EquipmentAdditive {
        equipment: EquipmentStat,
        bonus_key: &'static str,
    },
    /// `sum(equipment[equipment]) * (1 + unit_type[unit_key] + bonus[bonus_key])`
    EquipmentMultiplicative {
        equipment: EquipmentStat,
        unit_key: &'static str,
        bonus_key: &'static str,
    },
    /// `max(equipment[equipment], or default) * (1 + unit_type[unit_key])`
    ///
    /// Country bonuses are not applied.
    EquipmentMax {
        equipment: EquipmentStat,
        unit_key: &'static str,
        default: f64,
    },
}

impl StatRule {
    /// Human-readable form of the rule, for breakdowns and logs.
    pub fn description(&self) -> String {
        match self {
            StatRule::UnitTypeAdditive {
                unit_key,
                bonus_key,
            } => format!("unit type {} + bonus {}", unit_key, bonus_key),
            StatRule::EquipmentAdditive {
                equipment,
                bonus_key,
            } => format!("sum equipment {} + bonus {}", equipment.key(), bonus_key),
            StatRule::EquipmentMultiplicative {
                equipment,
                unit_key,
                bonus_key,
            } => format!(
                "sum equipment {} x (1 + unit type {} + bonus {})",
                equipment.key(),
                unit_key,
                bonus_key
            ),
            StatRule::EquipmentMax {
                equipment,
                unit_key,
                default,
            } => format!(
                "max equipment {} (default {}) x (1 + unit type {})",
                equipment.key(),
                default,
                unit_key
            ),
        }
    }
}

const fn additive(key: &'static str) -> StatRule {
    StatRule::UnitTypeAdditive {
        unit_key: key,
        bonus_key: key,
    }
}

const fn scaled(equipment: EquipmentStat) -> StatRule {
    StatRule::EquipmentMultiplicative {
        equipment,
        unit_key: equipment.key(),
        bonus_key: equipment.key(),
    }
}

/// A derived stat of a unit.
///
/// Serializes as its snake_case name.
///
/// # Examples
///
/// ```rust
/// use divstat::{Stat, StatRule};
///
/// assert_eq!(Stat::Org.name(), "org");
/// assert_eq!(Stat::from_name("soft_attack"), Some(Stat::SoftAttack));
/// assert_eq!(
///     Stat::Org.rule(),
///     StatRule::UnitTypeAdditive { unit_key: "org", bonus_key: "max_organisation" },
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    Suppression,
    SuppressionFactor,
    Org,
    RecoveryRate,
    ReliabilityFactor,
    CasualtyTrickleback,
    ExperienceLossFactor,
    Initiative,
    EquipmentCaptureFactor,
    SupplyConsumptionFactor,
    CombatWidth,
    Recon,
    Entrenchment,
    SoftAttack,
    HardAttack,
    AirAttack,
    Defense,
    Breakthrough,
    Piercing,
    Armor,
    Hardness,
    Speed,
}

impl Stat {
    /// Every stat, in declaration order.
    pub const ALL: [Stat; 22] = [
        Stat::Suppression,
        Stat::SuppressionFactor,
        Stat::Org,
        Stat::RecoveryRate,
        Stat::ReliabilityFactor,
        Stat::CasualtyTrickleback,
        Stat::ExperienceLossFactor,
        Stat::Initiative,
        Stat::EquipmentCaptureFactor,
        Stat::SupplyConsumptionFactor,
        Stat::CombatWidth,
        Stat::Recon,
        Stat::Entrenchment,
        Stat::SoftAttack,
        Stat::HardAttack,
        Stat::AirAttack,
        Stat::Defense,
        Stat::Breakthrough,
        Stat::Piercing,
        Stat::Armor,
        Stat::Hardness,
        Stat::Speed,
    ];

    /// Snake-case name, as used in serialized stat sheets.
    pub const fn name(self) -> &'static str {
        match self {
            Stat::Suppression => "suppression",
            Stat::SuppressionFactor => "suppression_factor",
            Stat::Org => "org",
            Stat::RecoveryRate => "recovery_rate",
            Stat::ReliabilityFactor => "reliability_factor",
            Stat::CasualtyTrickleback => "casualty_trickleback",
            Stat::ExperienceLossFactor => "experience_loss_factor",
            Stat::Initiative => "initiative",
            Stat::EquipmentCaptureFactor => "equipment_capture_factor",
            Stat::SupplyConsumptionFactor => "supply_consumption_factor",
            Stat::CombatWidth => "combat_width",
            Stat::Recon => "recon",
            Stat::Entrenchment => "entrenchment",
            Stat::SoftAttack => "soft_attack",
            Stat::HardAttack => "hard_attack",
            Stat::AirAttack => "air_attack",
            Stat::Defense => "defense",
            Stat::Breakthrough => "breakthrough",
            Stat::Piercing => "piercing",
            Stat::Armor => "armor",
            Stat::Hardness => "hardness",
            Stat::Speed => "speed",
        }
    }

    /// Parse a stat from its snake_case name.
    pub fn from_name(name: &str) -> Option<Stat> {
        Stat::ALL.into_iter().find(|stat| stat.name() == name)
    }

    /// The combination rule and source keys for this stat.
    pub const fn rule(self) -> StatRule {
        match self {
            Stat::Suppression => additive("suppression"),
            Stat::SuppressionFactor => additive("suppression_factor"),
            Stat::Org => StatRule::UnitTypeAdditive {
                unit_key: "org",
                bonus_key: "max_organisation",
            },
            Stat::RecoveryRate => StatRule::UnitTypeAdditive {
                unit_key: "recovery_rate",
                bonus_key: "default_morale",
            },
            Stat::ReliabilityFactor => additive("reliability_factor"),
            Stat::CasualtyTrickleback => additive("casualty_trickleback"),
            Stat::ExperienceLossFactor => additive("experience_loss_factor"),
            Stat::Initiative => additive("initiative"),
            Stat::EquipmentCaptureFactor => additive("equipment_capture_factor"),
            Stat::SupplyConsumptionFactor => additive("supply_consumption_factor"),
            Stat::CombatWidth => additive("combat_width"),
            Stat::Recon => additive("recon"),
            Stat::Entrenchment => additive("entrenchment"),
            Stat::SoftAttack => scaled(EquipmentStat::SoftAttack),
            Stat::HardAttack => scaled(EquipmentStat::HardAttack),
            Stat::AirAttack => scaled(EquipmentStat::AirAttack),
            Stat::Defense => scaled(EquipmentStat::Defense),
            Stat::Breakthrough => scaled(EquipmentStat::Breakthrough),
            Stat::Piercing => scaled(EquipmentStat::ApAttack),
            Stat::Armor => scaled(EquipmentStat::ArmorValue),
            Stat::Hardness => scaled(EquipmentStat::Hardness),
            // Intentionally ignores country bonuses.
            Stat::Speed => StatRule::EquipmentMax {
                equipment: EquipmentStat::MaximumSpeed,
                unit_key: "maximum_speed",
                default: DEFAULT_MAXIMUM_SPEED,
            },
        }
    }
}

impl std::fmt::Display for Stat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
