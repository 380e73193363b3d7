//! Unit type templates.

use crate::key::{StatKey, StatMap};
use crate::terrain::TerrainTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Doctrinal template of a unit: base stats and equipment requirements.
///
/// The derived-stat base values (`org`, `recon`, the `soft_attack` style
/// multipliers, `maximum_speed`, ...) are kept in
/// [`stats`](UnitType::stats), where an absent entry reads as zero. In
/// serialized form they sit at the top level next to the fixed fields.
///
/// # Examples
///
/// ```rust
/// use divstat::UnitType;
///
/// let infantry = UnitType::new("infantry", "Infantry", "infantry")
///     .with_stat("org", 60.0)
///     .with_equipment("infantry_equipment", 100);
///
/// assert_eq!(infantry.stat("org"), 60.0);
/// assert_eq!(infantry.stat("recon"), 0.0);
/// assert_eq!(infantry.equipment.get("infantry_equipment"), Some(&100));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitType {
    /// Identifier, also the category key used to look up country bonuses.
    pub key: String,
    pub name: String,
    pub group: String,
    pub hp: f64,
    pub supply_use: f64,
    pub manpower: u32,
    pub training_time: u32,
    pub weight: f64,
    pub special_forces: bool,
    pub can_be_parachuted: bool,

    /// Required equipment: requirement name to count.
    pub equipment: BTreeMap<String, u32>,

    pub terrain_bonuses: TerrainTable,

    /// Base values of derived stats.
    #[serde(flatten)]
    pub stats: StatMap,
}

impl UnitType {
    /// Create a template with no stats, equipment or terrain bonuses.
    pub fn new(key: impl Into<String>, name: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            group: group.into(),
            ..Self::default()
        }
    }

    /// Set a derived-stat base value, builder style.
    pub fn with_stat(mut self, key: impl Into<StatKey>, value: f64) -> Self {
        self.stats.insert(key, value);
        self
    }

    /// Add an equipment requirement, builder style.
    pub fn with_equipment(mut self, requirement: impl Into<String>, count: u32) -> Self {
        self.equipment.insert(requirement.into(), count);
        self
    }

    /// Set the terrain table, builder style.
    pub fn with_terrain_bonuses(mut self, terrain_bonuses: TerrainTable) -> Self {
        self.terrain_bonuses = terrain_bonuses;
        self
    }

    /// Base value of a derived stat, `0.0` when the template omits it.
    pub fn stat(&self, key: &str) -> f64 {
        self.stats.get(key)
    }
}
