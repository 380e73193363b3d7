//! Stat sheets: a serializable snapshot of everything a unit derives.

use crate::stat::Stat;
use crate::terrain::TerrainTable;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Every derived value of one unit, for reporting layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatSheet {
    /// Key of the unit type the unit was built from.
    pub unit_type: String,
    /// Tag of the country the unit was built for.
    pub country: String,
    pub stats: BTreeMap<Stat, f64>,
    pub ic_cost: f64,
    pub terrain_bonuses: TerrainTable,
    /// Fallback records used in place of missing country variants.
    pub substituted_equipment: BTreeSet<String>,
}

impl StatSheet {
    /// Value of `stat`, `0.0` if the sheet does not carry it.
    pub fn get(&self, stat: Stat) -> f64 {
        self.stats.get(&stat).copied().unwrap_or(0.0)
    }
}
