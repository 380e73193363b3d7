//! Country bonus module.
//!
//! A [`BonusTable`] holds the modifiers a country applies to one category of
//! unit: flat stat shifts keyed by stat name, plus an optional nested terrain
//! table. Countries produce tables through a [`BonusProvider`], the seam
//! where research, doctrine and national-spirit effects are plugged in by
//! the surrounding game layer.

use crate::key::{StatKey, StatMap};
use crate::terrain::TerrainTable;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Modifiers a country applies to one unit category.
///
/// Any stat absent from the table contributes `0.0`; a lookup never fails.
///
/// # Examples
///
/// ```rust
/// use divstat::BonusTable;
///
/// let bonuses = BonusTable::new()
///     .with("max_organisation", 5.0)
///     .with("soft_attack", 0.05);
///
/// assert_eq!(bonuses.get("max_organisation"), 5.0);
/// assert_eq!(bonuses.get("breakthrough"), 0.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BonusTable {
    #[serde(flatten)]
    values: StatMap,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    terrain_bonuses: Option<TerrainTable>,
}

impl BonusTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a stat modifier, builder style.
    pub fn with(mut self, key: impl Into<StatKey>, value: f64) -> Self {
        self.values.insert(key, value);
        self
    }

    /// Attach a terrain table, builder style.
    pub fn with_terrain_bonuses(mut self, terrain_bonuses: TerrainTable) -> Self {
        self.terrain_bonuses = Some(terrain_bonuses);
        self
    }

    /// Insert or replace a stat modifier.
    pub fn insert(&mut self, key: impl Into<StatKey>, value: f64) {
        self.values.insert(key, value);
    }

    /// Modifier for `key`, or `0.0` when the table has none.
    pub fn get(&self, key: &str) -> f64 {
        self.values.get(key)
    }

    /// The stat modifiers, without the terrain table.
    pub fn values(&self) -> &StatMap {
        &self.values
    }

    /// The country's terrain table, if it has one.
    pub fn terrain_bonuses(&self) -> Option<&TerrainTable> {
        self.terrain_bonuses.as_ref()
    }

    /// Number of stat modifiers, not counting the terrain table.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the table holds neither stat modifiers nor a terrain table.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.terrain_bonuses.is_none()
    }
}

/// Produces the bonus table a country applies to a unit category.
///
/// Implementations must be deterministic: the same category yields the same
/// table for as long as any [`Unit`](crate::Unit) built from the country is
/// alive. A unit captures its table once at construction and does not see
/// later changes.
///
/// Any `Fn(&str) -> BonusTable` closure is a provider.
///
/// # Examples
///
/// ```rust
/// use divstat::{BonusProvider, BonusTable};
///
/// let provider = |category: &str| match category {
///     "infantry" => BonusTable::new().with("max_organisation", 5.0),
///     _ => BonusTable::new(),
/// };
///
/// assert_eq!(provider.unit_bonuses_for("infantry").get("max_organisation"), 5.0);
/// assert!(provider.unit_bonuses_for("light_armor").is_empty());
/// ```
pub trait BonusProvider: Send + Sync {
    /// Bonus table for the unit category `category`.
    fn unit_bonuses_for(&self, category: &str) -> BonusTable;
}

/// A provider that grants nothing to any category.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBonuses;

impl BonusProvider for NoBonuses {
    fn unit_bonuses_for(&self, _category: &str) -> BonusTable {
        BonusTable::new()
    }
}

/// A provider backed by a fixed table per category.
///
/// Categories without an entry get an empty table.
///
/// # Examples
///
/// ```rust
/// use divstat::{BonusProvider, BonusTable, MapBonuses};
///
/// let mut bonuses = MapBonuses::empty();
/// bonuses.insert("artillery_brigade", BonusTable::new().with("soft_attack", 0.1));
///
/// assert_eq!(bonuses.unit_bonuses_for("artillery_brigade").get("soft_attack"), 0.1);
/// assert_eq!(bonuses.unit_bonuses_for("infantry").get("soft_attack"), 0.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MapBonuses {
    tables: HashMap<String, BonusTable>,
}

impl MapBonuses {
    /// Create a provider from prepared per-category tables.
    pub fn new(tables: HashMap<String, BonusTable>) -> Self {
        Self { tables }
    }

    /// Create a provider with no categories.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Set the table for `category`, replacing any previous one.
    pub fn insert(&mut self, category: impl Into<String>, table: BonusTable) {
        self.tables.insert(category.into(), table);
    }
}

impl BonusProvider for MapBonuses {
    fn unit_bonuses_for(&self, category: &str) -> BonusTable {
        self.tables.get(category).cloned().unwrap_or_default()
    }
}

impl<F> BonusProvider for F
where
    F: Fn(&str) -> BonusTable + Send + Sync,
{
    fn unit_bonuses_for(&self, category: &str) -> BonusTable {
        self(category)
    }
}
