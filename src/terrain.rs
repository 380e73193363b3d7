//! Terrain bonus tables.
//!
//! A terrain table maps terrain names to nested tables of stat modifiers
//! (`{"forest": {"attack": -0.1, "movement": -0.2}}`). Nesting depth is not
//! fixed. Unit types and countries each carry one; the effective table of a
//! unit is the unit-type table deep-merged with the country table on top.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A node in a terrain table: either a numeric modifier or a nested table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TerrainValue {
    Modifier(f64),
    Table(TerrainTable),
}

impl TerrainValue {
    /// The numeric modifier, if this node is a leaf.
    pub fn as_modifier(&self) -> Option<f64> {
        match self {
            TerrainValue::Modifier(v) => Some(*v),
            TerrainValue::Table(_) => None,
        }
    }

    /// The nested table, if this node is not a leaf.
    pub fn as_table(&self) -> Option<&TerrainTable> {
        match self {
            TerrainValue::Modifier(_) => None,
            TerrainValue::Table(t) => Some(t),
        }
    }
}

impl From<f64> for TerrainValue {
    fn from(v: f64) -> Self {
        TerrainValue::Modifier(v)
    }
}

impl From<TerrainTable> for TerrainValue {
    fn from(t: TerrainTable) -> Self {
        TerrainValue::Table(t)
    }
}

/// Nested mapping of terrain modifiers.
///
/// # Examples
///
/// ```rust
/// use divstat::TerrainTable;
///
/// let table = TerrainTable::new()
///     .with_modifier("forest", "attack", 0.1)
///     .with_modifier("forest", "movement", -0.2);
///
/// assert_eq!(table.modifier("forest", "attack"), 0.1);
/// assert_eq!(table.modifier("plains", "attack"), 0.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TerrainTable {
    entries: BTreeMap<String, TerrainValue>,
}

impl TerrainTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<TerrainValue>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Set `terrain.stat = value`, creating the terrain table if needed.
    ///
    /// A scalar already stored under `terrain` is replaced by a table.
    pub fn with_modifier(mut self, terrain: &str, stat: &str, value: f64) -> Self {
        let slot = self
            .entries
            .entry(terrain.to_string())
            .or_insert_with(|| TerrainValue::Table(TerrainTable::new()));
        if matches!(slot, TerrainValue::Modifier(_)) {
            *slot = TerrainValue::Table(TerrainTable::new());
        }
        if let TerrainValue::Table(inner) = slot {
            inner.insert(stat, value);
        }
        self
    }

    /// Entry stored directly under `key`.
    pub fn get(&self, key: &str) -> Option<&TerrainValue> {
        self.entries.get(key)
    }

    /// The nested table stored under `key`, if any.
    pub fn table(&self, key: &str) -> Option<&TerrainTable> {
        self.get(key).and_then(TerrainValue::as_table)
    }

    /// Modifier for `stat` in `terrain`, or `0.0` when absent.
    pub fn modifier(&self, terrain: &str, stat: &str) -> f64 {
        self.table(terrain)
            .and_then(|t| t.get(stat))
            .and_then(TerrainValue::as_modifier)
            .unwrap_or(0.0)
    }

    /// Number of top-level entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over top-level entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TerrainValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Deep-merge `overlay` on top of a copy of `self`.
    ///
    /// Where both sides hold a nested table the merge recurses; anywhere else
    /// the overlay value replaces the base value. Values are overwritten,
    /// never summed. Neither input is modified.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use divstat::TerrainTable;
    ///
    /// let base = TerrainTable::new().with_modifier("forest", "attack", 1.0);
    /// let overlay = TerrainTable::new()
    ///     .with_modifier("forest", "defense", 2.0)
    ///     .with_modifier("plains", "attack", 3.0);
    ///
    /// let merged = base.merged(&overlay);
    /// assert_eq!(merged.modifier("forest", "attack"), 1.0);
    /// assert_eq!(merged.modifier("forest", "defense"), 2.0);
    /// assert_eq!(merged.modifier("plains", "attack"), 3.0);
    /// ```
    pub fn merged(&self, overlay: &TerrainTable) -> TerrainTable {
        let mut result = self.clone();
        result.merge_from(overlay);
        result
    }

    fn merge_from(&mut self, overlay: &TerrainTable) {
        for (key, value) in &overlay.entries {
            if let (Some(TerrainValue::Table(base)), TerrainValue::Table(over)) =
                (self.entries.get_mut(key), value)
            {
                base.merge_from(over);
                continue;
            }
            self.entries.insert(key.clone(), value.clone());
        }
    }
}

/// Effective terrain table of a unit: `base` with `overlay` deep-merged on top.
pub fn merge_terrain_bonuses(base: &TerrainTable, overlay: Option<&TerrainTable>) -> TerrainTable {
    match overlay {
        Some(overlay) => base.merged(overlay),
        None => base.clone(),
    }
}
