//! Equipment module.
//!
//! Equipment records live in an [`EquipmentDb`] arena and are referred to by
//! [`EquipmentId`] handles. Catalogs map equipment names to handles: each
//! country carries its own [`EquipmentCatalog`], and the database carries the
//! global fallback catalog used when a country lacks a specific model.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Handle to an equipment record inside an [`EquipmentDb`].
///
/// Two requirements that resolve to the same record resolve to the same
/// handle, which is what makes the resolved equipment multiset well defined.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EquipmentId(u32);

impl EquipmentId {
    /// Position of the record in its arena.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for EquipmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Numeric combat fields carried by an [`EquipmentRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EquipmentStat {
    SoftAttack,
    HardAttack,
    AirAttack,
    Defense,
    Breakthrough,
    ApAttack,
    ArmorValue,
    Hardness,
    MaximumSpeed,
}

impl EquipmentStat {
    /// The field name as it appears in game data.
    pub const fn key(self) -> &'static str {
        match self {
            EquipmentStat::SoftAttack => "soft_attack",
            EquipmentStat::HardAttack => "hard_attack",
            EquipmentStat::AirAttack => "air_attack",
            EquipmentStat::Defense => "defense",
            EquipmentStat::Breakthrough => "breakthrough",
            EquipmentStat::ApAttack => "ap_attack",
            EquipmentStat::ArmorValue => "armor_value",
            EquipmentStat::Hardness => "hardness",
            EquipmentStat::MaximumSpeed => "maximum_speed",
        }
    }
}

/// Combat and logistics stats of one equipment model.
///
/// Every combat field is optional; callers treat a missing field as zero,
/// except `maximum_speed` where a missing value means "does not set the
/// unit's speed".
///
/// # Examples
///
/// ```rust
/// use divstat::{EquipmentRecord, EquipmentStat};
///
/// let rifle = EquipmentRecord::new("infantry_equipment_1")
///     .with(EquipmentStat::SoftAttack, 6.0)
///     .with(EquipmentStat::Defense, 22.0)
///     .with_build_cost(0.5);
///
/// assert_eq!(rifle.stat(EquipmentStat::SoftAttack), Some(6.0));
/// assert_eq!(rifle.stat(EquipmentStat::HardAttack), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquipmentRecord {
    pub name: String,
    pub soft_attack: Option<f64>,
    pub hard_attack: Option<f64>,
    pub air_attack: Option<f64>,
    pub defense: Option<f64>,
    pub breakthrough: Option<f64>,
    pub ap_attack: Option<f64>,
    pub armor_value: Option<f64>,
    pub hardness: Option<f64>,
    pub maximum_speed: Option<f64>,
    pub build_cost_ic: f64,
}

impl EquipmentRecord {
    /// Create a record with no stats set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set a combat field, builder style.
    pub fn with(mut self, stat: EquipmentStat, value: f64) -> Self {
        *self.field_mut(stat) = Some(value);
        self
    }

    /// Set the production cost in industrial capacity.
    pub fn with_build_cost(mut self, build_cost_ic: f64) -> Self {
        self.build_cost_ic = build_cost_ic;
        self
    }

    /// Read a combat field.
    pub fn stat(&self, stat: EquipmentStat) -> Option<f64> {
        match stat {
            EquipmentStat::SoftAttack => self.soft_attack,
            EquipmentStat::HardAttack => self.hard_attack,
            EquipmentStat::AirAttack => self.air_attack,
            EquipmentStat::Defense => self.defense,
            EquipmentStat::Breakthrough => self.breakthrough,
            EquipmentStat::ApAttack => self.ap_attack,
            EquipmentStat::ArmorValue => self.armor_value,
            EquipmentStat::Hardness => self.hardness,
            EquipmentStat::MaximumSpeed => self.maximum_speed,
        }
    }

    fn field_mut(&mut self, stat: EquipmentStat) -> &mut Option<f64> {
        match stat {
            EquipmentStat::SoftAttack => &mut self.soft_attack,
            EquipmentStat::HardAttack => &mut self.hard_attack,
            EquipmentStat::AirAttack => &mut self.air_attack,
            EquipmentStat::Defense => &mut self.defense,
            EquipmentStat::Breakthrough => &mut self.breakthrough,
            EquipmentStat::ApAttack => &mut self.ap_attack,
            EquipmentStat::ArmorValue => &mut self.armor_value,
            EquipmentStat::Hardness => &mut self.hardness,
            EquipmentStat::MaximumSpeed => &mut self.maximum_speed,
        }
    }
}

/// Mapping from equipment name to record handle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EquipmentCatalog {
    entries: BTreeMap<String, EquipmentId>,
}

impl EquipmentCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `name` to `id`, replacing any previous entry.
    pub fn insert(&mut self, name: impl Into<String>, id: EquipmentId) {
        self.entries.insert(name.into(), id);
    }

    /// Handle registered for `name`, if any.
    pub fn get(&self, name: &str) -> Option<EquipmentId> {
        self.entries.get(name).copied()
    }

    /// Whether `name` has an entry.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, handle)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, EquipmentId)> {
        self.entries.iter().map(|(name, id)| (name.as_str(), *id))
    }
}

/// Arena of equipment records plus the global fallback catalog.
///
/// Built once by the data-loading layer and then shared read-only (usually
/// behind an `Arc`) by every [`Country`](crate::Country).
///
/// # Examples
///
/// ```rust
/// use divstat::{EquipmentDb, EquipmentRecord};
///
/// let mut db = EquipmentDb::new();
/// let modern = db.insert(EquipmentRecord::new("infantry_equipment_2"));
/// let generic = db.insert_fallback(
///     "infantry_equipment",
///     EquipmentRecord::new("infantry_equipment_0"),
/// );
///
/// assert_eq!(db.get(modern).map(|r| r.name.as_str()), Some("infantry_equipment_2"));
/// assert_eq!(db.fallback().get("infantry_equipment"), Some(generic));
/// ```
#[derive(Debug, Clone, Default)]
pub struct EquipmentDb {
    records: Vec<EquipmentRecord>,
    fallback: EquipmentCatalog,
}

impl EquipmentDb {
    /// Create an empty database with an empty fallback catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a record and return its handle.
    pub fn insert(&mut self, record: EquipmentRecord) -> EquipmentId {
        let id = EquipmentId(self.records.len() as u32);
        self.records.push(record);
        id
    }

    /// Store a record and register it as the fallback for `requirement`.
    pub fn insert_fallback(
        &mut self,
        requirement: impl Into<String>,
        record: EquipmentRecord,
    ) -> EquipmentId {
        let id = self.insert(record);
        self.fallback.insert(requirement, id);
        id
    }

    /// Register an already stored record as the fallback for `requirement`.
    pub fn set_fallback(&mut self, requirement: impl Into<String>, id: EquipmentId) {
        self.fallback.insert(requirement, id);
    }

    /// Look a record up by handle.
    ///
    /// Returns `None` for handles issued by a different database.
    pub fn get(&self, id: EquipmentId) -> Option<&EquipmentRecord> {
        self.records.get(id.index())
    }

    /// The global fallback catalog.
    pub fn fallback(&self) -> &EquipmentCatalog {
        &self.fallback
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no records are stored.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
