//! # divstat - Deterministic Division Stat Derivation
//!
//! Computes the effective combat and logistics stats of a unit in a
//! grand-strategy wargame from three inputs:
//! - a **unit type** template (doctrinal base stats and equipment needs)
//! - an **equipment** catalog, scoped per country, with a global fallback
//!   catalog for models a country does not have
//! - **country bonuses** that shift stats and terrain modifiers
//!
//! Loading game data is left to the caller; this crate works on
//! already-parsed structures and never mutates them.
//!
//! ## Pipeline
//!
//! ```text
//! (UnitType, Country) → [EquipmentResolver] → Unit → [StatCalculator] → stats
//!                                                  → [terrain merge]   → terrain table
//! ```
//!
//! 1. **Resolution** maps each equipment requirement to a record, preferring
//!    the country catalog and recording fallback substitutions
//! 2. **Bonus capture** takes the country's table for the unit type once
//! 3. **Derivation** applies one [`StatRule`] per [`Stat`]
//!
//! ## Combination rules
//!
//! - unit type + bonus (organisation, recon, combat width, ...)
//! - equipment sum + bonus
//! - equipment sum × (1 + unit type + bonus) (attacks, defense, armor, ...)
//! - equipment max × (1 + unit type) for speed, with no country bonus
//!
//! Equipment sums count each distinct record once; only `ic_cost` is
//! weighted by the required counts.
//!
//! ## Example
//!
//! ```rust
//! use divstat::*;
//! use std::sync::Arc;
//!
//! let mut db = EquipmentDb::new();
//! let rifle = db.insert(
//!     EquipmentRecord::new("infantry_equipment_1").with(EquipmentStat::SoftAttack, 10.0),
//! );
//! let gun = db.insert(
//!     EquipmentRecord::new("artillery_equipment_1").with(EquipmentStat::SoftAttack, 6.0),
//! );
//!
//! let country = Country::new("GER", Arc::new(db))
//!     .with_equipment("infantry_equipment", rifle)
//!     .with_equipment("artillery_equipment", gun)
//!     .with_bonuses(|_: &str| BonusTable::new().with("soft_attack", 0.05));
//!
//! let unit_type = UnitType::new("infantry", "Infantry", "infantry")
//!     .with_stat("soft_attack", 0.1)
//!     .with_equipment("infantry_equipment", 100)
//!     .with_equipment("artillery_equipment", 12);
//!
//! let unit = Unit::new(Arc::new(unit_type), Arc::new(country))?;
//! assert!((unit.soft_attack() - 18.4).abs() < 1e-9); // (10 + 6) * 1.15
//! # Ok::<(), UnitError>(())
//! ```
//!
//! ## Modules
//!
//! - [`unit`] - The unit entity and its accessors
//! - [`resolver`] - Equipment resolution with fallback
//! - [`calculator`] - Stat combination rules
//! - [`stat`] - Stat identifiers and the rule table
//! - [`terrain`] - Terrain tables and deep merge
//! - [`bonus`] - Country bonus tables and providers
//! - [`equipment`] - Equipment records, handles and catalogs
//! - [`country`] - Country catalog and bonus lookup
//! - [`unit_type`] - Unit type templates
//! - [`breakdown`] - Per-stat explanations
//! - [`sheet`] - Serializable stat snapshots
//! - [`key`] - Stat keys and keyed maps
//! - [`error`] - Error types

pub mod bonus;
pub mod breakdown;
pub mod calculator;
pub mod country;
pub mod equipment;
pub mod error;
pub mod key;
pub mod resolver;
pub mod sheet;
pub mod stat;
pub mod terrain;
pub mod unit;
pub mod unit_type;

// Re-export main types for convenience
pub use country::Country;
pub use error::UnitError;
pub use unit::Unit;
pub use unit_type::UnitType;

pub use bonus::{BonusProvider, BonusTable, MapBonuses, NoBonuses};
pub use breakdown::StatBreakdown;
pub use calculator::StatCalculator;
pub use equipment::{EquipmentCatalog, EquipmentDb, EquipmentId, EquipmentRecord, EquipmentStat};
pub use key::{StatKey, StatMap};
pub use resolver::{EquipmentResolver, Resolution, ResolvedEquipment};
pub use sheet::StatSheet;
pub use stat::{Stat, StatRule, DEFAULT_MAXIMUM_SPEED};
pub use terrain::{merge_terrain_bonuses, TerrainTable, TerrainValue};
