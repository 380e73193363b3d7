//! Unit module.
//!
//! A [`Unit`] is a unit type fielded by a specific country. Construction
//! resolves equipment and captures the country's bonus table once; after
//! that every accessor is a pure read over the captured state.

use crate::bonus::BonusTable;
use crate::breakdown::StatBreakdown;
use crate::calculator::StatCalculator;
use crate::country::Country;
use crate::equipment::{EquipmentId, EquipmentRecord};
use crate::error::UnitError;
use crate::resolver::ResolvedEquipment;
use crate::sheet::StatSheet;
use crate::stat::Stat;
use crate::terrain::{merge_terrain_bonuses, TerrainTable};
use crate::unit_type::UnitType;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{instrument, trace};

/// A unit type fielded by a country, with its derived stats.
///
/// The unit holds shared references to its unit type and country and never
/// mutates them. If the country's bonus rules change, build a new unit; an
/// existing one keeps the bonus table it captured.
///
/// # Examples
///
/// ```rust
/// use divstat::*;
/// use std::sync::Arc;
///
/// let mut db = EquipmentDb::new();
/// let rifle = db.insert(
///     EquipmentRecord::new("infantry_equipment_1")
///         .with(EquipmentStat::SoftAttack, 6.0)
///         .with_build_cost(0.5),
/// );
/// db.insert_fallback(
///     "support_equipment",
///     EquipmentRecord::new("support_equipment_1").with_build_cost(4.0),
/// );
///
/// let country = Country::new("GER", Arc::new(db))
///     .with_equipment("infantry_equipment", rifle)
///     .with_bonuses(|_: &str| BonusTable::new().with("max_organisation", 5.0));
///
/// let infantry = UnitType::new("infantry", "Infantry", "infantry")
///     .with_stat("org", 60.0)
///     .with_equipment("infantry_equipment", 100)
///     .with_equipment("support_equipment", 10);
///
/// let unit = Unit::new(Arc::new(infantry), Arc::new(country))?;
///
/// assert_eq!(unit.org(), 65.0);
/// assert_eq!(unit.soft_attack(), 6.0);
/// assert_eq!(unit.ic_cost(), 90.0);
/// assert!(!unit.is_authentic());
/// # Ok::<(), UnitError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Unit {
    unit_type: Arc<UnitType>,
    country: Arc<Country>,
    equipment: ResolvedEquipment,
    bonuses: BonusTable,
}

impl Unit {
    /// Build a unit of `unit_type` for `country`.
    ///
    /// # Errors
    ///
    /// [`UnitError::UnresolvedEquipment`] if an equipment requirement is in
    /// neither the country catalog nor the fallback catalog.
    #[instrument(skip_all, fields(unit_type = %unit_type.key, country = %country.tag()))]
    pub fn new(unit_type: Arc<UnitType>, country: Arc<Country>) -> Result<Self, UnitError> {
        let equipment = country.resolver().resolve(&unit_type.equipment)?;
        let bonuses = country.unit_bonuses_for(&unit_type.key);
        trace!(
            records = equipment.len(),
            substituted = equipment.substituted().len(),
            bonuses = bonuses.len(),
            "unit resolved"
        );

        Ok(Self {
            unit_type,
            country,
            equipment,
            bonuses,
        })
    }

    fn calculator(&self) -> StatCalculator<'_> {
        StatCalculator::new(
            &self.unit_type,
            &self.equipment,
            self.country.db(),
            &self.bonuses,
        )
    }

    /// The template this unit was built from.
    pub fn unit_type(&self) -> &UnitType {
        &self.unit_type
    }

    /// The country fielding this unit.
    pub fn country(&self) -> &Country {
        &self.country
    }

    /// The bonus table captured at construction.
    pub fn bonuses(&self) -> &BonusTable {
        &self.bonuses
    }

    /// Resolved equipment as `(record, count)` pairs.
    pub fn equipment(&self) -> impl Iterator<Item = (EquipmentId, &EquipmentRecord, u32)> + '_ {
        let db = self.country.db();
        self.equipment
            .iter()
            .filter_map(move |(id, count)| db.get(id).map(|record| (id, record, count)))
    }

    /// Names of fallback records used because the country lacks its own
    /// variant.
    pub fn substituted_equipment(&self) -> &BTreeSet<String> {
        self.equipment.substituted()
    }

    /// Whether every piece of equipment came from the country's own catalog.
    pub fn is_authentic(&self) -> bool {
        self.equipment.substituted().is_empty()
    }

    /// Unit group, such as `infantry` or `support`.
    pub fn group(&self) -> &str {
        &self.unit_type.group
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.unit_type.name
    }

    /// Hit points, from the unit type.
    pub fn hp(&self) -> f64 {
        self.unit_type.hp
    }

    /// Supply use, from the unit type.
    pub fn supply_use(&self) -> f64 {
        self.unit_type.supply_use
    }

    /// Manpower, from the unit type.
    pub fn manpower(&self) -> u32 {
        self.unit_type.manpower
    }

    /// Training time in days, from the unit type.
    pub fn training_time(&self) -> u32 {
        self.unit_type.training_time
    }

    /// Weight, from the unit type.
    pub fn weight(&self) -> f64 {
        self.unit_type.weight
    }

    /// Whether the unit type is a special forces unit.
    pub fn special_forces(&self) -> bool {
        self.unit_type.special_forces
    }

    /// Whether the unit can be dropped by paratroopers.
    pub fn can_be_parachuted(&self) -> bool {
        self.unit_type.can_be_parachuted
    }

    /// Value of any derived stat.
    pub fn stat(&self, stat: Stat) -> f64 {
        self.calculator().stat(stat)
    }

    /// How `stat` was derived.
    pub fn explain(&self, stat: Stat) -> StatBreakdown {
        self.calculator().explain(stat)
    }

    /// Suppression.
    pub fn suppression(&self) -> f64 {
        self.stat(Stat::Suppression)
    }

    /// Suppression factor.
    pub fn suppression_factor(&self) -> f64 {
        self.stat(Stat::SuppressionFactor)
    }

    /// Organisation: unit type `org` plus the country's `max_organisation`.
    pub fn org(&self) -> f64 {
        self.stat(Stat::Org)
    }

    /// Recovery rate: unit type `recovery_rate` plus the country's
    /// `default_morale`.
    pub fn recovery_rate(&self) -> f64 {
        self.stat(Stat::RecoveryRate)
    }

    /// Reliability factor.
    pub fn reliability_factor(&self) -> f64 {
        self.stat(Stat::ReliabilityFactor)
    }

    /// Casualty trickleback.
    pub fn casualty_trickleback(&self) -> f64 {
        self.stat(Stat::CasualtyTrickleback)
    }

    /// Experience loss factor.
    pub fn experience_loss_factor(&self) -> f64 {
        self.stat(Stat::ExperienceLossFactor)
    }

    /// Initiative.
    pub fn initiative(&self) -> f64 {
        self.stat(Stat::Initiative)
    }

    /// Equipment capture factor.
    pub fn equipment_capture_factor(&self) -> f64 {
        self.stat(Stat::EquipmentCaptureFactor)
    }

    /// Supply consumption factor.
    pub fn supply_consumption_factor(&self) -> f64 {
        self.stat(Stat::SupplyConsumptionFactor)
    }

    /// Combat width.
    pub fn combat_width(&self) -> f64 {
        self.stat(Stat::CombatWidth)
    }

    /// Recon.
    pub fn recon(&self) -> f64 {
        self.stat(Stat::Recon)
    }

    /// Entrenchment.
    pub fn entrenchment(&self) -> f64 {
        self.stat(Stat::Entrenchment)
    }

    /// Soft attack: equipment sum scaled by unit type and country modifiers.
    pub fn soft_attack(&self) -> f64 {
        self.stat(Stat::SoftAttack)
    }

    /// Hard attack.
    pub fn hard_attack(&self) -> f64 {
        self.stat(Stat::HardAttack)
    }

    /// Air attack.
    pub fn air_attack(&self) -> f64 {
        self.stat(Stat::AirAttack)
    }

    /// Defense.
    pub fn defense(&self) -> f64 {
        self.stat(Stat::Defense)
    }

    /// Breakthrough.
    pub fn breakthrough(&self) -> f64 {
        self.stat(Stat::Breakthrough)
    }

    /// Piercing, from the equipment `ap_attack` field.
    pub fn piercing(&self) -> f64 {
        self.stat(Stat::Piercing)
    }

    /// Armor, from the equipment `armor_value` field.
    pub fn armor(&self) -> f64 {
        self.stat(Stat::Armor)
    }

    /// Hardness.
    pub fn hardness(&self) -> f64 {
        self.stat(Stat::Hardness)
    }

    /// Fastest declared equipment speed scaled by the unit type's
    /// `maximum_speed`. Country bonuses do not apply.
    pub fn speed(&self) -> f64 {
        self.stat(Stat::Speed)
    }

    /// Production cost of the whole unit, weighted by equipment counts.
    pub fn ic_cost(&self) -> f64 {
        self.calculator().ic_cost()
    }

    /// Unit-type terrain table with the country's terrain bonuses merged on
    /// top. Returns a fresh table on every call.
    pub fn terrain_bonuses(&self) -> TerrainTable {
        merge_terrain_bonuses(
            &self.unit_type.terrain_bonuses,
            self.bonuses.terrain_bonuses(),
        )
    }

    /// Snapshot of every derived value.
    pub fn stat_sheet(&self) -> StatSheet {
        let calculator = self.calculator();
        StatSheet {
            unit_type: self.unit_type.key.clone(),
            country: self.country.tag().to_string(),
            stats: Stat::ALL
                .into_iter()
                .map(|stat| (stat, calculator.stat(stat)))
                .collect(),
            ic_cost: calculator.ic_cost(),
            terrain_bonuses: self.terrain_bonuses(),
            substituted_equipment: self.equipment.substituted().clone(),
        }
    }
}
