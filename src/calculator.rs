//! Stat calculator module.
//!
//! [`StatCalculator`] evaluates [`StatRule`]s over the state a unit captured
//! at construction: its unit type, its resolved equipment and its country
//! bonus table. It is a borrowed view with no state of its own, so creating
//! one per accessor call costs nothing.

use crate::bonus::BonusTable;
use crate::breakdown::StatBreakdown;
use crate::equipment::{EquipmentDb, EquipmentRecord, EquipmentStat};
use crate::resolver::ResolvedEquipment;
use crate::stat::{Stat, StatRule};
use crate::unit_type::UnitType;

/// Evaluates combination rules for one unit.
#[derive(Debug, Clone, Copy)]
pub struct StatCalculator<'a> {
    unit_type: &'a UnitType,
    equipment: &'a ResolvedEquipment,
    db: &'a EquipmentDb,
    bonuses: &'a BonusTable,
}

impl<'a> StatCalculator<'a> {
    /// Create a calculator over captured unit inputs.
    pub fn new(
        unit_type: &'a UnitType,
        equipment: &'a ResolvedEquipment,
        db: &'a EquipmentDb,
        bonuses: &'a BonusTable,
    ) -> Self {
        Self {
            unit_type,
            equipment,
            db,
            bonuses,
        }
    }

    /// Distinct equipment records of the unit, in handle order.
    fn records(&self) -> impl Iterator<Item = &'a EquipmentRecord> + 'a {
        let db = self.db;
        let equipment = self.equipment;
        equipment.ids().filter_map(move |id| db.get(id))
    }

    /// Sum of one equipment field over distinct records; absent fields add
    /// nothing.
    pub fn equipment_sum(&self, stat: EquipmentStat) -> f64 {
        self.records().fold(0.0, |acc, r| acc + r.stat(stat).unwrap_or(0.0))
    }

    /// Largest declared non-zero value of one equipment field, if any.
    pub fn equipment_max(&self, stat: EquipmentStat) -> Option<f64> {
        self.records()
            .filter_map(|r| r.stat(stat))
            .filter(|v| *v != 0.0 && !v.is_nan())
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v))))
    }

    /// `unit_type[unit_key] + bonus[bonus_key]`
    pub fn unit_type_additive(&self, unit_key: &str, bonus_key: &str) -> f64 {
        self.unit_type.stat(unit_key) + self.bonuses.get(bonus_key)
    }

    /// `sum(equipment) + bonus[bonus_key]`
    pub fn equipment_additive(&self, equipment: EquipmentStat, bonus_key: &str) -> f64 {
        self.equipment_sum(equipment) + self.bonuses.get(bonus_key)
    }

    /// `sum(equipment) * (1 + unit_type[unit_key] + bonus[bonus_key])`
    pub fn equipment_multiplicative(
        &self,
        equipment: EquipmentStat,
        unit_key: &str,
        bonus_key: &str,
    ) -> f64 {
        self.equipment_sum(equipment) * self.multiplier(unit_key, Some(bonus_key))
    }

    /// `max(equipment, or default) * (1 + unit_type[unit_key])`
    pub fn equipment_max_scaled(
        &self,
        equipment: EquipmentStat,
        unit_key: &str,
        default: f64,
    ) -> f64 {
        self.equipment_max(equipment).unwrap_or(default) * self.multiplier(unit_key, None)
    }

    fn multiplier(&self, unit_key: &str, bonus_key: Option<&str>) -> f64 {
        let bonus = bonus_key.map_or(0.0, |k| self.bonuses.get(k));
        1.0 + self.unit_type.stat(unit_key) + bonus
    }

    /// Evaluate any rule.
    pub fn evaluate(&self, rule: StatRule) -> f64 {
        match rule {
            StatRule::UnitTypeAdditive {
                unit_key,
                bonus_key,
            } => self.unit_type_additive(unit_key, bonus_key),
            StatRule::EquipmentAdditive {
                equipment,
                bonus_key,
            } => self.equipment_additive(equipment, bonus_key),
            StatRule::EquipmentMultiplicative {
                equipment,
                unit_key,
                bonus_key,
            } => self.equipment_multiplicative(equipment, unit_key, bonus_key),
            StatRule::EquipmentMax {
                equipment,
                unit_key,
                default,
            } => self.equipment_max_scaled(equipment, unit_key, default),
        }
    }

    /// Value of `stat` under its [`StatRule`](crate::StatRule).
    pub fn stat(&self, stat: Stat) -> f64 {
        self.evaluate(stat.rule())
    }

    /// Production cost: `build_cost_ic * count` summed over every record.
    ///
    /// Unlike the combat stats this is weighted by count.
    pub fn ic_cost(&self) -> f64 {
        self.equipment
            .iter()
            .filter_map(|(id, count)| self.db.get(id).map(|r| r.build_cost_ic * f64::from(count)))
            .fold(0.0, |acc, cost| acc + cost)
    }

    /// Explain how `stat` is computed.
    pub fn explain(&self, stat: Stat) -> StatBreakdown {
        let rule = stat.rule();
        let mut breakdown = StatBreakdown::new(stat, self.evaluate(rule));

        match rule {
            StatRule::UnitTypeAdditive {
                unit_key,
                bonus_key,
            } => {
                let base = self.unit_type.stat(unit_key);
                breakdown.add_source(format!("{} {}", self.unit_type.key, unit_key), base);
                breakdown.add_modifier(
                    format!("+ bonus {} ({})", bonus_key, self.bonuses.get(bonus_key)),
                    self.unit_type_additive(unit_key, bonus_key),
                );
            }
            StatRule::EquipmentAdditive {
                equipment,
                bonus_key,
            } => {
                self.add_equipment_sources(&mut breakdown, equipment);
                breakdown.add_modifier(
                    format!("+ bonus {} ({})", bonus_key, self.bonuses.get(bonus_key)),
                    self.equipment_additive(equipment, bonus_key),
                );
            }
            StatRule::EquipmentMultiplicative {
                equipment,
                unit_key,
                bonus_key,
            } => {
                self.add_equipment_sources(&mut breakdown, equipment);
                breakdown.add_modifier(
                    format!(
                        "x (1 + {} {} + bonus {} {})",
                        unit_key,
                        self.unit_type.stat(unit_key),
                        bonus_key,
                        self.bonuses.get(bonus_key)
                    ),
                    self.equipment_multiplicative(equipment, unit_key, bonus_key),
                );
            }
            StatRule::EquipmentMax {
                equipment,
                unit_key,
                default,
            } => {
                match self.equipment_max(equipment) {
                    Some(fastest) => {
                        for record in self.records() {
                            if record.stat(equipment) == Some(fastest) {
                                breakdown.add_source(record.name.clone(), fastest);
                                break;
                            }
                        }
                    }
                    None => breakdown.add_source("default", default),
                }
                breakdown.add_modifier(
                    format!("x (1 + {} {})", unit_key, self.unit_type.stat(unit_key)),
                    self.equipment_max_scaled(equipment, unit_key, default),
                );
            }
        }

        breakdown
    }

    fn add_equipment_sources(&self, breakdown: &mut StatBreakdown, equipment: EquipmentStat) {
        for record in self.records() {
            if let Some(value) = record.stat(equipment) {
                breakdown.add_source(record.name.clone(), value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equipment::EquipmentCatalog;
    use crate::resolver::EquipmentResolver;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    struct Fixture {
        db: EquipmentDb,
        unit_type: UnitType,
        equipment: ResolvedEquipment,
    }

    fn fixture(unit_type: UnitType, records: Vec<(EquipmentRecord, u32)>) -> Fixture {
        let mut db = EquipmentDb::new();
        let mut catalog = EquipmentCatalog::new();
        let mut unit_type = unit_type;
        for (record, count) in records {
            let name = record.name.clone();
            let id = db.insert(record);
            catalog.insert(name.clone(), id);
            unit_type.equipment.insert(name, count);
        }
        let equipment = EquipmentResolver::new(&catalog, db.fallback(), &db)
            .resolve(&unit_type.equipment)
            .unwrap();
        Fixture {
            db,
            unit_type,
            equipment,
        }
    }

    fn mixed_infantry() -> Fixture {
        fixture(
            UnitType::new("infantry", "Infantry", "infantry")
                .with_stat("soft_attack", 0.1)
                .with_stat("org", 60.0),
            vec![
                (
                    EquipmentRecord::new("infantry_equipment_1")
                        .with(EquipmentStat::SoftAttack, 10.0)
                        .with(EquipmentStat::MaximumSpeed, 4.0)
                        .with_build_cost(5.0),
                    3,
                ),
                (
                    EquipmentRecord::new("motorized_equipment_1")
                        .with(EquipmentStat::SoftAttack, 6.0)
                        .with(EquipmentStat::MaximumSpeed, 12.0)
                        .with_build_cost(2.0),
                    1,
                ),
            ],
        )
    }

    #[test]
    fn test_multiplicative_rule() {
        let f = mixed_infantry();
        let bonuses = BonusTable::new().with("soft_attack", 0.05);
        let calc = StatCalculator::new(&f.unit_type, &f.equipment, &f.db, &bonuses);

        assert_close(calc.stat(Stat::SoftAttack), 16.0 * 1.15);
        assert_close(calc.stat(Stat::SoftAttack), 18.4);
    }

    #[test]
    fn test_equipment_sum_ignores_count() {
        let f = mixed_infantry();
        let bonuses = BonusTable::new();
        let calc = StatCalculator::new(&f.unit_type, &f.equipment, &f.db, &bonuses);

        assert_eq!(calc.equipment_sum(EquipmentStat::SoftAttack), 16.0);
    }

    #[test]
    fn test_equipment_additive_rule() {
        let f = mixed_infantry();
        let bonuses = BonusTable::new().with("soft_attack", 2.0);
        let calc = StatCalculator::new(&f.unit_type, &f.equipment, &f.db, &bonuses);

        let rule = StatRule::EquipmentAdditive {
            equipment: EquipmentStat::SoftAttack,
            bonus_key: "soft_attack",
        };
        assert_eq!(calc.evaluate(rule), 18.0);
    }

    #[test]
    fn test_ic_cost_is_count_weighted() {
        let f = mixed_infantry();
        let bonuses = BonusTable::new();
        let calc = StatCalculator::new(&f.unit_type, &f.equipment, &f.db, &bonuses);

        assert_eq!(calc.ic_cost(), 17.0);
    }

    #[test]
    fn test_speed_takes_max_and_ignores_bonus() {
        let f = mixed_infantry();
        let bonuses = BonusTable::new()
            .with("maximum_speed", 5.0)
            .with("speed", 5.0);
        let calc = StatCalculator::new(&f.unit_type, &f.equipment, &f.db, &bonuses);

        assert_eq!(calc.stat(Stat::Speed), 12.0);
    }

    #[test]
    fn test_speed_default_without_declared_speed() {
        let f = fixture(
            UnitType::new("infantry", "Infantry", "infantry").with_stat("maximum_speed", 0.5),
            vec![(
                EquipmentRecord::new("infantry_equipment_1")
                    .with(EquipmentStat::MaximumSpeed, 0.0),
                100,
            )],
        );
        let bonuses = BonusTable::new();
        let calc = StatCalculator::new(&f.unit_type, &f.equipment, &f.db, &bonuses);

        assert_eq!(calc.stat(Stat::Speed), 6.0);
    }

    #[test]
    fn test_org_reads_max_organisation() {
        let f = mixed_infantry();
        let decoy = BonusTable::new().with("org", 99.0);
        let real = BonusTable::new().with("max_organisation", 5.0);

        let calc = StatCalculator::new(&f.unit_type, &f.equipment, &f.db, &decoy);
        assert_eq!(calc.stat(Stat::Org), 60.0);

        let calc = StatCalculator::new(&f.unit_type, &f.equipment, &f.db, &real);
        assert_eq!(calc.stat(Stat::Org), 65.0);
    }

    #[test]
    fn test_missing_everything_is_zero() {
        let f = mixed_infantry();
        let bonuses = BonusTable::new();
        let calc = StatCalculator::new(&f.unit_type, &f.equipment, &f.db, &bonuses);

        assert_eq!(calc.stat(Stat::Recon), 0.0);
        assert_eq!(calc.stat(Stat::HardAttack), 0.0);
        assert_eq!(calc.stat(Stat::Armor), 0.0);
    }

    #[test]
    fn test_explain_matches_value() {
        let f = mixed_infantry();
        let bonuses = BonusTable::new()
            .with("soft_attack", 0.05)
            .with("max_organisation", 5.0);
        let calc = StatCalculator::new(&f.unit_type, &f.equipment, &f.db, &bonuses);

        for stat in Stat::ALL {
            assert_eq!(calc.explain(stat).value, calc.stat(stat), "{}", stat);
        }
    }

    #[test]
    fn test_explain_lists_equipment_sources() {
        let f = mixed_infantry();
        let bonuses = BonusTable::new();
        let calc = StatCalculator::new(&f.unit_type, &f.equipment, &f.db, &bonuses);

        let breakdown = calc.explain(Stat::SoftAttack);
        assert_eq!(breakdown.sources.len(), 2);
        assert_eq!(breakdown.source_total(), 16.0);
        assert_eq!(breakdown.modifiers.len(), 1);

        let speed = calc.explain(Stat::Speed);
        assert_eq!(speed.sources, vec![("motorized_equipment_1".to_string(), 12.0)]);
    }
}
