//! Property tests over randomly generated equipment, templates and bonuses.

use divstat::*;
use proptest::prelude::*;
use std::collections::BTreeMap;
use std::sync::Arc;

const STATS: [EquipmentStat; 9] = [
    EquipmentStat::SoftAttack,
    EquipmentStat::HardAttack,
    EquipmentStat::AirAttack,
    EquipmentStat::Defense,
    EquipmentStat::Breakthrough,
    EquipmentStat::ApAttack,
    EquipmentStat::ArmorValue,
    EquipmentStat::Hardness,
    EquipmentStat::MaximumSpeed,
];

fn record_strategy() -> impl Strategy<Value = EquipmentRecord> {
    (
        proptest::collection::vec(proptest::option::of(0.0f64..50.0), STATS.len()),
        0.0f64..20.0,
    )
        .prop_map(|(values, cost)| {
            let mut record = EquipmentRecord::new("").with_build_cost(cost);
            for (stat, value) in STATS.iter().zip(values) {
                if let Some(value) = value {
                    record = record.with(*stat, value);
                }
            }
            record
        })
}

/// A scenario: records, which of them the country owns, what the unit
/// needs, and the country's bonuses.
#[derive(Debug, Clone)]
struct Scenario {
    records: Vec<EquipmentRecord>,
    owned: Vec<bool>,
    counts: Vec<u32>,
    unit_stats: Vec<(String, f64)>,
    bonuses: Vec<(String, f64)>,
}

fn key_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("org".to_string()),
        Just("max_organisation".to_string()),
        Just("default_morale".to_string()),
        Just("soft_attack".to_string()),
        Just("defense".to_string()),
        Just("ap_attack".to_string()),
        Just("armor_value".to_string()),
        Just("maximum_speed".to_string()),
        Just("speed".to_string()),
        Just("recon".to_string()),
    ]
}

fn scenario_strategy() -> impl Strategy<Value = Scenario> {
    (1usize..6).prop_flat_map(|n| {
        (
            proptest::collection::vec(record_strategy(), n),
            proptest::collection::vec(any::<bool>(), n),
            proptest::collection::vec(1u32..500, n),
            proptest::collection::vec((key_strategy(), -0.5f64..0.5), 0..6),
            proptest::collection::vec((key_strategy(), -0.5f64..0.5), 0..6),
        )
            .prop_map(|(records, owned, counts, unit_stats, bonuses)| Scenario {
                records,
                owned,
                counts,
                unit_stats,
                bonuses,
            })
    })
}

struct Built {
    unit: Unit,
    country_ids: Vec<EquipmentId>,
    fallback_ids: Vec<EquipmentId>,
}

fn build(scenario: &Scenario) -> Built {
    let mut db = EquipmentDb::new();
    let mut catalog = EquipmentCatalog::new();
    let mut country_ids = Vec::new();
    let mut fallback_ids = Vec::new();
    let mut unit_type = UnitType::new("infantry", "Infantry", "infantry");

    for (i, record) in scenario.records.iter().enumerate() {
        let requirement = format!("equipment_{}", i);
        let mut record = record.clone();
        if scenario.owned[i] {
            record.name = format!("equipment_{}_national", i);
            let id = db.insert(record);
            catalog.insert(requirement.clone(), id);
            country_ids.push(id);
        } else {
            record.name = format!("equipment_{}_generic", i);
            fallback_ids.push(db.insert_fallback(requirement.clone(), record));
        }
        unit_type = unit_type.with_equipment(requirement, scenario.counts[i]);
    }
    for (key, value) in &scenario.unit_stats {
        unit_type = unit_type.with_stat(key.as_str(), *value);
    }

    let bonuses: BonusTable = scenario
        .bonuses
        .iter()
        .fold(BonusTable::new(), |table, (k, v)| table.with(k.as_str(), *v));
    let country = Country::new("TST", Arc::new(db))
        .with_catalog(catalog)
        .with_bonuses(move |_: &str| bonuses.clone());

    let unit = Unit::new(Arc::new(unit_type), Arc::new(country)).unwrap();
    Built {
        unit,
        country_ids,
        fallback_ids,
    }
}

proptest! {
    #[test]
    fn prop_accessors_are_idempotent(scenario in scenario_strategy()) {
        let built = build(&scenario);
        let first = built.unit.stat_sheet();
        let second = built.unit.stat_sheet();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_substitutions_match_fallback_use(scenario in scenario_strategy()) {
        let built = build(&scenario);
        let unit = &built.unit;

        let expected: Vec<String> = scenario
            .owned
            .iter()
            .enumerate()
            .filter(|(_, owned)| !**owned)
            .map(|(i, _)| format!("equipment_{}_generic", i))
            .collect();
        let actual: Vec<String> = unit.substituted_equipment().iter().cloned().collect();
        let mut expected_sorted = expected;
        expected_sorted.sort();
        prop_assert_eq!(actual, expected_sorted);
        prop_assert_eq!(unit.is_authentic(), scenario.owned.iter().all(|o| *o));

        let ids: Vec<EquipmentId> = unit.equipment().map(|(id, _, _)| id).collect();
        for id in built.country_ids.iter().chain(&built.fallback_ids) {
            prop_assert!(ids.contains(id));
        }
    }

    #[test]
    fn prop_ic_cost_is_count_weighted(scenario in scenario_strategy()) {
        let built = build(&scenario);
        let expected: f64 = scenario
            .records
            .iter()
            .zip(&scenario.counts)
            .map(|(r, c)| r.build_cost_ic * f64::from(*c))
            .sum();
        prop_assert!((built.unit.ic_cost() - expected).abs() < 1e-6);
    }

    #[test]
    fn prop_explain_agrees_with_accessor(scenario in scenario_strategy()) {
        let built = build(&scenario);
        for stat in Stat::ALL {
            prop_assert_eq!(built.unit.explain(stat).value, built.unit.stat(stat));
        }
    }

    #[test]
    fn prop_speed_ignores_country_bonus(scenario in scenario_strategy(), extra in -5.0f64..5.0) {
        let built = build(&scenario);
        let mut boosted = scenario.clone();
        boosted.bonuses.push(("maximum_speed".to_string(), extra));
        boosted.bonuses.push(("speed".to_string(), extra));
        let boosted = build(&boosted);

        prop_assert_eq!(built.unit.speed(), boosted.unit.speed());
    }

    #[test]
    fn prop_org_depends_only_on_max_organisation(scenario in scenario_strategy(), extra in -5.0f64..5.0) {
        let built = build(&scenario);
        let mut decoy = scenario.clone();
        decoy.bonuses.retain(|(k, _)| k != "org");
        decoy.bonuses.push(("org".to_string(), extra));
        let decoy = build(&decoy);

        prop_assert_eq!(built.unit.org(), decoy.unit.org());
    }
}

proptest! {
    #[test]
    fn prop_terrain_merge_overlay_wins(
        base in proptest::collection::btree_map("[a-c]", proptest::collection::btree_map("[x-z]", -1.0f64..1.0, 0..3), 0..3),
        overlay in proptest::collection::btree_map("[a-c]", proptest::collection::btree_map("[x-z]", -1.0f64..1.0, 0..3), 0..3),
    ) {
        let to_table = |m: &BTreeMap<String, BTreeMap<String, f64>>| {
            m.iter().fold(TerrainTable::new(), |table, (terrain, stats)| {
                let mut table = table;
                table.insert(terrain.clone(), TerrainTable::new());
                stats.iter().fold(table, |t, (stat, v)| t.with_modifier(terrain, stat, *v))
            })
        };
        let base_table = to_table(&base);
        let overlay_table = to_table(&overlay);
        let merged = base_table.merged(&overlay_table);

        for (terrain, stats) in &overlay {
            for (stat, value) in stats {
                prop_assert_eq!(merged.modifier(terrain, stat), *value);
            }
        }
        for (terrain, stats) in &base {
            for (stat, value) in stats {
                let overridden = overlay.get(terrain).map_or(false, |o| o.contains_key(stat));
                if !overridden {
                    prop_assert_eq!(merged.modifier(terrain, stat), *value);
                }
            }
        }
        prop_assert_eq!(merge_terrain_bonuses(&base_table, None), base_table);
    }
}
