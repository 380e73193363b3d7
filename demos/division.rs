//! Division example: build an infantry template for two countries and
//! compare the results.
//!
//! This example demonstrates:
//! - Sharing one equipment database between countries
//! - Fallback substitution for a country without its own variants
//! - Country bonuses, including the renamed `max_organisation` key
//! - Stat breakdowns and serialized stat sheets

use divstat::*;
use std::sync::Arc;

fn main() -> Result<(), UnitError> {
    let mut db = EquipmentDb::new();

    let rifle = db.insert(
        EquipmentRecord::new("infantry_equipment_2")
            .with(EquipmentStat::SoftAttack, 9.0)
            .with(EquipmentStat::HardAttack, 1.5)
            .with(EquipmentStat::Defense, 26.0)
            .with(EquipmentStat::Breakthrough, 3.0)
            .with(EquipmentStat::ApAttack, 5.0)
            .with(EquipmentStat::MaximumSpeed, 4.0)
            .with_build_cost(0.58),
    );
    let gun = db.insert(
        EquipmentRecord::new("artillery_equipment_2")
            .with(EquipmentStat::SoftAttack, 30.0)
            .with(EquipmentStat::HardAttack, 2.0)
            .with(EquipmentStat::Defense, 10.0)
            .with(EquipmentStat::ApAttack, 5.0)
            .with_build_cost(3.5),
    );
    db.insert_fallback(
        "infantry_equipment",
        EquipmentRecord::new("infantry_equipment_0")
            .with(EquipmentStat::SoftAttack, 3.0)
            .with(EquipmentStat::Defense, 20.0)
            .with(EquipmentStat::ApAttack, 1.0)
            .with_build_cost(0.43),
    );
    db.insert_fallback(
        "artillery_equipment",
        EquipmentRecord::new("artillery_equipment_0")
            .with(EquipmentStat::SoftAttack, 25.0)
            .with(EquipmentStat::Defense, 10.0)
            .with_build_cost(3.5),
    );
    let db = Arc::new(db);

    let mut doctrine = MapBonuses::empty();
    doctrine.insert(
        "infantry",
        BonusTable::new()
            .with("max_organisation", 5.0)
            .with("soft_attack", 0.05)
            .with_terrain_bonuses(TerrainTable::new().with_modifier("forest", "defense", 0.1)),
    );

    let major = Arc::new(
        Country::new("GER", db.clone())
            .with_equipment("infantry_equipment", rifle)
            .with_equipment("artillery_equipment", gun)
            .with_bonuses(doctrine),
    );
    let minor = Arc::new(Country::new("LUX", db));

    let infantry = Arc::new(
        UnitType::new("infantry", "Infantry", "infantry")
            .with_stat("org", 60.0)
            .with_stat("recovery_rate", 0.3)
            .with_stat("combat_width", 2.0)
            .with_equipment("infantry_equipment", 100)
            .with_equipment("artillery_equipment", 12)
            .with_terrain_bonuses(TerrainTable::new().with_modifier("forest", "attack", -0.1)),
    );

    for country in [major, minor] {
        let unit = Unit::new(infantry.clone(), country)?;

        println!("=== {} {} ===", unit.country().tag(), unit.name());
        println!("Organisation: {:.1}", unit.org());
        println!("Soft attack:  {:.2}", unit.soft_attack());
        println!("Defense:      {:.2}", unit.defense());
        println!("Piercing:     {:.2}", unit.piercing());
        println!("Speed:        {:.1}", unit.speed());
        println!("IC cost:      {:.2}", unit.ic_cost());

        if !unit.is_authentic() {
            println!("Substituted:  {:?}", unit.substituted_equipment());
        }

        let breakdown = unit.explain(Stat::SoftAttack);
        println!("\nSoft attack breakdown:");
        for (desc, value) in &breakdown.sources {
            println!("  {}: {:.2}", desc, value);
        }
        for (desc, value) in &breakdown.modifiers {
            println!("  {} => {:.2}", desc, value);
        }

        match serde_json::to_string_pretty(&unit.stat_sheet()) {
            Ok(json) => println!("\nStat sheet:\n{}\n", json),
            Err(err) => println!("\nStat sheet unavailable: {}\n", err),
        }
    }

    Ok(())
}
