//! Country module.
//!
//! A [`Country`] is the per-nation view a unit is built against: the
//! equipment variants the nation has, the shared equipment database with
//! its fallback catalog, and the bonus rules for each unit category.

use crate::bonus::{BonusProvider, BonusTable, NoBonuses};
use crate::equipment::{EquipmentCatalog, EquipmentDb, EquipmentId};
use crate::resolver::EquipmentResolver;
use std::sync::Arc;

/// A nation's equipment catalog and bonus rules.
///
/// # Examples
///
/// ```rust
/// use divstat::{BonusTable, Country, EquipmentDb, EquipmentRecord};
/// use std::sync::Arc;
///
/// let mut db = EquipmentDb::new();
/// let rifle = db.insert(EquipmentRecord::new("infantry_equipment_1"));
/// let db = Arc::new(db);
///
/// let germany = Country::new("GER", db)
///     .with_equipment("infantry_equipment", rifle)
///     .with_bonuses(|_: &str| BonusTable::new().with("max_organisation", 5.0));
///
/// assert_eq!(germany.equipment_catalog().get("infantry_equipment"), Some(rifle));
/// assert_eq!(germany.unit_bonuses_for("infantry").get("max_organisation"), 5.0);
/// ```
pub struct Country {
    tag: String,
    db: Arc<EquipmentDb>,
    equipment: EquipmentCatalog,
    bonuses: Box<dyn BonusProvider>,
}

impl Country {
    /// Create a country with an empty catalog and no bonuses.
    pub fn new(tag: impl Into<String>, db: Arc<EquipmentDb>) -> Self {
        Self {
            tag: tag.into(),
            db,
            equipment: EquipmentCatalog::new(),
            bonuses: Box::new(NoBonuses),
        }
    }

    /// Make `id` this country's variant for `requirement`, builder style.
    pub fn with_equipment(mut self, requirement: impl Into<String>, id: EquipmentId) -> Self {
        self.equipment.insert(requirement, id);
        self
    }

    /// Replace the whole catalog.
    pub fn with_catalog(mut self, catalog: EquipmentCatalog) -> Self {
        self.equipment = catalog;
        self
    }

    /// Install the provider that supplies this country's bonuses.
    pub fn with_bonuses(mut self, provider: impl BonusProvider + 'static) -> Self {
        self.bonuses = Box::new(provider);
        self
    }

    /// Country tag, such as `"GER"`.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The shared equipment database.
    pub fn db(&self) -> &EquipmentDb {
        &self.db
    }

    /// The country's own requirement-to-record catalog.
    pub fn equipment_catalog(&self) -> &EquipmentCatalog {
        &self.equipment
    }

    /// The global fallback catalog of the shared database.
    pub fn fallback_catalog(&self) -> &EquipmentCatalog {
        self.db.fallback()
    }

    /// Bonus table for a unit category. Absent stats read as zero.
    pub fn unit_bonuses_for(&self, category: &str) -> BonusTable {
        self.bonuses.unit_bonuses_for(category)
    }

    /// Resolver over this country's catalog, the fallback catalog and the
    /// shared database.
    pub fn resolver(&self) -> EquipmentResolver<'_> {
        EquipmentResolver::new(&self.equipment, self.db.fallback(), &self.db)
    }
}

impl std::fmt::Debug for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Country")
            .field("tag", &self.tag)
            .field("equipment", &self.equipment)
            .field("db_records", &self.db.len())
            .field("bonuses", &"<provider>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bonus::MapBonuses;
    use crate::equipment::EquipmentRecord;

    fn db() -> (Arc<EquipmentDb>, EquipmentId) {
        let mut db = EquipmentDb::new();
        let support = db.insert_fallback("support_equipment", EquipmentRecord::new("support_equipment_1"));
        (Arc::new(db), support)
    }

    #[test]
    fn test_defaults() {
        let (db, _) = db();
        let country = Country::new("ITA", db);
        assert_eq!(country.tag(), "ITA");
        assert!(country.equipment_catalog().is_empty());
        assert!(country.unit_bonuses_for("infantry").is_empty());
    }

    #[test]
    fn test_fallback_catalog_is_shared() {
        let (db, support) = db();
        let a = Country::new("FRA", db.clone());
        let b = Country::new("ENG", db);
        assert_eq!(a.fallback_catalog().get("support_equipment"), Some(support));
        assert_eq!(b.fallback_catalog().get("support_equipment"), Some(support));
    }

    #[test]
    fn test_map_bonuses_provider() {
        let (db, _) = db();
        let mut bonuses = MapBonuses::empty();
        bonuses.insert("infantry", BonusTable::new().with("default_morale", 0.1));
        let country = Country::new("JAP", db).with_bonuses(bonuses);

        assert_eq!(country.unit_bonuses_for("infantry").get("default_morale"), 0.1);
        assert_eq!(country.unit_bonuses_for("cavalry").get("default_morale"), 0.0);
    }

    #[test]
    fn test_debug_omits_provider() {
        let (db, _) = db();
        let country = Country::new("SOV", db);
        let debug = format!("{:?}", country);
        assert!(debug.contains("SOV"));
        assert!(debug.contains("<provider>"));
    }
}
