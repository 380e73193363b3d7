//! Equipment resolver module.
//!
//! Provides [`EquipmentResolver`], which turns the equipment requirements of
//! a unit type into concrete records for one country. The country's own
//! catalog is authoritative; the global fallback catalog fills the gaps, and
//! every fallback substitution is recorded so the UI can flag equipment that
//! is not authentic to the country.

use crate::equipment::{EquipmentCatalog, EquipmentDb, EquipmentId, EquipmentRecord};
use crate::error::UnitError;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

/// Outcome of equipment resolution: a multiset of records plus the names of
/// the records that came from the fallback catalog.
///
/// Keyed by [`EquipmentId`], so requirements that resolve to the same record
/// share one entry whose count is the sum of their counts, capped at
/// `u32::MAX`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedEquipment {
    counts: BTreeMap<EquipmentId, u32>,
    substituted: BTreeSet<String>,
}

impl ResolvedEquipment {
    /// `(record, count)` pairs in handle order.
    pub fn iter(&self) -> impl Iterator<Item = (EquipmentId, u32)> + '_ {
        self.counts.iter().map(|(id, count)| (*id, *count))
    }

    /// Distinct record handles in handle order.
    pub fn ids(&self) -> impl Iterator<Item = EquipmentId> + '_ {
        self.counts.keys().copied()
    }

    /// Required count of `id`, `0` if the unit does not use it.
    pub fn count(&self, id: EquipmentId) -> u32 {
        self.counts.get(&id).copied().unwrap_or(0)
    }

    /// Names of fallback records that stood in for missing country variants.
    pub fn substituted(&self) -> &BTreeSet<String> {
        &self.substituted
    }

    /// Number of distinct records.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether no equipment was resolved.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    fn add(&mut self, id: EquipmentId, count: u32) {
        let entry = self.counts.entry(id).or_insert(0);
        *entry = entry.saturating_add(count);
    }
}

/// Where a requirement was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The country's own catalog.
    Country(EquipmentId),
    /// The global fallback catalog.
    Fallback(EquipmentId),
}

impl Resolution {
    /// The resolved handle, whichever catalog supplied it.
    pub fn id(self) -> EquipmentId {
        match self {
            Resolution::Country(id) | Resolution::Fallback(id) => id,
        }
    }
}

/// Resolves equipment requirement names against a country catalog, falling
/// back to a global catalog.
///
/// Both catalogs and the database are passed in explicitly; the resolver
/// holds no state of its own.
///
/// # Examples
///
/// ```rust
/// use divstat::{EquipmentCatalog, EquipmentDb, EquipmentRecord, EquipmentResolver};
/// use std::collections::BTreeMap;
///
/// let mut db = EquipmentDb::new();
/// let rifle = db.insert(EquipmentRecord::new("infantry_equipment_2"));
/// db.insert_fallback("support_equipment", EquipmentRecord::new("support_equipment_1"));
///
/// let mut catalog = EquipmentCatalog::new();
/// catalog.insert("infantry_equipment", rifle);
///
/// let mut requirements = BTreeMap::new();
/// requirements.insert("infantry_equipment".to_string(), 100);
/// requirements.insert("support_equipment".to_string(), 10);
///
/// let resolver = EquipmentResolver::new(&catalog, db.fallback(), &db);
/// let resolved = resolver.resolve(&requirements)?;
///
/// assert_eq!(resolved.count(rifle), 100);
/// assert!(resolved.substituted().contains("support_equipment_1"));
/// # Ok::<(), divstat::UnitError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct EquipmentResolver<'a> {
    catalog: &'a EquipmentCatalog,
    fallback: &'a EquipmentCatalog,
    db: &'a EquipmentDb,
}

impl<'a> EquipmentResolver<'a> {
    /// Create a resolver over a country catalog, a fallback catalog and the database both index into.
    pub fn new(
        catalog: &'a EquipmentCatalog,
        fallback: &'a EquipmentCatalog,
        db: &'a EquipmentDb,
    ) -> Self {
        Self {
            catalog,
            fallback,
            db,
        }
    }

    /// Find the record for one requirement name.
    ///
    /// The country catalog wins over the fallback catalog. A handle that
    /// does not point into the database counts as not found.
    pub fn lookup(&self, requirement: &str) -> Option<(Resolution, &'a EquipmentRecord)> {
        let db = self.db;
        self.catalog
            .get(requirement)
            .and_then(|id| db.get(id).map(|record| (Resolution::Country(id), record)))
            .or_else(|| {
                self.fallback
                    .get(requirement)
                    .and_then(|id| db.get(id).map(|record| (Resolution::Fallback(id), record)))
            })
    }

    /// Resolve every requirement of a unit type.
    ///
    /// Requirements are processed in name order. The first one found in
    /// neither catalog aborts resolution with
    /// [`UnitError::UnresolvedEquipment`].
    pub fn resolve(
        &self,
        requirements: &BTreeMap<String, u32>,
    ) -> Result<ResolvedEquipment, UnitError> {
        let mut resolved = ResolvedEquipment::default();

        for (requirement, &count) in requirements {
            let (resolution, record) = self.lookup(requirement).ok_or_else(|| {
                warn!(requirement = %requirement, "equipment missing from country and fallback catalogs");
                UnitError::UnresolvedEquipment(requirement.clone())
            })?;

            if let Resolution::Fallback(_) = resolution {
                debug!(
                    requirement = %requirement,
                    substitute = %record.name,
                    "using fallback equipment"
                );
                resolved.substituted.insert(record.name.clone());
            }

            resolved.add(resolution.id(), count);
        }

        Ok(resolved)
    }
}
