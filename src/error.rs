//! Error types for unit construction.
//!
//! Once a [`Unit`](crate::Unit) exists every accessor is total, so the only
//! failure mode lives in equipment resolution and is represented by the
//! `UnitError` enum.

use thiserror::Error;

/// Errors that can occur while building a unit.
///
/// # Examples
///
/// ```rust
/// use divstat::UnitError;
///
/// let err = UnitError::UnresolvedEquipment("infantry_equipment".into());
/// assert_eq!(err.to_string(), "Unresolved equipment: infantry_equipment");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UnitError {
    /// An equipment requirement was found in neither the country catalog
    /// nor the fallback catalog.
    ///
    /// Carries the requirement name as written in the unit type. This is a
    /// data-integrity error: retrying without fixing the data fails again.
    #[error("Unresolved equipment: {0}")]
    UnresolvedEquipment(String),
}

impl UnitError {
    /// The equipment requirement that could not be resolved.
    pub fn requirement(&self) -> &str {
        match self {
            UnitError::UnresolvedEquipment(name) => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = UnitError::UnresolvedEquipment("motorized_equipment".into());
        assert!(err.to_string().contains("motorized_equipment"));
    }

    #[test]
    fn test_error_requirement() {
        let err = UnitError::UnresolvedEquipment("support_equipment".into());
        assert_eq!(err.requirement(), "support_equipment");
    }
}
