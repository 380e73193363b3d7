//! Stat breakdowns.
//!
//! A [`StatBreakdown`] explains how a derived stat came to be, for tooltips
//! and debugging: what each input contributed and how each modifier moved
//! the running value.

use crate::stat::Stat;
use serde::{Deserialize, Serialize};

/// A derived stat with the contributions that produced it.
///
/// `value` is always identical to what the matching
/// [`Unit`](crate::Unit) accessor returns.
///
/// # Examples
///
/// ```rust
/// use divstat::{Stat, StatBreakdown};
///
/// let mut breakdown = StatBreakdown::new(Stat::SoftAttack, 18.4);
/// breakdown.add_source("infantry_equipment_1", 10.0);
/// breakdown.add_source("artillery_equipment_1", 6.0);
/// breakdown.add_modifier("x (1 + 0.1 + 0.05)", 18.4);
///
/// assert_eq!(breakdown.source_total(), 16.0);
/// assert_eq!(breakdown.modifiers.len(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatBreakdown {
    pub stat: Stat,

    /// Final value of the stat.
    pub value: f64,

    /// Base contributions, as `(description, value)`.
    ///
    /// One entry per distinct equipment record for equipment-based stats,
    /// a single unit-type entry otherwise.
    pub sources: Vec<(String, f64)>,

    /// Modifier steps in application order, as
    /// `(description, value_after_step)`.
    pub modifiers: Vec<(String, f64)>,
}

impl StatBreakdown {
    /// Start a breakdown for `stat` with its final value.
    pub fn new(stat: Stat, value: f64) -> Self {
        Self {
            stat,
            value,
            sources: Vec::new(),
            modifiers: Vec::new(),
        }
    }

    /// Record an input that was summed into the base value.
    pub fn add_source(&mut self, description: impl Into<String>, value: f64) {
        self.sources.push((description.into(), value));
    }

    /// Record a modifier step and the value after applying it.
    pub fn add_modifier(&mut self, description: impl Into<String>, value: f64) {
        self.modifiers.push((description.into(), value));
    }

    /// Sum of all source contributions.
    pub fn source_total(&self) -> f64 {
        self.sources.iter().map(|(_, v)| *v).sum()
    }
}
