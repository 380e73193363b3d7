//! Stat key module.
//!
//! Provides `StatKey`, the interned name of a numeric field in game data
//! (`"soft_attack"`, `"max_organisation"`, ...), and `StatMap`, a keyed
//! collection of modifiers where every absent key reads as zero.

use serde::de::{Error as DeError, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Interned name of a numeric stat field.
///
/// Uses `Arc<str>` so that cloning keys between tables is cheap. Borrows as
/// `str`, so maps keyed by `StatKey` can be queried with plain string slices.
///
/// # Examples
///
/// ```rust
/// use divstat::StatKey;
///
/// let org = StatKey::new("max_organisation");
/// let org2: StatKey = "max_organisation".into();
///
/// assert_eq!(org, org2);
/// assert_eq!(org.as_str(), "max_organisation");
/// ```
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct StatKey(Arc<str>);

impl Serialize for StatKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.as_ref().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for StatKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(StatKey::from(s))
    }
}

impl StatKey {
    /// Create a new `StatKey` from a string slice.
    pub fn new(s: &str) -> Self {
        Self(Arc::from(s))
    }

    /// Get the string representation of this key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for StatKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StatKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for StatKey {
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

impl std::fmt::Display for StatKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A keyed set of numeric modifiers.
///
/// Lookups never fail: a key that is not present contributes `0.0`.
/// Iteration is in key order, so anything derived from a `StatMap` is
/// deterministic.
///
/// # Examples
///
/// ```rust
/// use divstat::StatMap;
///
/// let mut map = StatMap::new();
/// map.insert("recon", 1.0);
///
/// assert_eq!(map.get("recon"), 1.0);
/// assert_eq!(map.get("initiative"), 0.0);
/// ```
///
/// Deserializing keeps numeric entries and skips everything else, so a map
/// flattened into a game-data record ignores the record's text, list and
/// table fields:
///
/// ```rust
/// use divstat::StatMap;
///
/// let map: StatMap =
///     serde_json::from_str(r#"{"org": 60, "sprite": "infantry", "categories": ["front_line"]}"#)?;
///
/// assert_eq!(map.get("org"), 60.0);
/// assert_eq!(map.len(), 1);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StatMap {
    values: BTreeMap<StatKey, f64>,
}

impl StatMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value.
    pub fn insert(&mut self, key: impl Into<StatKey>, value: f64) {
        self.values.insert(key.into(), value);
    }

    /// Value for `key`, or `0.0` when absent.
    pub fn get(&self, key: &str) -> f64 {
        self.values.get(key).copied().unwrap_or(0.0)
    }

    /// Whether `key` has an explicit value.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Number of explicit entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the map has no explicit entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&StatKey, f64)> {
        self.values.iter().map(|(k, v)| (k, *v))
    }
}

impl<'de> Deserialize<'de> for StatMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(StatMapVisitor)
    }
}

struct StatMapVisitor;

impl<'de> Visitor<'de> for StatMapVisitor {
    type Value = StatMap;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of stat names to values")
    }

    fn visit_map<A>(self, mut access: A) -> Result<StatMap, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut values = BTreeMap::new();
        while let Some((key, value)) = access.next_entry::<StatKey, NumericField>()? {
            if let Some(value) = value.0 {
                values.insert(key, value);
            }
        }
        Ok(StatMap { values })
    }
}

/// A map value that is kept when numeric and discarded otherwise.
struct NumericField(Option<f64>);

impl<'de> Deserialize<'de> for NumericField {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(NumericFieldVisitor)
    }
}

struct NumericFieldVisitor;

impl<'de> Visitor<'de> for NumericFieldVisitor {
    type Value = NumericField;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any value")
    }

    fn visit_f64<E: DeError>(self, v: f64) -> Result<NumericField, E> {
        Ok(NumericField(Some(v)))
    }

    fn visit_i64<E: DeError>(self, v: i64) -> Result<NumericField, E> {
        Ok(NumericField(Some(v as f64)))
    }

    fn visit_u64<E: DeError>(self, v: u64) -> Result<NumericField, E> {
        Ok(NumericField(Some(v as f64)))
    }

    fn visit_bool<E: DeError>(self, _: bool) -> Result<NumericField, E> {
        Ok(NumericField(None))
    }

    fn visit_str<E: DeError>(self, _: &str) -> Result<NumericField, E> {
        Ok(NumericField(None))
    }

    fn visit_bytes<E: DeError>(self, _: &[u8]) -> Result<NumericField, E> {
        Ok(NumericField(None))
    }

    fn visit_unit<E: DeError>(self) -> Result<NumericField, E> {
        Ok(NumericField(None))
    }

    fn visit_none<E: DeError>(self) -> Result<NumericField, E> {
        Ok(NumericField(None))
    }

    fn visit_some<D>(self, deserializer: D) -> Result<NumericField, D::Error>
    where
        D: Deserializer<'de>,
    {
        NumericField::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<NumericField, A::Error>
    where
        A: SeqAccess<'de>,
    {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(NumericField(None))
    }

    fn visit_map<A>(self, mut map: A) -> Result<NumericField, A::Error>
    where
        A: MapAccess<'de>,
    {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(NumericField(None))
    }
}

impl<K: Into<StatKey>> FromIterator<(K, f64)> for StatMap {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_key_creation() {
        let a = StatKey::new("defense");
        let b = StatKey::from(String::from("defense"));
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "defense");
    }

    #[test]
    fn test_stat_key_ordering() {
        assert!(StatKey::new("armor_value") < StatKey::new("breakthrough"));
    }

    #[test]
    fn test_stat_map_absent_is_zero() {
        let map: StatMap = [("soft_attack", 0.1), ("hard_attack", -0.05)]
            .into_iter()
            .collect();
        assert_eq!(map.get("soft_attack"), 0.1);
        assert_eq!(map.get("hard_attack"), -0.05);
        assert_eq!(map.get("air_attack"), 0.0);
        assert!(!map.contains("air_attack"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_stat_map_insert_replaces() {
        let mut map = StatMap::new();
        map.insert("org", 10.0);
        map.insert("org", 20.0);
        assert_eq!(map.get("org"), 20.0);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_stat_map_iteration_is_sorted() {
        let map: StatMap = [("recon", 1.0), ("initiative", 2.0), ("entrenchment", 3.0)]
            .into_iter()
            .collect();
        let keys: Vec<_> = map.iter().map(|(k, _)| k.as_str().to_string()).collect();
        assert_eq!(keys, vec!["entrenchment", "initiative", "recon"]);
    }

    #[test]
    fn test_stat_map_deserialize_skips_non_numeric() {
        let map: StatMap = serde_json::from_str(
            r#"{
                "org": 60,
                "soft_attack": -0.25,
                "sprite": "infantry",
                "categories": ["category_front_line", "category_army"],
                "active": true,
                "transport": null,
                "need": {"infantry_equipment": 100}
            }"#,
        )
        .unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("org"), 60.0);
        assert_eq!(map.get("soft_attack"), -0.25);
        assert!(!map.contains("sprite"));
        assert!(!map.contains("categories"));
        assert!(!map.contains("need"));
    }

    #[test]
    fn test_stat_map_serializes_as_plain_map() {
        let map: StatMap = [("recon", 1.0)].into_iter().collect();
        assert_eq!(serde_json::to_string(&map).unwrap(), r#"{"recon":1.0}"#);
    }
}
