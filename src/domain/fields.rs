use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Prefix the gateway expects on every payment field.
pub const FIELD_PREFIX: &str = "vads_";

/// Name of the signature entry. Reserved: it is never part of its own input.
pub const SIGNATURE_FIELD: &str = "signature";

/// An ordered mapping from field name to value.
///
/// Iteration follows ascending byte-wise key order, so anything computed over
/// a `FieldSet` is independent of insertion order. Sets are created per
/// payment attempt and discarded after use; nothing here is persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSet(BTreeMap<String, String>);

impl FieldSet {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Adds or replaces a field. Values are stored as their string form.
    pub fn set(&mut self, name: impl Into<String>, value: impl ToString) {
        self.0.insert(name.into(), value.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.0.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Merges `other` over `self`, overwriting fields with the same name.
    pub fn merge(&mut self, other: FieldSet) {
        self.0.extend(other.0);
    }

    /// Entries in ascending byte-wise name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns a copy with every name rewritten under the `vads_` prefix.
    ///
    /// Prefixing lives here, in one place, so the outbound payload and the
    /// signature input cannot drift apart.
    pub fn prefixed(&self) -> FieldSet {
        self.0
            .iter()
            .map(|(name, value)| (format!("{FIELD_PREFIX}{name}"), value.clone()))
            .collect()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for FieldSet {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

impl IntoIterator for FieldSet {
    type Item = (String, String);
    type IntoIter = std::collections::btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
