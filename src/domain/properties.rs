//! Ordered property assignments for a single command

use serde::Serialize;

use super::value::PropertyValue;

/// Property assignments in the order they were supplied
///
/// Order matters: the serialized `key=value;` block reproduces it exactly.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Properties(Vec<(String, PropertyValue)>);

impl Properties {
    /// Creates an empty property set
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a property, consuming and returning the set
    pub fn with(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.push(key, value);
        self
    }

    /// Appends a property
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.0.push((key.into(), value.into()));
    }

    /// Appends a property only when a value is present
    pub fn push_opt<V: Into<PropertyValue>>(&mut self, key: &str, value: Option<V>) {
        if let Some(value) = value {
            self.push(key, value);
        }
    }

    /// Looks up the first value supplied for `key`
    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns true if `key` was supplied
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterates over all assignments in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of assignments
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Renders the `key=value;` block, with no separator between pairs
    pub fn serialize(&self) -> String {
        self.0
            .iter()
            .map(|(key, value)| format!("{}={};", key, value))
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Properties
where
    K: Into<String>,
    V: Into<PropertyValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a Properties {
    type Item = &'a (String, PropertyValue);
    type IntoIter = std::slice::Iter<'a, (String, PropertyValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
