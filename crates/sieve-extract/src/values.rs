//! Raw, merged request values.

use indexmap::IndexMap;

/// Mapping from parameter name to the raw string values found for it.
///
/// Each source writes whole entries: a later (higher priority) source
/// replaces the list for a name rather than appending to it. A name that is
/// present with an empty list is distinct from an absent name.
///
/// # Example
///
/// ```rust
/// use sieve_extract::ExtractedValues;
///
/// let mut values = ExtractedValues::new();
/// values.set("q", vec!["from-cookie".to_string()]);
/// values.set("q", vec!["from-query".to_string()]);
/// values.set_if_absent("q", vec!["from-path".to_string()]);
///
/// assert_eq!(values.get("q"), Some(&["from-query".to_string()][..]));
/// assert!(values.contains("q"));
/// assert!(!values.contains("missing"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedValues {
    inner: IndexMap<String, Vec<String>>,
}

impl ExtractedValues {
    /// Creates an empty value map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the values for a name, replacing any lower-priority entry.
    pub fn set(&mut self, name: impl Into<String>, values: Vec<String>) {
        self.inner.insert(name.into(), values);
    }

    /// Sets the values for a name only if no source provided it yet.
    pub fn set_if_absent(&mut self, name: impl Into<String>, values: Vec<String>) {
        self.inner.entry(name.into()).or_insert(values);
    }

    /// Overlays every entry of `other` onto this map.
    pub fn overlay(&mut self, other: Self) {
        for (name, values) in other.inner {
            self.inner.insert(name, values);
        }
    }

    /// Returns the values for a name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.inner.get(name).map(Vec::as_slice)
    }

    /// Returns true if the name was explicitly present in some source.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.inner.contains_key(name)
    }

    /// Returns the number of names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if no source provided any value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns an iterator over names and their values.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

/// Groups ordered `(name, value)` pairs into a value map.
///
/// Repeated names accumulate in order of appearance.
pub(crate) fn group_pairs(pairs: Vec<(String, String)>) -> ExtractedValues {
    let mut grouped: IndexMap<String, Vec<String>> = IndexMap::new();
    for (name, value) in pairs {
        grouped.entry(name).or_default().push(value);
    }
    ExtractedValues { inner: grouped }
}
