//! Case-insensitive attribute name sets
//!
//! Directory attribute names compare without regard to case (`mail`, `Mail`
//! and `MAIL` are the same attribute). [`AttributeNameSet`] stores names under
//! a lower-cased key and keeps the first spelling it saw for display and for
//! passing back to the directory.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A set of attribute names with case-insensitive membership.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct AttributeNameSet {
    /// Folded key -> original spelling.
    names: BTreeMap<String, String>,
}

fn fold(name: &str) -> String {
    name.to_lowercase()
}

impl AttributeNameSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a name. Returns `true` if no name with the same folded key was present.
    ///
    /// An existing entry keeps its original spelling.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        let key = fold(&name);
        if self.names.contains_key(&key) {
            return false;
        }
        self.names.insert(key, name);
        true
    }

    /// Add a name using builder pattern.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>) -> Self {
        self.insert(name);
        self
    }

    /// Remove a name. Returns `true` if it was present.
    pub fn remove(&mut self, name: &str) -> bool {
        self.names.remove(&fold(name)).is_some()
    }

    /// Check membership ignoring case.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(&fold(name))
    }

    /// Get the stored spelling of a name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.names.get(&fold(name)).map(String::as_str)
    }

    /// Keep only the names for which `keep` returns `true`.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.names.retain(|_, name| keep(name.as_str()));
    }

    /// Number of names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate over the stored spellings, ordered by folded key.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.values().map(String::as_str)
    }

    /// Convert into a vector of the stored spellings.
    pub fn into_vec(self) -> Vec<String> {
        self.names.into_values().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for AttributeNameSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<S: Into<String>> Extend<S> for AttributeNameSet {
    fn extend<T: IntoIterator<Item = S>>(&mut self, iter: T) {
        for name in iter {
            self.insert(name);
        }
    }
}

impl From<Vec<String>> for AttributeNameSet {
    fn from(names: Vec<String>) -> Self {
        names.into_iter().collect()
    }
}

impl From<AttributeNameSet> for Vec<String> {
    fn from(set: AttributeNameSet) -> Self {
        set.into_vec()
    }
}
