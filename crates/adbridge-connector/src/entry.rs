//! Raw directory entries
//!
//! A [`DirectoryEntry`] is what the search layer hands over: a DN, the search
//! root it was found under, and a bag of attribute values keyed by
//! case-insensitive name. Entries are immutable once built.

use std::collections::BTreeMap;

use crate::error::{ConnectorError, ConnectorResult};

/// One raw attribute value as returned by the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValue {
    /// Value returned as text.
    Text(String),
    /// Value returned as raw bytes (e.g., `objectGUID`, `objectSid`).
    Binary(Vec<u8>),
}

impl EntryValue {
    /// Read the value as a string.
    ///
    /// Binary values are accepted when they are valid UTF-8; anything else
    /// is a directory access failure.
    pub fn to_text(&self, attribute: &str) -> ConnectorResult<String> {
        match self {
            EntryValue::Text(s) => Ok(s.clone()),
            EntryValue::Binary(bytes) => String::from_utf8(bytes.clone()).map_err(|e| {
                ConnectorError::directory_access_with_source(
                    format!("attribute '{attribute}' holds a binary value that is not text"),
                    e,
                )
            }),
        }
    }

    /// Raw bytes of the value.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            EntryValue::Text(s) => s.as_bytes(),
            EntryValue::Binary(bytes) => bytes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct EntryAttribute {
    name: String,
    values: Vec<EntryValue>,
}

/// A directory entry read by the search layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    base_dn: String,
    dn: String,
    attributes: BTreeMap<String, EntryAttribute>,
}

impl DirectoryEntry {
    /// Create an entry with no attributes.
    pub fn new(base_dn: impl Into<String>, dn: impl Into<String>) -> Self {
        Self {
            base_dn: base_dn.into(),
            dn: dn.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Add text values for an attribute, appending to any existing values.
    #[must_use]
    pub fn with_values<S: Into<String>>(
        self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = S>,
    ) -> Self {
        self.with_entry_values(name, values.into_iter().map(|v| EntryValue::Text(v.into())))
    }

    /// Add a single text value for an attribute.
    #[must_use]
    pub fn with_value(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.with_values(name, [value])
    }

    /// Add binary values for an attribute, appending to any existing values.
    #[must_use]
    pub fn with_binary_values(
        self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = Vec<u8>>,
    ) -> Self {
        self.with_entry_values(name, values.into_iter().map(EntryValue::Binary))
    }

    /// Add raw values for an attribute, appending to any existing values.
    #[must_use]
    pub fn with_entry_values(
        mut self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = EntryValue>,
    ) -> Self {
        let name = name.into();
        self.attributes
            .entry(name.to_lowercase())
            .or_insert_with(|| EntryAttribute {
                name,
                values: Vec::new(),
            })
            .values
            .extend(values);
        self
    }

    /// The search root this entry was found under.
    pub fn base_dn(&self) -> &str {
        &self.base_dn
    }

    /// The entry's distinguished name.
    pub fn dn(&self) -> &str {
        &self.dn
    }

    /// Check whether the entry carries an attribute.
    pub fn has(&self, name: &str) -> bool {
        self.attributes.contains_key(&name.to_lowercase())
    }

    /// Raw values of an attribute, if present.
    pub fn values(&self, name: &str) -> Option<&[EntryValue]> {
        self.attributes
            .get(&name.to_lowercase())
            .map(|a| a.values.as_slice())
    }

    /// First value of an attribute read as text.
    ///
    /// Returns `Ok(None)` when the attribute is absent or has no values.
    pub fn first_string(&self, name: &str) -> ConnectorResult<Option<String>> {
        match self.values(name).and_then(<[EntryValue]>::first) {
            Some(value) => value.to_text(name).map(Some),
            None => Ok(None),
        }
    }

    /// All values of an attribute read as text (empty when absent).
    pub fn string_values(&self, name: &str) -> ConnectorResult<Vec<String>> {
        self.values(name)
            .unwrap_or_default()
            .iter()
            .map(|v| v.to_text(name))
            .collect()
    }

    /// Names of all attributes on the entry, as the directory spelled them.
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.values().map(|a| a.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> DirectoryEntry {
        DirectoryEntry::new("dc=example,dc=com", "cn=jdoe,ou=People,dc=example,dc=com")
            .with_value("sAMAccountName", "jdoe")
            .with_values("memberOf", ["cn=a,dc=example,dc=com", "cn=b,dc=example,dc=com"])
            .with_binary_values("objectGUID", [vec![0xde, 0xad, 0xbe, 0xef]])
    }

    #[test]
    fn test_lookup_ignores_case() {
        let entry = entry();
        assert!(entry.has("samaccountname"));
        assert_eq!(
            entry.first_string("SAMACCOUNTNAME").unwrap(),
            Some("jdoe".to_string())
        );
        assert_eq!(entry.string_values("memberof").unwrap().len(), 2);
    }

    #[test]
    fn test_absent_attribute() {
        let entry = entry();
        assert!(!entry.has("mail"));
        assert_eq!(entry.first_string("mail").unwrap(), None);
        assert!(entry.string_values("mail").unwrap().is_empty());
    }

    #[test]
    fn test_non_text_binary_is_access_error() {
        let entry = entry();
        let err = entry.first_string("objectGUID").unwrap_err();
        assert_eq!(err.error_code(), "DIRECTORY_ACCESS");
    }

    #[test]
    fn test_values_append() {
        let entry = DirectoryEntry::new("dc=x", "cn=y,dc=x")
            .with_value("uid", "one")
            .with_value("UID", "two");
        assert_eq!(entry.string_values("uid").unwrap(), vec!["one", "two"]);
        assert_eq!(entry.attribute_names().collect::<Vec<_>>(), vec!["uid"]);
    }
}
