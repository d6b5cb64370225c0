//! Identity object model
//!
//! The vendor-neutral shape every directory entry is materialized into: an
//! object class tag, a [`Uid`], a [`Name`] and a set of [`Attribute`]s.

use serde::{Deserialize, Serialize};

use crate::error::{ConnectorError, ConnectorResult};
use crate::operational;
use crate::schema::ObjectClass;
use crate::secret::GuardedString;

/// Unique identifier for an object in a target system.
///
/// For Active Directory this is usually the base64 form of `objectGUID`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Uid(String);

impl Uid {
    /// Create a new UID.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the value.
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Uid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Naming attribute of an object (for directories, normally the DN).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Name(String);

impl Name {
    /// Create a new name.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the value.
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// A string value.
    String(String),
    /// An integer value.
    Integer(i64),
    /// A boolean value.
    Boolean(bool),
    /// Binary data.
    Binary(Vec<u8>),
    /// A secret (passwords).
    Secret(GuardedString),
}

impl AttributeValue {
    /// Get as a string if this is a string value.
    pub fn as_string(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as an integer if this is an integer value.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            AttributeValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as a boolean if this is a boolean value.
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            AttributeValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as a secret if this is a secret value.
    pub fn as_secret(&self) -> Option<&GuardedString> {
        match self {
            AttributeValue::Secret(s) => Some(s),
            _ => None,
        }
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::String(s)
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::String(s.to_string())
    }
}

impl From<i64> for AttributeValue {
    fn from(i: i64) -> Self {
        AttributeValue::Integer(i)
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        AttributeValue::Boolean(b)
    }
}

impl From<Vec<u8>> for AttributeValue {
    fn from(bytes: Vec<u8>) -> Self {
        AttributeValue::Binary(bytes)
    }
}

impl From<GuardedString> for AttributeValue {
    fn from(secret: GuardedString) -> Self {
        AttributeValue::Secret(secret)
    }
}

/// A named attribute with zero or more values.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    name: String,
    values: Vec<AttributeValue>,
}

impl Attribute {
    /// Create an attribute with the given values.
    pub fn new<V: Into<AttributeValue>>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a single-valued attribute.
    pub fn single(name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        Self {
            name: name.into(),
            values: vec![value.into()],
        }
    }

    /// The operational enabled/disabled attribute.
    pub fn enabled(enabled: bool) -> Self {
        Self::single(operational::ENABLE, enabled)
    }

    /// A password attribute holding the given secret.
    pub fn password(name: impl Into<String>, secret: GuardedString) -> Self {
        Self::single(name, secret)
    }

    /// Attribute name as supplied.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All values.
    pub fn values(&self) -> &[AttributeValue] {
        &self.values
    }

    /// First value, if any.
    pub fn first_value(&self) -> Option<&AttributeValue> {
        self.values.first()
    }

    /// All string values, skipping non-string ones.
    pub fn string_values(&self) -> Vec<&str> {
        self.values.iter().filter_map(AttributeValue::as_string).collect()
    }

    /// Check the name ignoring case.
    pub fn is(&self, name: &str) -> bool {
        operational::is_named(&self.name, name)
    }
}

/// A materialized identity object.
///
/// Built once through [`IdentityObjectBuilder`] and immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentityObject {
    object_class: ObjectClass,
    uid: Uid,
    name: Name,
    attributes: Vec<Attribute>,
}

impl IdentityObject {
    /// Start building an object of the given class.
    pub fn builder(object_class: ObjectClass) -> IdentityObjectBuilder {
        IdentityObjectBuilder::new(object_class)
    }

    /// The object class.
    pub fn object_class(&self) -> &ObjectClass {
        &self.object_class
    }

    /// The unique identifier.
    pub fn uid(&self) -> &Uid {
        &self.uid
    }

    /// The name.
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// All attributes, excluding the UID and name.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Look up an attribute by name, ignoring case.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.is(name))
    }

    /// Whether the object is enabled.
    ///
    /// Objects without an `__ENABLE__` attribute count as enabled.
    pub fn is_enabled(&self) -> bool {
        self.attribute(operational::ENABLE)
            .and_then(Attribute::first_value)
            .and_then(AttributeValue::as_boolean)
            .unwrap_or(true)
    }
}

/// Builder for [`IdentityObject`].
#[derive(Debug, Clone)]
pub struct IdentityObjectBuilder {
    object_class: ObjectClass,
    uid: Option<Uid>,
    name: Option<Name>,
    attributes: Vec<Attribute>,
}

impl IdentityObjectBuilder {
    /// Create a builder for the given object class.
    pub fn new(object_class: ObjectClass) -> Self {
        Self {
            object_class,
            uid: None,
            name: None,
            attributes: Vec::new(),
        }
    }

    /// Set the unique identifier.
    #[must_use]
    pub fn uid(mut self, uid: Uid) -> Self {
        self.uid = Some(uid);
        self
    }

    /// Set the name.
    #[must_use]
    pub fn name(mut self, name: Name) -> Self {
        self.name = Some(name);
        self
    }

    /// Add an attribute, replacing any earlier attribute with the same name.
    pub fn add_attribute(&mut self, attribute: Attribute) {
        self.attributes.retain(|a| !a.is(attribute.name()));
        self.attributes.push(attribute);
    }

    /// Add an attribute using builder pattern.
    #[must_use]
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.add_attribute(attribute);
        self
    }

    /// Add several attributes.
    #[must_use]
    pub fn with_attributes(mut self, attributes: impl IntoIterator<Item = Attribute>) -> Self {
        for attribute in attributes {
            self.add_attribute(attribute);
        }
        self
    }

    /// Build the object. Fails if the UID or name was never set.
    pub fn build(self) -> ConnectorResult<IdentityObject> {
        let uid = self.uid.ok_or_else(|| ConnectorError::InvalidData {
            message: format!("{} object is missing a uid", self.object_class),
        })?;
        let name = self.name.ok_or_else(|| ConnectorError::InvalidData {
            message: format!("{} object is missing a name", self.object_class),
        })?;

        Ok(IdentityObject {
            object_class: self.object_class,
            uid,
            name,
            attributes: self.attributes,
        })
    }
}
