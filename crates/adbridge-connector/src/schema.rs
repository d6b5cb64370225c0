//! Connector Framework schema types
//!
//! Object class tags and the schema description (object class infos and
//! their attribute infos) the mapping layer consults for readability and
//! default-return rules.

use serde::{Deserialize, Serialize};

/// Object class tag of an identity object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ObjectClass {
    /// User accounts (`__ACCOUNT__`).
    Account,
    /// Groups (`__GROUP__`).
    Group,
    /// Wildcard matching any object class (`__ALL__`).
    Any,
    /// Any other object class, by name.
    Other(String),
}

impl ObjectClass {
    /// Wire name of the account class.
    pub const ACCOUNT_NAME: &'static str = "__ACCOUNT__";
    /// Wire name of the group class.
    pub const GROUP_NAME: &'static str = "__GROUP__";
    /// Wire name of the wildcard class.
    pub const ANY_NAME: &'static str = "__ALL__";

    /// Get the string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            ObjectClass::Account => Self::ACCOUNT_NAME,
            ObjectClass::Group => Self::GROUP_NAME,
            ObjectClass::Any => Self::ANY_NAME,
            ObjectClass::Other(name) => name,
        }
    }

    /// Parse from string. Reserved names are matched ignoring case.
    #[must_use]
    pub fn parse_str(s: &str) -> Self {
        if s.eq_ignore_ascii_case(Self::ACCOUNT_NAME) {
            ObjectClass::Account
        } else if s.eq_ignore_ascii_case(Self::GROUP_NAME) {
            ObjectClass::Group
        } else if s.eq_ignore_ascii_case(Self::ANY_NAME) {
            ObjectClass::Any
        } else {
            ObjectClass::Other(s.to_string())
        }
    }

    /// Whether this is the wildcard class.
    #[must_use]
    pub fn is_any(&self) -> bool {
        matches!(self, ObjectClass::Any)
    }
}

impl std::fmt::Display for ObjectClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ObjectClass {
    fn from(s: String) -> Self {
        Self::parse_str(&s)
    }
}

impl From<ObjectClass> for String {
    fn from(oc: ObjectClass) -> Self {
        oc.as_str().to_string()
    }
}

/// Schema describing the object classes a connector exposes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schema {
    /// The object class infos in this schema.
    pub object_classes: Vec<ObjectClassInfo>,
}

impl Schema {
    /// Create a new empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object class info using builder pattern.
    #[must_use]
    pub fn with_object_class(mut self, info: ObjectClassInfo) -> Self {
        self.object_classes.push(info);
        self
    }

    /// Find the info for an object class.
    #[must_use]
    pub fn find_object_class_info(&self, object_class: &ObjectClass) -> Option<&ObjectClassInfo> {
        self.object_classes
            .iter()
            .find(|info| info.object_class == *object_class)
    }
}

/// Description of one object class: its native name and its attributes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectClassInfo {
    /// The object class tag.
    pub object_class: ObjectClass,

    /// Native directory object class (e.g., "user", "group").
    pub native_name: String,

    /// Attributes belonging to this object class.
    #[serde(default)]
    pub attributes: Vec<AttributeInfo>,
}

impl ObjectClassInfo {
    /// Create a new object class info.
    pub fn new(object_class: ObjectClass, native_name: impl Into<String>) -> Self {
        Self {
            object_class,
            native_name: native_name.into(),
            attributes: Vec::new(),
        }
    }

    /// Add an attribute using builder pattern.
    #[must_use]
    pub fn with_attribute(mut self, attribute: AttributeInfo) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Find an attribute by logical name, ignoring case.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&AttributeInfo> {
        self.attributes
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
    }

    /// Logical names of all attributes.
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|a| a.name.as_str())
    }
}

/// Description of one attribute of an object class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeInfo {
    /// Logical name (what callers ask for).
    pub name: String,

    /// Native directory attribute name.
    pub native_name: String,

    /// Data type of this attribute.
    pub data_type: AttributeDataType,

    /// Whether this attribute can have multiple values.
    #[serde(default)]
    pub multi_valued: bool,

    /// Whether this attribute can be read.
    #[serde(default = "default_true")]
    pub readable: bool,

    /// Whether this attribute is returned when the caller asks for no attributes in particular.
    #[serde(default = "default_true")]
    pub returned_by_default: bool,
}

fn default_true() -> bool {
    true
}

impl AttributeInfo {
    /// Create a readable, returned-by-default, single-valued attribute.
    pub fn new(
        name: impl Into<String>,
        native_name: impl Into<String>,
        data_type: AttributeDataType,
    ) -> Self {
        Self {
            name: name.into(),
            native_name: native_name.into(),
            data_type,
            multi_valued: false,
            readable: true,
            returned_by_default: true,
        }
    }

    /// Create an attribute whose logical and native names are the same.
    pub fn native(name: impl Into<String>, data_type: AttributeDataType) -> Self {
        let name = name.into();
        Self::new(name.clone(), name, data_type)
    }

    /// Mark this attribute as multi-valued.
    #[must_use]
    pub fn multi_valued(mut self) -> Self {
        self.multi_valued = true;
        self
    }

    /// Mark this attribute as write-only (e.g., passwords).
    #[must_use]
    pub fn write_only(mut self) -> Self {
        self.readable = false;
        self.returned_by_default = false;
        self
    }

    /// Keep this attribute out of default searches.
    #[must_use]
    pub fn not_returned_by_default(mut self) -> Self {
        self.returned_by_default = false;
        self
    }
}

/// Data type for schema attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeDataType {
    /// String/text value.
    String,
    /// Integer value.
    Integer,
    /// Boolean value.
    Boolean,
    /// Binary data (bytes).
    Binary,
    /// Distinguished Name.
    Dn,
    /// Secret (write-only, guarded).
    Secret,
}

impl AttributeDataType {
    /// Get the string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeDataType::String => "string",
            AttributeDataType::Integer => "integer",
            AttributeDataType::Boolean => "boolean",
            AttributeDataType::Binary => "binary",
            AttributeDataType::Dn => "dn",
            AttributeDataType::Secret => "secret",
        }
    }
}

impl std::fmt::Display for AttributeDataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
