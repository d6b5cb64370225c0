//! # Connector Framework
//!
//! Vendor-neutral identity object model for directory connectors.
//!
//! This crate holds the types shared between the directory-specific mapping
//! code and the provisioning framework that consumes its output:
//!
//! - [`object`] - `IdentityObject`, `Uid`, `Name`, `Attribute`
//! - [`entry`] - raw `DirectoryEntry` records handed over by the search layer
//! - [`schema`] - object class tags and attribute readability metadata
//! - [`names`] - case-insensitive attribute name sets
//! - [`traits`] - collaborator traits (`SchemaMapping`, `GroupMembershipResolver`)
//! - [`error`] - error types with transient/permanent classification
//! - [`config`] - configuration trait
//!
//! ## Example
//!
//! ```
//! use adbridge_connector::prelude::*;
//!
//! let object = IdentityObject::builder(ObjectClass::Account)
//!     .uid(Uid::new("3q2+7w=="))
//!     .name(Name::new("cn=jdoe,ou=People,dc=example,dc=com"))
//!     .with_attribute(Attribute::enabled(true))
//!     .build()
//!     .unwrap();
//!
//! assert!(object.is_enabled());
//! ```

pub mod config;
pub mod entry;
pub mod error;
pub mod names;
pub mod object;
pub mod operational;
pub mod schema;
pub mod secret;
pub mod traits;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::ConnectorConfig;
    pub use crate::entry::{DirectoryEntry, EntryValue};
    pub use crate::error::{ConnectorError, ConnectorResult};
    pub use crate::names::AttributeNameSet;
    pub use crate::object::{
        Attribute, AttributeValue, IdentityObject, IdentityObjectBuilder, Name, Uid,
    };
    pub use crate::operational;
    pub use crate::schema::{AttributeDataType, AttributeInfo, ObjectClass, ObjectClassInfo, Schema};
    pub use crate::secret::{ExposeSecret, GuardedString};
    pub use crate::traits::{GroupMembershipResolver, SchemaMapping};
}
