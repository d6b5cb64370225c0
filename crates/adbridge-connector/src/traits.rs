//! Connector Framework traits
//!
//! Collaborator interfaces the mapping core calls into. Implementations are
//! shared read-only across concurrent materializations, hence `Send + Sync`.

use std::collections::BTreeSet;

use crate::entry::DirectoryEntry;
use crate::error::ConnectorResult;
use crate::names::AttributeNameSet;
use crate::object::{Attribute, Name, Uid};
use crate::schema::ObjectClass;

/// Translation between logical identity attributes and physical directory attributes.
pub trait SchemaMapping: Send + Sync {
    /// Whether the attribute is returned when no attribute list is requested.
    fn is_returned_by_default(&self, object_class: &ObjectClass, attribute: &str) -> bool;

    /// Whether the attribute can be read back from the directory.
    fn is_readable(&self, object_class: &ObjectClass, attribute: &str) -> bool;

    /// Logical names of every attribute the object class declares.
    ///
    /// Unknown object classes declare nothing.
    fn attribute_names(&self, object_class: &ObjectClass) -> AttributeNameSet;

    /// Map logical attribute names to the physical names to request from the directory.
    fn to_physical_names(
        &self,
        object_class: &ObjectClass,
        logical_names: &AttributeNameSet,
    ) -> ConnectorResult<AttributeNameSet>;

    /// Unique identifier of an entry.
    fn entry_to_uid(&self, object_class: &ObjectClass, entry: &DirectoryEntry)
        -> ConnectorResult<Uid>;

    /// Name of an entry.
    fn entry_to_name(
        &self,
        object_class: &ObjectClass,
        entry: &DirectoryEntry,
    ) -> ConnectorResult<Name>;

    /// Build a typed attribute for a logical name from the entry.
    ///
    /// Returns `Ok(None)` when the entry carries no value for it.
    fn build_attribute(
        &self,
        object_class: &ObjectClass,
        logical_name: &str,
        entry: &DirectoryEntry,
    ) -> ConnectorResult<Option<Attribute>>;
}

/// Resolution of group memberships for directory entries.
pub trait GroupMembershipResolver: Send + Sync {
    /// DNs of the directory groups an entry belongs to.
    fn groups_for_dn(&self, dn: &str) -> ConnectorResult<Vec<String>>;

    /// Names of the POSIX groups referencing any of the given member references.
    fn posix_groups_for_refs(&self, refs: &BTreeSet<String>) -> ConnectorResult<Vec<String>>;
}
