//! Attribute-set resolution
//!
//! Decides which attributes a search must return: first as logical names
//! (what the caller will see on the identity object), then as the physical
//! directory attribute names to put on the wire.

use tracing::{debug, warn};

use adbridge_connector::error::ConnectorResult;
use adbridge_connector::names::AttributeNameSet;
use adbridge_connector::operational;
use adbridge_connector::schema::ObjectClass;
use adbridge_connector::traits::SchemaMapping;

use crate::attributes::{is_virtual, LDAP_GROUPS, POSIX_GROUPS, USER_ACCOUNT_CONTROL};

/// Resolves requested attribute lists against the schema mapping.
#[derive(Clone, Copy)]
pub struct AttributeResolver<'a> {
    mapping: &'a dyn SchemaMapping,
    posix_ref_attribute: &'a str,
}

impl<'a> AttributeResolver<'a> {
    /// Create a resolver over a schema mapping.
    pub fn new(mapping: &'a dyn SchemaMapping, posix_ref_attribute: &'a str) -> Self {
        Self {
            mapping,
            posix_ref_attribute,
        }
    }

    /// Logical attributes to fetch for a query.
    ///
    /// Without a requested list this is everything returned by default.
    /// With one, unreadable attributes are dropped (virtual group attributes
    /// excepted) and the name attribute is added. Either way the UID and
    /// `userAccountControl` are always present.
    pub fn logical_attributes(
        &self,
        requested: Option<&AttributeNameSet>,
        object_class: &ObjectClass,
    ) -> AttributeNameSet {
        let mut result = match requested {
            Some(requested) => {
                let mut result = requested.clone();
                self.remove_non_readable(&mut result, object_class);
                result.insert(operational::NAME);
                result
            }
            None => self.returned_by_default(object_class),
        };

        // Needed to build the identity object.
        result.insert(operational::UID);
        // Needed to derive the enabled flag.
        result.insert(USER_ACCOUNT_CONTROL);

        // Passwords stay readable in the schema for sync, but are never returned.
        if result.contains(operational::PASSWORD) {
            warn!(object_class = %object_class, "Reading passwords not supported");
        }

        debug!(
            object_class = %object_class,
            attributes = ?result,
            "Resolved logical attributes"
        );
        result
    }

    /// Logical attributes returned by default for an object class.
    ///
    /// The wildcard object class returns only the name attribute.
    pub fn returned_by_default(&self, object_class: &ObjectClass) -> AttributeNameSet {
        if object_class.is_any() {
            return AttributeNameSet::new().with(operational::NAME);
        }

        let mut result = self.mapping.attribute_names(object_class);
        result.retain(|name| self.mapping.is_returned_by_default(object_class, name));
        result.insert(operational::NAME);
        result
    }

    /// Physical directory attributes to request for a set of logical attributes.
    ///
    /// `ldapGroups` has no physical backing and is dropped; `posixGroups` is
    /// replaced by the POSIX member reference attribute.
    pub fn directory_attributes(
        &self,
        logical: &AttributeNameSet,
        object_class: &ObjectClass,
    ) -> ConnectorResult<AttributeNameSet> {
        let mut clean = logical.clone();
        clean.remove(LDAP_GROUPS);
        let posix_groups = clean.remove(POSIX_GROUPS);

        let mut result = self.mapping.to_physical_names(object_class, &clean)?;
        if posix_groups {
            result.insert(self.posix_ref_attribute);
        }

        debug!(
            object_class = %object_class,
            attributes = ?result,
            "Resolved directory attributes"
        );
        Ok(result)
    }

    // The group attributes are virtual. Keeping them away from the schema
    // mapping also avoids clashing with a custom server attribute of the same name.
    fn remove_non_readable(&self, attributes: &mut AttributeNameSet, object_class: &ObjectClass) {
        let virtuals: Vec<String> = attributes
            .iter()
            .filter(|name| is_virtual(name))
            .map(str::to_string)
            .collect();
        for name in &virtuals {
            attributes.remove(name);
        }

        attributes.retain(|name| self.mapping.is_readable(object_class, name));

        attributes.extend(virtuals);
    }
}

impl std::fmt::Debug for AttributeResolver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttributeResolver")
            .field("posix_ref_attribute", &self.posix_ref_attribute)
            .finish_non_exhaustive()
    }
}
