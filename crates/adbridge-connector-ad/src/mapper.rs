//! Active Directory mapper
//!
//! [`AdMapper`] is the entry point the connector's search and sync paths use.
//! It owns the configuration and the collaborators, and hands out the
//! resolver, materializer and DN resolver over them.

use std::sync::Arc;

use ldap3::SearchEntry;
use tracing::info;

use adbridge_connector::config::ConnectorConfig;
use adbridge_connector::entry::DirectoryEntry;
use adbridge_connector::error::ConnectorResult;
use adbridge_connector::names::AttributeNameSet;
use adbridge_connector::object::{Attribute, IdentityObject, Name, Uid};
use adbridge_connector::schema::ObjectClass;
use adbridge_connector::traits::{GroupMembershipResolver, SchemaMapping};

use crate::config::AdConfig;
use crate::dn::{self, DnResolver};
use crate::materializer::{EntryMaterializer, SynthesisRegistry};
use crate::resolver::AttributeResolver;
use crate::search_entry::entry_from_search;

/// Maps Active Directory entries to identity objects.
pub struct AdMapper {
    config: AdConfig,
    mapping: Arc<dyn SchemaMapping>,
    groups: Arc<dyn GroupMembershipResolver>,
    registry: SynthesisRegistry,
    people: DnResolver,
}

impl AdMapper {
    /// Create a mapper, validating the configuration first.
    pub fn new(
        config: AdConfig,
        mapping: Arc<dyn SchemaMapping>,
        groups: Arc<dyn GroupMembershipResolver>,
    ) -> ConnectorResult<Self> {
        config.validate()?;

        info!(
            base_dn = %config.base_dn,
            people_container = %config.default_people_container,
            "Creating AD mapper"
        );

        let people = DnResolver::new(config.default_people_container.clone());
        Ok(Self {
            config,
            mapping,
            groups,
            registry: SynthesisRegistry::default(),
            people,
        })
    }

    /// Replace the synthesis registry.
    #[must_use]
    pub fn with_registry(mut self, registry: SynthesisRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &AdConfig {
        &self.config
    }

    /// The synthesis registry in use.
    pub fn registry(&self) -> &SynthesisRegistry {
        &self.registry
    }

    /// Attribute resolver over this mapper's schema mapping.
    pub fn resolver(&self) -> AttributeResolver<'_> {
        AttributeResolver::new(self.mapping.as_ref(), &self.config.posix_ref_attribute)
    }

    /// Entry materializer over this mapper's collaborators.
    pub fn materializer(&self) -> EntryMaterializer<'_> {
        EntryMaterializer::new(
            self.mapping.as_ref(),
            self.groups.as_ref(),
            &self.registry,
            &self.config.posix_ref_attribute,
        )
    }

    /// Logical attributes to fetch. See [`AttributeResolver::logical_attributes`].
    pub fn attributes_to_get(
        &self,
        requested: Option<&AttributeNameSet>,
        object_class: &ObjectClass,
    ) -> AttributeNameSet {
        self.resolver().logical_attributes(requested, object_class)
    }

    /// Logical attributes returned by default for an object class.
    pub fn returned_by_default(&self, object_class: &ObjectClass) -> AttributeNameSet {
        self.resolver().returned_by_default(object_class)
    }

    /// Physical attributes to put on the wire for a logical set.
    pub fn directory_attributes_to_get(
        &self,
        logical: &AttributeNameSet,
        object_class: &ObjectClass,
    ) -> ConnectorResult<AttributeNameSet> {
        self.resolver().directory_attributes(logical, object_class)
    }

    /// Materialize an already-converted entry.
    pub fn materialize(
        &self,
        entry: &DirectoryEntry,
        logical_attributes: &AttributeNameSet,
        object_class: &ObjectClass,
    ) -> ConnectorResult<IdentityObject> {
        self.materializer()
            .materialize(entry, logical_attributes, object_class)
    }

    /// Materialize a raw search result found under `base_dn`.
    pub fn materialize_search_result(
        &self,
        base_dn: &str,
        entry: SearchEntry,
        logical_attributes: &AttributeNameSet,
        object_class: &ObjectClass,
    ) -> ConnectorResult<IdentityObject> {
        let entry = entry_from_search(base_dn, entry);
        self.materialize(&entry, logical_attributes, object_class)
    }

    /// Minimal object for a deleted entry, keyed by `uid`.
    pub fn materialize_tombstone(
        &self,
        uid: Uid,
        entry: &DirectoryEntry,
        object_class: &ObjectClass,
    ) -> ConnectorResult<IdentityObject> {
        self.materializer()
            .materialize_tombstone(uid, entry, object_class)
    }

    /// DN for a new account in the default people container.
    pub fn build_dn(&self, name: &Name, common_name: Option<&Attribute>) -> String {
        self.people.build_dn(name, common_name)
    }

    /// Whether a string parses as a DN.
    pub fn is_dn(&self, candidate: &str) -> bool {
        dn::is_dn(candidate)
    }
}

impl std::fmt::Debug for AdMapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdMapper")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("people", &self.people)
            .finish_non_exhaustive()
    }
}
