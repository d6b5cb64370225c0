//! Entry materialization
//!
//! Turns a [`DirectoryEntry`] into an [`IdentityObject`]. Each requested
//! logical attribute is produced independently by the synthesizer registered
//! for its name in a [`SynthesisRegistry`]; names without a registration go
//! through the schema mapping.
//!
//! Reserved names and what they produce:
//!
//! | name                 | result                                         |
//! |----------------------|------------------------------------------------|
//! | `ldapGroups`         | DNs of the groups the entry belongs to         |
//! | `posixGroups`        | POSIX groups referencing the entry             |
//! | `__PASSWORD__`       | empty guarded string, never the stored value   |
//! | `userAccountControl` | `__ENABLE__` flag decoded from the bitmask     |

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, error, instrument};

use adbridge_connector::entry::DirectoryEntry;
use adbridge_connector::error::ConnectorResult;
use adbridge_connector::names::AttributeNameSet;
use adbridge_connector::object::{Attribute, IdentityObject, Name, Uid};
use adbridge_connector::operational;
use adbridge_connector::schema::ObjectClass;
use adbridge_connector::secret::GuardedString;
use adbridge_connector::traits::{GroupMembershipResolver, SchemaMapping};

use crate::attributes::{LDAP_GROUPS, POSIX_GROUPS, USER_ACCOUNT_CONTROL};
use crate::user_account_control::decode_enabled;

/// Placeholder name carried by tombstone objects.
pub const TOMBSTONE_NAME: &str = "fake-dn";

/// Everything a synthesizer may consult for one entry.
pub struct SynthesisContext<'a> {
    /// Object class being materialized.
    pub object_class: &'a ObjectClass,
    /// The entry being materialized.
    pub entry: &'a DirectoryEntry,
    /// Schema mapping collaborator.
    pub mapping: &'a dyn SchemaMapping,
    /// Group membership collaborator.
    pub groups: &'a dyn GroupMembershipResolver,
    /// Attribute POSIX groups use to reference their members.
    pub posix_ref_attribute: &'a str,
}

/// Produces at most one attribute for a requested logical name.
pub type Synthesizer = fn(&SynthesisContext<'_>, &str) -> ConnectorResult<Option<Attribute>>;

/// Lookup table from reserved attribute name to synthesizer.
#[derive(Clone)]
pub struct SynthesisRegistry {
    handlers: HashMap<String, Synthesizer>,
    fallback: Synthesizer,
}

impl SynthesisRegistry {
    /// A registry with no reserved names; everything goes to `fallback`.
    pub fn with_fallback(fallback: Synthesizer) -> Self {
        Self {
            handlers: HashMap::new(),
            fallback,
        }
    }

    /// Register a synthesizer for a name, replacing any existing one.
    pub fn register(&mut self, name: &str, handler: Synthesizer) {
        self.handlers.insert(name.to_lowercase(), handler);
    }

    /// Register using builder pattern.
    #[must_use]
    pub fn with(mut self, name: &str, handler: Synthesizer) -> Self {
        self.register(name, handler);
        self
    }

    /// Synthesizer for a name, falling back to the default.
    pub fn handler_for(&self, name: &str) -> Synthesizer {
        self.handlers
            .get(&name.to_lowercase())
            .copied()
            .unwrap_or(self.fallback)
    }

    /// Whether a name has its own synthesizer.
    pub fn is_reserved(&self, name: &str) -> bool {
        self.handlers.contains_key(&name.to_lowercase())
    }
}

impl Default for SynthesisRegistry {
    fn default() -> Self {
        Self::with_fallback(schema_attribute)
            .with(LDAP_GROUPS, ldap_groups)
            .with(POSIX_GROUPS, posix_groups)
            .with(operational::PASSWORD, password_placeholder)
            .with(USER_ACCOUNT_CONTROL, account_status)
    }
}

impl std::fmt::Debug for SynthesisRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("SynthesisRegistry")
            .field("reserved", &names)
            .finish_non_exhaustive()
    }
}

fn ldap_groups(ctx: &SynthesisContext<'_>, _name: &str) -> ConnectorResult<Option<Attribute>> {
    let groups = ctx.groups.groups_for_dn(ctx.entry.dn())?;
    Ok(Some(Attribute::new(LDAP_GROUPS, groups)))
}

fn posix_groups(ctx: &SynthesisContext<'_>, _name: &str) -> ConnectorResult<Option<Attribute>> {
    let refs: BTreeSet<String> = ctx
        .entry
        .string_values(ctx.posix_ref_attribute)?
        .into_iter()
        .collect();
    let groups = ctx.groups.posix_groups_for_refs(&refs)?;
    Ok(Some(Attribute::new(POSIX_GROUPS, groups)))
}

fn password_placeholder(
    _ctx: &SynthesisContext<'_>,
    name: &str,
) -> ConnectorResult<Option<Attribute>> {
    Ok(Some(Attribute::password(name, GuardedString::empty())))
}

fn account_status(ctx: &SynthesisContext<'_>, _name: &str) -> ConnectorResult<Option<Attribute>> {
    match ctx.entry.first_string(USER_ACCOUNT_CONTROL) {
        Ok(raw) => Ok(Some(Attribute::enabled(decode_enabled(raw.as_deref())))),
        Err(e) => {
            error!(error = %e, dn = %ctx.entry.dn(), "While fetching userAccountControl");
            Ok(None)
        }
    }
}

fn schema_attribute(ctx: &SynthesisContext<'_>, name: &str) -> ConnectorResult<Option<Attribute>> {
    ctx.mapping.build_attribute(ctx.object_class, name, ctx.entry)
}

/// Builds identity objects from directory entries.
#[derive(Clone, Copy)]
pub struct EntryMaterializer<'a> {
    mapping: &'a dyn SchemaMapping,
    groups: &'a dyn GroupMembershipResolver,
    registry: &'a SynthesisRegistry,
    posix_ref_attribute: &'a str,
}

impl<'a> EntryMaterializer<'a> {
    /// Create a materializer over the given collaborators.
    pub fn new(
        mapping: &'a dyn SchemaMapping,
        groups: &'a dyn GroupMembershipResolver,
        registry: &'a SynthesisRegistry,
        posix_ref_attribute: &'a str,
    ) -> Self {
        Self {
            mapping,
            groups,
            registry,
            posix_ref_attribute,
        }
    }

    /// Materialize one entry with the requested logical attributes.
    ///
    /// Attributes absent from the entry are skipped. Read failures and
    /// collaborator failures fail the whole entry.
    #[instrument(
        skip_all,
        fields(dn = %entry.dn(), base_dn = %entry.base_dn(), object_class = %object_class)
    )]
    pub fn materialize(
        &self,
        entry: &DirectoryEntry,
        logical_attributes: &AttributeNameSet,
        object_class: &ObjectClass,
    ) -> ConnectorResult<IdentityObject> {
        let uid = self.mapping.entry_to_uid(object_class, entry)?;
        let name = self.mapping.entry_to_name(object_class, entry)?;
        let mut builder = IdentityObject::builder(object_class.clone()).uid(uid).name(name);

        let ctx = SynthesisContext {
            object_class,
            entry,
            mapping: self.mapping,
            groups: self.groups,
            posix_ref_attribute: self.posix_ref_attribute,
        };

        for attribute_name in logical_attributes.iter() {
            let handler = self.registry.handler_for(attribute_name);
            match handler(&ctx, attribute_name)? {
                Some(attribute) => builder.add_attribute(attribute),
                None => debug!(attribute = %attribute_name, "Attribute not present on entry"),
            }
        }

        builder.build()
    }

    /// Build the minimal object reported for a deleted entry.
    ///
    /// Only the supplied UID survives; the name is a placeholder and there
    /// are no attributes, whatever the entry holds.
    pub fn materialize_tombstone(
        &self,
        uid: Uid,
        entry: &DirectoryEntry,
        object_class: &ObjectClass,
    ) -> ConnectorResult<IdentityObject> {
        debug!(uid = %uid, dn = %entry.dn(), object_class = %object_class, "Materializing tombstone");
        IdentityObject::builder(object_class.clone())
            .uid(uid)
            .name(Name::new(TOMBSTONE_NAME))
            .build()
    }
}

impl std::fmt::Debug for EntryMaterializer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntryMaterializer")
            .field("registry", self.registry)
            .field("posix_ref_attribute", &self.posix_ref_attribute)
            .finish_non_exhaustive()
    }
}
