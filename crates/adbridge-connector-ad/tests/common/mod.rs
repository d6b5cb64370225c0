//! Integration test helpers for adbridge-connector-ad.
//!
//! Provides logging setup, an in-memory group resolver and a small AD-like
//! schema shared by the integration tests.

#![allow(dead_code)]

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, Once};

use adbridge_connector::prelude::*;
use adbridge_connector_ad::{AdConfig, AdMapper, SchemaBackedMapping};

static INIT: Once = Once::new();

pub const BASE_DN: &str = "dc=example,dc=com";
pub const PEOPLE: &str = "ou=People,dc=example,dc=com";
pub const JDOE_DN: &str = "cn=John Doe,ou=People,dc=example,dc=com";

/// Initialize logging for tests (once).
pub fn init_test_logging() {
    INIT.call_once(|| {
        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::fmt()
                .with_test_writer()
                .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
                .try_init()
                .ok();
        }
    });
}

/// Group memberships held in memory.
///
/// Records the POSIX references it was asked about so tests can check what
/// the materializer passed along.
#[derive(Default)]
pub struct InMemoryGroups {
    by_dn: HashMap<String, Vec<String>>,
    posix_by_ref: HashMap<String, Vec<String>>,
    fail: bool,
    pub posix_lookups: Mutex<Vec<BTreeSet<String>>>,
}

impl InMemoryGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// A resolver whose every lookup fails with a transient error.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_member(mut self, dn: &str, group: &str) -> Self {
        self.by_dn
            .entry(dn.to_lowercase())
            .or_default()
            .push(group.to_string());
        self
    }

    pub fn with_posix_member(mut self, reference: &str, group: &str) -> Self {
        self.posix_by_ref
            .entry(reference.to_string())
            .or_default()
            .push(group.to_string());
        self
    }
}

impl GroupMembershipResolver for InMemoryGroups {
    fn groups_for_dn(&self, dn: &str) -> ConnectorResult<Vec<String>> {
        if self.fail {
            return Err(ConnectorError::directory_access("group search failed"));
        }
        Ok(self.by_dn.get(&dn.to_lowercase()).cloned().unwrap_or_default())
    }

    fn posix_groups_for_refs(&self, refs: &BTreeSet<String>) -> ConnectorResult<Vec<String>> {
        if self.fail {
            return Err(ConnectorError::directory_access("posix group search failed"));
        }
        self.posix_lookups.lock().unwrap().push(refs.clone());

        let groups: BTreeSet<String> = refs
            .iter()
            .filter_map(|r| self.posix_by_ref.get(r))
            .flatten()
            .cloned()
            .collect();
        Ok(groups.into_iter().collect())
    }
}

/// AD-like schema: `user` accounts and `group` groups.
///
/// The password is readable so it may be requested explicitly, but it is
/// never returned by default. `thumbnailPhoto` is write-only.
pub fn sample_schema() -> Schema {
    let user = ObjectClassInfo::new(ObjectClass::Account, "user")
        .with_attribute(AttributeInfo::native("sAMAccountName", AttributeDataType::String))
        .with_attribute(AttributeInfo::native("cn", AttributeDataType::String))
        .with_attribute(AttributeInfo::new("email", "mail", AttributeDataType::String))
        .with_attribute(
            AttributeInfo::native("memberOf", AttributeDataType::Dn)
                .multi_valued()
                .not_returned_by_default(),
        )
        .with_attribute(
            AttributeInfo::native("uSNChanged", AttributeDataType::Integer)
                .not_returned_by_default(),
        )
        .with_attribute(
            AttributeInfo::new(operational::PASSWORD, "unicodePwd", AttributeDataType::Secret)
                .not_returned_by_default(),
        )
        .with_attribute(
            AttributeInfo::native("thumbnailPhoto", AttributeDataType::Binary).write_only(),
        );

    let group = ObjectClassInfo::new(ObjectClass::Group, "group")
        .with_attribute(AttributeInfo::native("cn", AttributeDataType::String))
        .with_attribute(
            AttributeInfo::native("member", AttributeDataType::Dn)
                .multi_valued()
                .not_returned_by_default(),
        );

    Schema::new().with_object_class(user).with_object_class(group)
}

pub fn sample_config() -> AdConfig {
    AdConfig::new(BASE_DN).with_people_container(PEOPLE)
}

pub fn sample_mapping() -> SchemaBackedMapping {
    SchemaBackedMapping::new(sample_schema(), "objectGUID")
}

pub fn mapper_with_groups(groups: InMemoryGroups) -> AdMapper {
    init_test_logging();
    AdMapper::new(sample_config(), Arc::new(sample_mapping()), Arc::new(groups))
        .expect("sample config is valid")
}

pub fn sample_mapper() -> AdMapper {
    mapper_with_groups(InMemoryGroups::new())
}

/// An enabled account entry carrying a stored password hash.
pub fn jdoe_entry() -> DirectoryEntry {
    DirectoryEntry::new(BASE_DN, JDOE_DN)
        .with_binary_values("objectGUID", [vec![0xde, 0xad, 0xbe, 0xef]])
        .with_value("sAMAccountName", "jdoe")
        .with_value("cn", "John Doe")
        .with_value("mail", "jdoe@example.com")
        .with_value("uid", "jdoe")
        .with_value("userAccountControl", "512")
        .with_value("unicodePwd", "stored-secret")
}

pub fn names(items: &[&str]) -> AttributeNameSet {
    items.iter().copied().collect()
}
