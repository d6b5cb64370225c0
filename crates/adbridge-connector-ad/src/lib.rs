//! # Active Directory Mapping
//!
//! Turns Active Directory search results into identity objects.
//!
//! This crate sits between the LDAP search layer and the provisioning
//! framework. It decides which attributes a search must request and builds
//! identity objects from the entries that come back.
//!
//! ## Features
//!
//! - Logical and physical attribute-set resolution
//! - Virtual `ldapGroups` / `posixGroups` attributes
//! - `userAccountControl` decoding into the enabled flag
//! - Password placeholders that never expose stored values
//! - Tombstone objects for deleted entries
//! - RFC 4514 DN parsing and DN construction for new accounts
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use adbridge_connector_ad::{AdConfig, AdMapper, SchemaBackedMapping};
//! use adbridge_connector::prelude::*;
//!
//! let config = AdConfig::from_domain("example.com");
//! let mapping = SchemaBackedMapping::new(schema, &config.uid_attribute);
//! let mapper = AdMapper::new(config, Arc::new(mapping), Arc::new(groups))?;
//!
//! let logical = mapper.attributes_to_get(None, &ObjectClass::Account);
//! let physical = mapper.directory_attributes_to_get(&logical, &ObjectClass::Account)?;
//! // ... run the search with `physical` ...
//! let object = mapper.materialize_search_result(base_dn, entry, &logical, &ObjectClass::Account)?;
//! ```

pub mod attributes;
pub mod config;
pub mod dn;
pub mod mapper;
pub mod mapping;
pub mod materializer;
pub mod resolver;
pub mod search_entry;
pub mod user_account_control;

// Re-exports
pub use config::AdConfig;
pub use dn::{is_dn, parse_dn, DnParseError, DnResolver};
pub use mapper::AdMapper;
pub use mapping::SchemaBackedMapping;
pub use materializer::{EntryMaterializer, SynthesisContext, SynthesisRegistry, Synthesizer};
pub use resolver::AttributeResolver;
pub use search_entry::entry_from_search;
pub use user_account_control::{decode_enabled, UserAccountControl};
