//! Active Directory mapping configuration

use serde::{Deserialize, Serialize};

use adbridge_connector::config::ConnectorConfig;
use adbridge_connector::error::{ConnectorError, ConnectorResult};

use crate::attributes::DEFAULT_POSIX_REF_ATTRIBUTE;
use crate::dn::is_dn;

/// Configuration for the Active Directory mapping layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdConfig {
    /// Base DN of the directory (e.g., "dc=example,dc=com").
    pub base_dn: String,

    /// Container new user entries are created under (e.g., "ou=People,dc=example,dc=com").
    pub default_people_container: String,

    /// Container new group entries are created under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_group_container: Option<String>,

    /// Attribute used as the unique identifier.
    #[serde(default = "default_uid_attribute")]
    pub uid_attribute: String,

    /// Attribute POSIX groups use to reference their members.
    #[serde(default = "default_posix_ref_attribute")]
    pub posix_ref_attribute: String,
}

fn default_uid_attribute() -> String {
    "objectGUID".to_string()
}

fn default_posix_ref_attribute() -> String {
    DEFAULT_POSIX_REF_ATTRIBUTE.to_string()
}

impl AdConfig {
    /// Create a new config for a directory rooted at `base_dn`.
    ///
    /// New users default to `cn=Users,<base_dn>`.
    pub fn new(base_dn: impl Into<String>) -> Self {
        let base_dn = base_dn.into();
        Self {
            default_people_container: format!("cn=Users,{base_dn}"),
            base_dn,
            default_group_container: None,
            uid_attribute: default_uid_attribute(),
            posix_ref_attribute: default_posix_ref_attribute(),
        }
    }

    /// Create a config from an AD domain name.
    ///
    /// Derives `base_dn` from the domain (`example.com` -> `dc=example,dc=com`)
    /// and places both users and groups under `cn=Users`.
    #[must_use]
    pub fn from_domain(domain: &str) -> Self {
        let base_dn = domain
            .split('.')
            .map(|part| format!("dc={part}"))
            .collect::<Vec<_>>()
            .join(",");

        let users = format!("cn=Users,{base_dn}");
        Self::new(base_dn).with_group_container(users)
    }

    /// Set the container new users are created under.
    pub fn with_people_container(mut self, container: impl Into<String>) -> Self {
        self.default_people_container = container.into();
        self
    }

    /// Set the container new groups are created under.
    pub fn with_group_container(mut self, container: impl Into<String>) -> Self {
        self.default_group_container = Some(container.into());
        self
    }

    /// Set the unique identifier attribute.
    pub fn with_uid_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.uid_attribute = attribute.into();
        self
    }

    /// Set the POSIX member reference attribute.
    pub fn with_posix_ref_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.posix_ref_attribute = attribute.into();
        self
    }
}

impl ConnectorConfig for AdConfig {
    fn validate(&self) -> ConnectorResult<()> {
        if !is_dn(&self.base_dn) {
            return Err(ConnectorError::invalid_configuration(format!(
                "base_dn is not a valid DN: '{}'",
                self.base_dn
            )));
        }

        if !is_dn(&self.default_people_container) {
            return Err(ConnectorError::invalid_configuration(format!(
                "default_people_container is not a valid DN: '{}'",
                self.default_people_container
            )));
        }

        if let Some(container) = &self.default_group_container {
            if !is_dn(container) {
                return Err(ConnectorError::invalid_configuration(format!(
                    "default_group_container is not a valid DN: '{container}'"
                )));
            }
        }

        if self.uid_attribute.is_empty() {
            return Err(ConnectorError::invalid_configuration(
                "uid_attribute is required",
            ));
        }

        if self.posix_ref_attribute.is_empty() {
            return Err(ConnectorError::invalid_configuration(
                "posix_ref_attribute is required",
            ));
        }

        Ok(())
    }
}
