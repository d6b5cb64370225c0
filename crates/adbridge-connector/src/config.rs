//! Connector Framework configuration trait

use serde::{de::DeserializeOwned, Serialize};

use crate::error::ConnectorResult;

/// Trait for connector-specific configuration.
///
/// Each connector implements this trait to define its validation rules.
pub trait ConnectorConfig: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// Validate the configuration.
    ///
    /// Returns an error if the configuration is invalid.
    fn validate(&self) -> ConnectorResult<()>;

    /// Parse and validate a configuration from JSON.
    fn from_json(json: &str) -> ConnectorResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
