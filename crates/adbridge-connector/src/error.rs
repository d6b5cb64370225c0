//! Connector Framework error types
//!
//! Error definitions with transient/permanent classification.

use thiserror::Error;

/// Error that can occur while mapping directory data to identity objects.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// An attribute of a directory entry could not be read.
    #[error("directory access failed: {message}")]
    DirectoryAccess {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The schema mapping rejected an attribute name or value.
    #[error("schema mapping failed for attribute '{attribute}' in object class '{object_class}': {message}")]
    SchemaMapping {
        attribute: String,
        object_class: String,
        message: String,
    },

    /// Object class not found in schema.
    #[error("object class '{object_class}' not found in schema")]
    ObjectClassNotFound { object_class: String },

    /// Connector configuration is invalid.
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// Invalid data format.
    #[error("invalid data: {message}")]
    InvalidData { message: String },

    /// Serialization error.
    #[error("serialization error: {message}")]
    Serialization { message: String },
}

impl ConnectorError {
    /// Check if this error is transient and the operation may succeed when retried.
    ///
    /// Only directory access failures qualify; everything else points at bad
    /// data, bad configuration or a broken collaborator.
    pub fn is_transient(&self) -> bool {
        matches!(self, ConnectorError::DirectoryAccess { .. })
    }

    /// Check if this error is permanent and retry won't help.
    pub fn is_permanent(&self) -> bool {
        !self.is_transient()
    }

    /// Get an error code for classification.
    pub fn error_code(&self) -> &'static str {
        match self {
            ConnectorError::DirectoryAccess { .. } => "DIRECTORY_ACCESS",
            ConnectorError::SchemaMapping { .. } => "SCHEMA_MAPPING",
            ConnectorError::ObjectClassNotFound { .. } => "OBJECT_CLASS_NOT_FOUND",
            ConnectorError::InvalidConfiguration { .. } => "INVALID_CONFIG",
            ConnectorError::InvalidData { .. } => "INVALID_DATA",
            ConnectorError::Serialization { .. } => "SERIALIZATION_ERROR",
        }
    }

    // Convenience constructors

    /// Create a directory access error.
    pub fn directory_access(message: impl Into<String>) -> Self {
        ConnectorError::DirectoryAccess {
            message: message.into(),
            source: None,
        }
    }

    /// Create a directory access error with source.
    pub fn directory_access_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ConnectorError::DirectoryAccess {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a schema mapping error.
    pub fn schema_mapping(
        attribute: impl Into<String>,
        object_class: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        ConnectorError::SchemaMapping {
            attribute: attribute.into(),
            object_class: object_class.into(),
            message: message.into(),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        ConnectorError::InvalidConfiguration {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for ConnectorError {
    fn from(err: serde_json::Error) -> Self {
        ConnectorError::Serialization {
            message: err.to_string(),
        }
    }
}

/// Result type for connector operations.
pub type ConnectorResult<T> = Result<T, ConnectorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_access_is_transient() {
        let err = ConnectorError::directory_access("read failed");
        assert!(err.is_transient());
        assert!(!err.is_permanent());
    }

    #[test]
    fn test_permanent_errors() {
        let permanent_errors = vec![
            ConnectorError::schema_mapping("mail", "__ACCOUNT__", "bad value"),
            ConnectorError::ObjectClassNotFound {
                object_class: "printer".to_string(),
            },
            ConnectorError::invalid_configuration("missing base_dn"),
            ConnectorError::InvalidData {
                message: "test".to_string(),
            },
            ConnectorError::from(serde_json::from_str::<u32>("x").unwrap_err()),
        ];

        for err in permanent_errors {
            assert!(
                err.is_permanent(),
                "Expected {} to be permanent",
                err.error_code()
            );
        }
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            ConnectorError::directory_access("x").error_code(),
            "DIRECTORY_ACCESS"
        );
        assert_eq!(
            ConnectorError::schema_mapping("a", "b", "c").error_code(),
            "SCHEMA_MAPPING"
        );
    }

    #[test]
    fn test_error_display() {
        let err = ConnectorError::schema_mapping("uSNChanged", "__ACCOUNT__", "not an integer");
        assert_eq!(
            err.to_string(),
            "schema mapping failed for attribute 'uSNChanged' in object class '__ACCOUNT__': not an integer"
        );
    }

    #[test]
    fn test_error_with_source() {
        let source_err = std::io::Error::new(std::io::ErrorKind::InvalidData, "not utf-8");
        let err = ConnectorError::directory_access_with_source("failed", source_err);

        if let ConnectorError::DirectoryAccess { source, .. } = &err {
            assert!(source.is_some());
        } else {
            panic!("Expected DirectoryAccess variant");
        }
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ConnectorError = json_err.into();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }
}
