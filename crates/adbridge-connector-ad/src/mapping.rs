//! Schema-backed attribute mapping
//!
//! A [`SchemaMapping`] driven by a static [`Schema`]: logical names map to
//! the native names declared in the schema, values are typed by the declared
//! data type, the UID comes from the configured identifier attribute and the
//! name is the entry DN.

use base64::Engine;
use tracing::debug;

use adbridge_connector::entry::{DirectoryEntry, EntryValue};
use adbridge_connector::error::{ConnectorError, ConnectorResult};
use adbridge_connector::names::AttributeNameSet;
use adbridge_connector::object::{Attribute, AttributeValue, Name, Uid};
use adbridge_connector::operational;
use adbridge_connector::schema::{
    AttributeDataType, AttributeInfo, ObjectClass, ObjectClassInfo, Schema,
};
use adbridge_connector::secret::GuardedString;
use adbridge_connector::traits::SchemaMapping;

/// [`SchemaMapping`] over a fixed schema.
#[derive(Debug, Clone)]
pub struct SchemaBackedMapping {
    schema: Schema,
    uid_attribute: String,
}

impl SchemaBackedMapping {
    /// Create a mapping over `schema`, reading UIDs from `uid_attribute`.
    pub fn new(schema: Schema, uid_attribute: impl Into<String>) -> Self {
        Self {
            schema,
            uid_attribute: uid_attribute.into(),
        }
    }

    /// The underlying schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    fn info(&self, object_class: &ObjectClass) -> Option<&ObjectClassInfo> {
        self.schema.find_object_class_info(object_class)
    }

    fn attribute_info(&self, object_class: &ObjectClass, name: &str) -> Option<&AttributeInfo> {
        self.info(object_class).and_then(|info| info.attribute(name))
    }

    fn typed_value(
        &self,
        object_class: &ObjectClass,
        logical_name: &str,
        data_type: AttributeDataType,
        value: &EntryValue,
    ) -> ConnectorResult<AttributeValue> {
        match data_type {
            AttributeDataType::String | AttributeDataType::Dn => {
                value.to_text(logical_name).map(AttributeValue::String)
            }
            AttributeDataType::Binary => Ok(AttributeValue::Binary(value.as_bytes().to_vec())),
            AttributeDataType::Integer => {
                let text = value.to_text(logical_name)?;
                text.trim().parse::<i64>().map(AttributeValue::Integer).map_err(|e| {
                    ConnectorError::schema_mapping(
                        logical_name,
                        object_class.as_str(),
                        format!("'{text}' is not an integer: {e}"),
                    )
                })
            }
            AttributeDataType::Boolean => {
                let text = value.to_text(logical_name)?;
                if text.eq_ignore_ascii_case("TRUE") {
                    Ok(AttributeValue::Boolean(true))
                } else if text.eq_ignore_ascii_case("FALSE") {
                    Ok(AttributeValue::Boolean(false))
                } else {
                    Err(ConnectorError::schema_mapping(
                        logical_name,
                        object_class.as_str(),
                        format!("'{text}' is not a boolean"),
                    ))
                }
            }
            AttributeDataType::Secret => Ok(AttributeValue::Secret(GuardedString::empty())),
        }
    }
}

impl SchemaMapping for SchemaBackedMapping {
    fn is_returned_by_default(&self, object_class: &ObjectClass, attribute: &str) -> bool {
        self.attribute_info(object_class, attribute)
            .is_some_and(|a| a.returned_by_default)
    }

    fn is_readable(&self, object_class: &ObjectClass, attribute: &str) -> bool {
        self.attribute_info(object_class, attribute)
            .map_or(true, |a| a.readable)
    }

    fn attribute_names(&self, object_class: &ObjectClass) -> AttributeNameSet {
        self.info(object_class)
            .map(|info| info.attribute_names().collect())
            .unwrap_or_default()
    }

    fn to_physical_names(
        &self,
        object_class: &ObjectClass,
        logical_names: &AttributeNameSet,
    ) -> ConnectorResult<AttributeNameSet> {
        let info = self.info(object_class);
        if info.is_none() && !object_class.is_any() {
            return Err(ConnectorError::ObjectClassNotFound {
                object_class: object_class.to_string(),
            });
        }

        let mut result = AttributeNameSet::new();
        for name in logical_names.iter() {
            if operational::is_named(name, operational::UID) {
                result.insert(self.uid_attribute.as_str());
                continue;
            }

            match info.and_then(|info| info.attribute(name)) {
                Some(attribute) => {
                    result.insert(attribute.native_name.as_str());
                }
                // The DN comes back with every entry; enable/password have no
                // physical form of their own unless the schema declares one.
                None if operational::is_operational(name) => {}
                None => {
                    result.insert(name);
                }
            }
        }
        Ok(result)
    }

    fn entry_to_uid(
        &self,
        object_class: &ObjectClass,
        entry: &DirectoryEntry,
    ) -> ConnectorResult<Uid> {
        let value = entry
            .values(&self.uid_attribute)
            .and_then(<[EntryValue]>::first)
            .ok_or_else(|| {
                ConnectorError::schema_mapping(
                    self.uid_attribute.as_str(),
                    object_class.as_str(),
                    format!("entry '{}' has no identifier value", entry.dn()),
                )
            })?;

        let uid = match value {
            EntryValue::Binary(bytes) => base64::engine::general_purpose::STANDARD.encode(bytes),
            EntryValue::Text(text) => text.clone(),
        };

        if uid.is_empty() {
            return Err(ConnectorError::schema_mapping(
                self.uid_attribute.as_str(),
                object_class.as_str(),
                format!("entry '{}' has an empty identifier", entry.dn()),
            ));
        }
        Ok(Uid::new(uid))
    }

    fn entry_to_name(
        &self,
        _object_class: &ObjectClass,
        entry: &DirectoryEntry,
    ) -> ConnectorResult<Name> {
        if entry.dn().is_empty() {
            return Err(ConnectorError::InvalidData {
                message: "entry has no distinguished name".to_string(),
            });
        }
        Ok(Name::new(entry.dn()))
    }

    fn build_attribute(
        &self,
        object_class: &ObjectClass,
        logical_name: &str,
        entry: &DirectoryEntry,
    ) -> ConnectorResult<Option<Attribute>> {
        if operational::is_named(logical_name, operational::NAME)
            || operational::is_named(logical_name, operational::UID)
        {
            return Ok(None);
        }

        let (native_name, data_type) = match self.attribute_info(object_class, logical_name) {
            Some(info) => (info.native_name.as_str(), info.data_type),
            None => (logical_name, AttributeDataType::String),
        };

        let Some(values) = entry.values(native_name) else {
            return Ok(None);
        };

        let values = values
            .iter()
            .map(|v| self.typed_value(object_class, logical_name, data_type, v))
            .collect::<ConnectorResult<Vec<_>>>()?;

        debug!(
            attribute = %logical_name,
            native_name = %native_name,
            count = values.len(),
            "Built attribute from entry"
        );
        Ok(Some(Attribute::new(logical_name, values)))
    }
}
