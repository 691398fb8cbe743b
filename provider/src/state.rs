//! Per-instance declarative state.
//!
//! `ResourceData` is what the host engine hands to each lifecycle callback:
//! the instance's id (absent until created or imported) and the flat map of
//! configured or refreshed attribute values. Every write is checked against
//! the resource schema.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::schema::{Schema, SchemaError};

const ID_KEY: &str = "id";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("no attribute named {0:?} in schema")]
    UnknownAttribute(String),

    #[error("attribute {0:?} is computed; set it through the id")]
    ComputedAttribute(String),
}

#[derive(Debug, Clone)]
pub struct ResourceData {
    schema: Arc<Schema>,
    id: Option<String>,
    values: BTreeMap<String, String>,
}

impl ResourceData {
    /// Empty, absent instance.
    pub fn new(schema: Arc<Schema>) -> Self {
        Self {
            schema,
            id: None,
            values: BTreeMap::new(),
        }
    }

    /// Build an instance from a host configuration object, validating it
    /// first. `null` values are treated as unset.
    pub fn from_config(schema: Arc<Schema>, config: &Value) -> Result<Self, SchemaError> {
        let object = config.as_object().ok_or(SchemaError::NotAnObject)?;
        schema.validate_config(object)?;
        let values = object
            .iter()
            .filter_map(|(key, value)| value.as_str().map(|v| (key.clone(), v.to_string())))
            .collect();
        Ok(Self {
            schema,
            id: None,
            values,
        })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    /// Mark the instance absent: no id, no values.
    pub fn clear(&mut self) {
        self.id = None;
        self.values.clear();
    }

    pub fn is_present(&self) -> bool {
        self.id.is_some()
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Write one attribute; `None` unsets it.
    pub fn set_str(&mut self, key: &str, value: Option<String>) -> Result<(), StateError> {
        let attribute = self
            .schema
            .attribute(key)
            .ok_or_else(|| StateError::UnknownAttribute(key.to_string()))?;
        if attribute.computed {
            return Err(StateError::ComputedAttribute(key.to_string()));
        }
        match value {
            Some(value) => {
                self.values.insert(key.to_string(), value);
            }
            None => {
                self.values.remove(key);
            }
        }
        Ok(())
    }

    /// The full state as a JSON object, id included. Unset attributes are
    /// `null`.
    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        for (name, _) in self.schema.attributes() {
            let value = if name == ID_KEY {
                self.id.clone()
            } else {
                self.values.get(name).cloned()
            };
            object.insert(name.to_string(), value.map_or(Value::Null, Value::String));
        }
        Value::Object(object)
    }
}
