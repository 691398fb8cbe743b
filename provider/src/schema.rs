//! Declarative schema for resource configuration.
//!
//! A `Schema` lists the attributes a resource accepts and whether each is
//! required, optional or computed by the provider. The host hands
//! configuration over as a JSON object; `Schema::validate_config` is the
//! gatekeeper between that loose map and typed request structs.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    String,
}

impl AttributeType {
    fn matches(self, value: &Value) -> bool {
        match self {
            AttributeType::String => value.is_string(),
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeType::String => f.write_str("string"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub kind: AttributeType,
    pub required: bool,
    pub computed: bool,
    pub description: String,
}

impl Attribute {
    pub fn required_string() -> Self {
        Self::string(true, false)
    }

    pub fn optional_string() -> Self {
        Self::string(false, false)
    }

    /// Set by the provider, never by configuration.
    pub fn computed_string() -> Self {
        Self::string(false, true)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    fn string(required: bool, computed: bool) -> Self {
        Self {
            kind: AttributeType::String,
            required,
            computed,
            description: String::new(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("configuration must be an object")]
    NotAnObject,

    #[error("unknown attribute {0:?}")]
    UnknownAttribute(String),

    #[error("attribute {0:?} is required")]
    MissingRequired(String),

    #[error("attribute {name:?} must be a {expected}")]
    TypeMismatch {
        name: String,
        expected: AttributeType,
    },

    #[error("attribute {0:?} is computed and cannot be configured")]
    ComputedAttribute(String),

    #[error("attribute {0:?} has no field mapping")]
    UnmappedAttribute(String),

    #[error("field mapping {0:?} does not match a configurable attribute")]
    UnknownField(String),

    #[error("attribute {0:?} is mapped more than once")]
    DuplicateField(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    attributes: BTreeMap<String, Attribute>,
    importable: bool,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.attributes.insert(name.into(), attribute);
        self
    }

    /// Accept the remote id verbatim as the import key.
    pub fn with_passthrough_import(mut self) -> Self {
        self.importable = true;
        self
    }

    pub fn is_importable(&self) -> bool {
        self.importable
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &Attribute)> {
        self.attributes.iter().map(|(name, attr)| (name.as_str(), attr))
    }

    /// Check a configuration object against the schema.
    ///
    /// `null` counts as unset, so an optional attribute may be `null` and a
    /// required one may not.
    pub fn validate_config(&self, config: &Map<String, Value>) -> Result<(), SchemaError> {
        for (name, value) in config {
            let attribute = self
                .attributes
                .get(name)
                .ok_or_else(|| SchemaError::UnknownAttribute(name.clone()))?;
            if value.is_null() {
                continue;
            }
            if attribute.computed {
                return Err(SchemaError::ComputedAttribute(name.clone()));
            }
            if !attribute.kind.matches(value) {
                return Err(SchemaError::TypeMismatch {
                    name: name.clone(),
                    expected: attribute.kind,
                });
            }
        }
        for (name, attribute) in &self.attributes {
            let set = config.get(name).is_some_and(|v| !v.is_null());
            if attribute.required && !set {
                return Err(SchemaError::MissingRequired(name.clone()));
            }
        }
        Ok(())
    }
}
