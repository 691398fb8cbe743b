//! Bidirectional mapping between declarative keys and typed struct fields.
//!
//! A `FieldTable` pairs every configurable schema attribute with a getter on
//! the response entity and a setter on the request payload. The table is
//! checked against the schema once, when the resource is built, so a typo in
//! a key fails at configure time instead of silently dropping a field.

use std::collections::BTreeSet;

use crate::error::ProviderError;
use crate::schema::{Schema, SchemaError};
use crate::state::ResourceData;

/// One string attribute. `read` pulls the value out of the entity `E`,
/// `write` stores it into the request `R`.
pub struct StringField<E, R> {
    pub key: &'static str,
    pub read: fn(&E) -> Option<&str>,
    pub write: fn(&mut R, Option<String>),
}

pub struct FieldTable<E, R> {
    fields: Vec<StringField<E, R>>,
}

impl<E, R: Default> FieldTable<E, R> {
    pub fn new(fields: Vec<StringField<E, R>>) -> Self {
        Self { fields }
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|field| field.key)
    }

    /// Every configurable attribute must be mapped exactly once, and every
    /// mapping must name a configurable attribute.
    pub fn validate(&self, schema: &Schema) -> Result<(), SchemaError> {
        let mut seen = BTreeSet::new();
        for field in &self.fields {
            match schema.attribute(field.key) {
                Some(attribute) if !attribute.computed => {}
                _ => return Err(SchemaError::UnknownField(field.key.to_string())),
            }
            if !seen.insert(field.key) {
                return Err(SchemaError::DuplicateField(field.key.to_string()));
            }
        }
        for (name, attribute) in schema.attributes() {
            if !attribute.computed && !seen.contains(name) {
                return Err(SchemaError::UnmappedAttribute(name.to_string()));
            }
        }
        Ok(())
    }

    /// Build a request from declarative state. Empty strings count as unset.
    pub fn to_request(&self, data: &ResourceData) -> Result<R, ProviderError> {
        let mut request = R::default();
        for field in &self.fields {
            let value = data.get_str(field.key).filter(|v| !v.is_empty());
            let required = data
                .schema()
                .attribute(field.key)
                .is_some_and(|attribute| attribute.required);
            if required && value.is_none() {
                return Err(ProviderError::MissingAttribute(field.key.to_string()));
            }
            (field.write)(&mut request, value.map(str::to_string));
        }
        Ok(request)
    }

    /// Copy the entity into state field by field. The first field that
    /// cannot be written aborts with its cause.
    pub fn apply(&self, entity: &E, data: &mut ResourceData) -> Result<(), ProviderError> {
        for field in &self.fields {
            let value = (field.read)(entity)
                .filter(|v| !v.is_empty())
                .map(str::to_string);
            data.set_str(field.key, value)
                .map_err(|source| ProviderError::State {
                    key: field.key.to_string(),
                    source,
                })?;
        }
        Ok(())
    }
}
