//! Resource registry the host engine talks to.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;
use warpgate_core::{ApiClient, ClientConfig, Transport, UreqTransport};

use crate::error::ProviderError;
use crate::resource::Resource;
use crate::schema::Schema;
use crate::state::ResourceData;
use crate::target_group::TargetGroupResource;

/// A configured provider: one shared API client, every resource type
/// registered and its field mapping checked.
pub struct Provider {
    resources: BTreeMap<&'static str, Box<dyn Resource>>,
}

impl Provider {
    /// Connect to the API described by `config` over HTTP.
    pub fn configure(config: &ClientConfig) -> Result<Self, ProviderError> {
        tracing::info!(base_url = %config.base_url, "configuring warpgate provider");
        Self::with_transport(&config.base_url, UreqTransport::new(config))
    }

    pub fn with_transport<T>(base_url: &str, transport: T) -> Result<Self, ProviderError>
    where
        T: Transport + 'static,
    {
        let client = Arc::new(ApiClient::new(base_url, transport));
        let mut provider = Self {
            resources: BTreeMap::new(),
        };
        provider.register(TargetGroupResource::new(client)?);
        Ok(provider)
    }

    fn register(&mut self, resource: impl Resource + 'static) {
        tracing::debug!(type_name = resource.type_name(), "registered resource");
        self.resources.insert(resource.type_name(), Box::new(resource));
    }

    pub fn resource(&self, type_name: &str) -> Result<&dyn Resource, ProviderError> {
        self.resources
            .get(type_name)
            .map(|resource| resource.as_ref())
            .ok_or_else(|| ProviderError::UnknownResource(type_name.to_string()))
    }

    pub fn resource_types(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.resources.keys().copied()
    }

    pub fn schemas(&self) -> BTreeMap<&'static str, Arc<Schema>> {
        self.resources
            .iter()
            .map(|(name, resource)| (*name, resource.schema()))
            .collect()
    }

    /// Validate a configuration object and wrap it as state for `type_name`.
    pub fn resource_data(&self, type_name: &str, config: &Value) -> Result<ResourceData, ProviderError> {
        let schema = self.resource(type_name)?.schema();
        Ok(ResourceData::from_config(schema, config)?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use warpgate_core::CallContext;

    use super::*;
    use crate::schema::SchemaError;
    use crate::target_group::TYPE_NAME;
    use crate::testing::InMemoryWarpgate;

    fn provider() -> Provider {
        Provider::with_transport(InMemoryWarpgate::BASE_URL, InMemoryWarpgate::default()).unwrap()
    }

    #[test]
    fn registers_target_group() {
        let provider = provider();
        assert_eq!(provider.resource_types().collect::<Vec<_>>(), vec![TYPE_NAME]);
        let schemas = provider.schemas();
        assert!(schemas[TYPE_NAME].is_importable());
    }

    #[test]
    fn unknown_resource_type() {
        let err = provider().resource("warpgate_role").err().unwrap();
        assert_eq!(err.to_string(), r#"unknown resource type "warpgate_role""#);
    }

    #[test]
    fn resource_data_validates_config() {
        let err = provider()
            .resource_data(TYPE_NAME, &json!({"description": "no name"}))
            .unwrap_err();
        assert!(matches!(
            err,
            ProviderError::Schema(SchemaError::MissingRequired(ref name)) if name == "name"
        ));
    }

    #[test]
    fn dispatches_through_trait_object() {
        let provider = provider();
        let resource = provider.resource(TYPE_NAME).unwrap();
        let ctx = CallContext::background();
        let mut data = provider
            .resource_data(TYPE_NAME, &json!({"name": "prod", "color": "Danger"}))
            .unwrap();
        resource.create(&ctx, &mut data).unwrap();
        assert_eq!(data.id(), Some("g1"));
        resource.read(&ctx, &mut data).unwrap();
        assert_eq!(data.get_str("color"), Some("Danger"));
    }
}
