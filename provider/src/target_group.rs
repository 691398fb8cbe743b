//! `warpgate_target_group`: a named grouping of access targets.

use std::sync::Arc;

use warpgate_core::{
    ApiClient, CallContext, Lookup, TargetGroup, TargetGroupRequest, Transport, COLOR_PALETTE,
};

use crate::error::ProviderError;
use crate::mapping::{FieldTable, StringField};
use crate::resource::{require_id, Resource};
use crate::schema::{Attribute, Schema, SchemaError};
use crate::state::ResourceData;

pub const TYPE_NAME: &str = "warpgate_target_group";

pub fn schema() -> Schema {
    Schema::new()
        .with_attribute(
            "id",
            Attribute::computed_string().with_description("Server-assigned id of the target group"),
        )
        .with_attribute(
            "name",
            Attribute::required_string().with_description("The name of the target group"),
        )
        .with_attribute(
            "description",
            Attribute::optional_string().with_description("The description of the target group"),
        )
        .with_attribute(
            "color",
            Attribute::optional_string().with_description(format!(
                "The color that the target group should have. Valid values: {}",
                COLOR_PALETTE.join(", ")
            )),
        )
        .with_passthrough_import()
}

pub fn fields() -> FieldTable<TargetGroup, TargetGroupRequest> {
    FieldTable::new(vec![
        StringField {
            key: "name",
            read: group_name,
            write: request_name,
        },
        StringField {
            key: "description",
            read: group_description,
            write: request_description,
        },
        StringField {
            key: "color",
            read: group_color,
            write: request_color,
        },
    ])
}

fn group_name(group: &TargetGroup) -> Option<&str> {
    Some(group.name.as_str())
}

fn group_description(group: &TargetGroup) -> Option<&str> {
    Some(group.description.as_str())
}

fn group_color(group: &TargetGroup) -> Option<&str> {
    group.color.as_deref()
}

fn request_name(request: &mut TargetGroupRequest, value: Option<String>) {
    request.name = value.unwrap_or_default();
}

fn request_description(request: &mut TargetGroupRequest, value: Option<String>) {
    request.description = value;
}

fn request_color(request: &mut TargetGroupRequest, value: Option<String>) {
    request.color = value;
}

pub struct TargetGroupResource<T> {
    client: Arc<ApiClient<T>>,
    schema: Arc<Schema>,
    fields: FieldTable<TargetGroup, TargetGroupRequest>,
}

impl<T: Transport> TargetGroupResource<T> {
    /// Fails if the field table and schema disagree.
    pub fn new(client: Arc<ApiClient<T>>) -> Result<Self, SchemaError> {
        let schema = schema();
        let fields = fields();
        fields.validate(&schema)?;
        Ok(Self {
            client,
            schema: Arc::new(schema),
            fields,
        })
    }
}

impl<T: Transport> Resource for TargetGroupResource<T> {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Arc<Schema> {
        Arc::clone(&self.schema)
    }

    fn create(&self, ctx: &CallContext, data: &mut ResourceData) -> Result<(), ProviderError> {
        let request = self.fields.to_request(data)?;
        let group = self
            .client
            .create_target_group(ctx, &request)
            .map_err(|e| ProviderError::api("failed to create target group", e))?;
        tracing::info!(id = %group.id, name = %group.name, "created target group");
        data.set_id(group.id);
        Ok(())
    }

    fn read(&self, ctx: &CallContext, data: &mut ResourceData) -> Result<(), ProviderError> {
        let id = require_id(data)?;
        let lookup = self
            .client
            .get_target_group(ctx, &id)
            .map_err(|e| ProviderError::api("failed to read target group", e))?;
        match lookup {
            Lookup::Found(group) => self.fields.apply(&group, data),
            Lookup::NotFound => {
                tracing::warn!(%id, "target group no longer exists, removing from state");
                data.clear();
                Ok(())
            }
        }
    }

    // State is not refreshed from the response; the next read does that.
    fn update(&self, ctx: &CallContext, data: &mut ResourceData) -> Result<(), ProviderError> {
        let id = require_id(data)?;
        let request = self.fields.to_request(data)?;
        self.client
            .update_target_group(ctx, &id, &request)
            .map_err(|e| ProviderError::api("failed to update target group", e))?;
        tracing::info!(%id, name = %request.name, "updated target group");
        Ok(())
    }

    fn delete(&self, ctx: &CallContext, data: &mut ResourceData) -> Result<(), ProviderError> {
        let id = require_id(data)?;
        self.client
            .delete_target_group(ctx, &id)
            .map_err(|e| ProviderError::api("failed to delete target group", e))?;
        tracing::info!(%id, "deleted target group");
        data.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use warpgate_core::ApiError;

    use super::*;
    use crate::testing::InMemoryWarpgate;

    fn setup() -> (Arc<InMemoryWarpgate>, Arc<ApiClient<Arc<InMemoryWarpgate>>>, TargetGroupResource<Arc<InMemoryWarpgate>>) {
        let server = Arc::new(InMemoryWarpgate::default());
        let client = Arc::new(ApiClient::new(InMemoryWarpgate::BASE_URL, Arc::clone(&server)));
        let resource = TargetGroupResource::new(Arc::clone(&client)).unwrap();
        (server, client, resource)
    }

    fn config(resource: &TargetGroupResource<Arc<InMemoryWarpgate>>, value: serde_json::Value) -> ResourceData {
        ResourceData::from_config(resource.schema(), &value).unwrap()
    }

    #[test]
    fn schema_and_fields_agree() {
        assert!(fields().validate(&schema()).is_ok());
        let schema = schema();
        assert!(schema.attribute("name").unwrap().required);
        assert!(schema.attribute("id").unwrap().computed);
        assert!(schema
            .attribute("color")
            .unwrap()
            .description
            .contains("Primary, Secondary, Success, Danger, Warning, Info, Light, Dark"));
    }

    #[test]
    fn prod_scenario() {
        let (_, client, resource) = setup();
        let ctx = CallContext::background();

        let mut data = config(&resource, json!({"name": "prod", "color": "Danger"}));
        resource.create(&ctx, &mut data).unwrap();
        assert_eq!(data.id(), Some("g1"));

        let expected = TargetGroup {
            id: "g1".to_string(),
            name: "prod".to_string(),
            description: String::new(),
            color: Some("Danger".to_string()),
        };
        assert_eq!(client.get_target_group(&ctx, "g1").unwrap(), Lookup::Found(expected));

        resource.read(&ctx, &mut data).unwrap();
        assert_eq!(
            data.to_json(),
            json!({"id": "g1", "name": "prod", "description": null, "color": "Danger"})
        );

        resource.delete(&ctx, &mut data).unwrap();
        assert!(!data.is_present());
        assert_eq!(client.get_target_group(&ctx, "g1").unwrap(), Lookup::NotFound);
    }

    #[test]
    fn create_failure_leaves_instance_absent() {
        let (server, _, resource) = setup();
        server.fail_next(500, "database unavailable");
        let mut data = config(&resource, json!({"name": "prod"}));
        let err = resource
            .create(&CallContext::background(), &mut data)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to create target group: HTTP 500: database unavailable"
        );
        assert!(!data.is_present());
    }

    #[test]
    fn read_after_out_of_band_delete_clears_state() {
        let (_, client, resource) = setup();
        let ctx = CallContext::background();
        let mut data = config(&resource, json!({"name": "prod"}));
        resource.create(&ctx, &mut data).unwrap();

        client.delete_target_group(&ctx, "g1").unwrap();

        resource.read(&ctx, &mut data).unwrap();
        assert!(!data.is_present());
        assert_eq!(data.get_str("name"), None);
    }

    #[test]
    fn read_refreshes_drifted_fields() {
        let (_, client, resource) = setup();
        let ctx = CallContext::background();
        let mut data = config(&resource, json!({"name": "prod", "description": "hosts"}));
        resource.create(&ctx, &mut data).unwrap();

        client
            .update_target_group(&ctx, "g1", &TargetGroupRequest::new("renamed").with_color("Info"))
            .unwrap();

        resource.read(&ctx, &mut data).unwrap();
        assert_eq!(data.get_str("name"), Some("renamed"));
        assert_eq!(data.get_str("description"), None);
        assert_eq!(data.get_str("color"), Some("Info"));
    }

    #[test]
    fn update_keeps_id_and_read_returns_new_values() {
        let (_, _, resource) = setup();
        let ctx = CallContext::background();
        let mut data = config(&resource, json!({"name": "prod"}));
        resource.create(&ctx, &mut data).unwrap();

        let mut planned = config(
            &resource,
            json!({"name": "production", "description": "all prod hosts", "color": "Warning"}),
        );
        planned.set_id(data.id().unwrap());
        resource.update(&ctx, &mut planned).unwrap();
        assert_eq!(planned.id(), Some("g1"));

        resource.read(&ctx, &mut planned).unwrap();
        assert_eq!(planned.id(), Some("g1"));
        assert_eq!(planned.get_str("name"), Some("production"));
        assert_eq!(planned.get_str("description"), Some("all prod hosts"));
        assert_eq!(planned.get_str("color"), Some("Warning"));
    }

    #[test]
    fn update_does_not_copy_response_into_state() {
        let (server, _, resource) = setup();
        let ctx = CallContext::background();
        let mut data = config(&resource, json!({"name": "prod"}));
        resource.create(&ctx, &mut data).unwrap();

        server.normalize_names(true);
        let mut planned = config(&resource, json!({"name": "Staging"}));
        planned.set_id("g1");
        resource.update(&ctx, &mut planned).unwrap();
        assert_eq!(planned.get_str("name"), Some("Staging"));
    }

    #[test]
    fn operations_on_absent_instance_need_an_id() {
        let (_, _, resource) = setup();
        let ctx = CallContext::background();
        let mut data = config(&resource, json!({"name": "prod"}));
        assert!(matches!(resource.read(&ctx, &mut data), Err(ProviderError::MissingId)));
        assert!(matches!(resource.update(&ctx, &mut data), Err(ProviderError::MissingId)));
        assert!(matches!(resource.delete(&ctx, &mut data), Err(ProviderError::MissingId)));
    }

    #[test]
    fn delete_of_missing_group_is_an_error_and_keeps_state() {
        let (_, client, resource) = setup();
        let ctx = CallContext::background();
        let mut data = config(&resource, json!({"name": "prod"}));
        resource.create(&ctx, &mut data).unwrap();
        client.delete_target_group(&ctx, "g1").unwrap();

        let err = resource.delete(&ctx, &mut data).unwrap_err();
        assert!(matches!(
            err.api_error(),
            Some(ApiError::HttpError { status: 404, .. })
        ));
        assert_eq!(data.id(), Some("g1"));
    }

    #[test]
    fn cancelled_context_aborts_without_side_effects() {
        let (server, _, resource) = setup();
        let ctx = CallContext::background();
        ctx.cancel();
        let mut data = config(&resource, json!({"name": "prod"}));
        let err = resource.create(&ctx, &mut data).unwrap_err();
        assert!(matches!(err.api_error(), Some(ApiError::Cancelled)));
        assert_eq!(server.request_count(), 0);
        assert!(!data.is_present());
    }

    #[test]
    fn passthrough_import_then_read() {
        let (_, client, resource) = setup();
        let ctx = CallContext::background();
        client
            .create_target_group(&ctx, &TargetGroupRequest::new("legacy").with_description("adopted"))
            .unwrap();

        let mut data = resource.import(&ctx, "g1").unwrap();
        assert_eq!(data.id(), Some("g1"));
        assert_eq!(data.get_str("name"), None);

        resource.read(&ctx, &mut data).unwrap();
        assert_eq!(data.get_str("name"), Some("legacy"));
        assert_eq!(data.get_str("description"), Some("adopted"));
    }

    #[test]
    fn import_rejects_blank_id() {
        let (_, _, resource) = setup();
        let err = resource.import(&CallContext::background(), "  ").unwrap_err();
        assert!(matches!(err, ProviderError::EmptyImportId));
    }

    #[test]
    fn import_keeps_id_verbatim() {
        let (_, _, resource) = setup();
        let data = resource.import(&CallContext::background(), " g1 ").unwrap();
        assert_eq!(data.id(), Some(" g1 "));
    }
}
