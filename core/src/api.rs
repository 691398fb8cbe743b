//! Executing client: `TargetGroupClient` requests sent through a `Transport`.

use crate::client::TargetGroupClient;
use crate::config::ClientConfig;
use crate::context::CallContext;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::{Lookup, TargetGroup, TargetGroupRequest};

/// One HTTP round trip per call, no retries and no caching.
pub struct ApiClient<T = UreqTransport> {
    requests: TargetGroupClient,
    transport: T,
}

impl ApiClient<UreqTransport> {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.base_url, UreqTransport::new(config))
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            requests: TargetGroupClient::new(base_url),
            transport,
        }
    }

    pub fn requests(&self) -> &TargetGroupClient {
        &self.requests
    }

    pub fn list_target_groups(&self, ctx: &CallContext) -> Result<Vec<TargetGroup>, ApiError> {
        let response = self.round_trip(ctx, self.requests.build_list_target_groups())?;
        self.requests.parse_list_target_groups(response)
    }

    pub fn get_target_group(
        &self,
        ctx: &CallContext,
        id: &str,
    ) -> Result<Lookup<TargetGroup>, ApiError> {
        let response = self.round_trip(ctx, self.requests.build_get_target_group(id))?;
        self.requests.parse_get_target_group(response)
    }

    pub fn create_target_group(
        &self,
        ctx: &CallContext,
        input: &TargetGroupRequest,
    ) -> Result<TargetGroup, ApiError> {
        let request = self.requests.build_create_target_group(input)?;
        let response = self.round_trip(ctx, request)?;
        self.requests.parse_create_target_group(response)
    }

    pub fn update_target_group(
        &self,
        ctx: &CallContext,
        id: &str,
        input: &TargetGroupRequest,
    ) -> Result<TargetGroup, ApiError> {
        let request = self.requests.build_update_target_group(id, input)?;
        let response = self.round_trip(ctx, request)?;
        self.requests.parse_update_target_group(response)
    }

    pub fn delete_target_group(&self, ctx: &CallContext, id: &str) -> Result<(), ApiError> {
        let response = self.round_trip(ctx, self.requests.build_delete_target_group(id))?;
        self.requests.parse_delete_target_group(response)
    }

    fn round_trip(&self, ctx: &CallContext, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        ctx.check()?;
        let response = self.transport.execute(ctx, request)?;
        // Cancelled mid-flight: the server may have applied the change, but
        // the caller asked us to stop, so report that instead.
        if ctx.is_cancelled() {
            return Err(ApiError::Cancelled);
        }
        Ok(response)
    }
}
