//! Stateless HTTP request builder and response parser for the target-group API.
//!
//! # Design
//! `TargetGroupClient` holds only a `base_url` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. `ApiClient` glues the two halves to a `Transport`.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Lookup, TargetGroup, TargetGroupRequest};

const COLLECTION: &str = "target-groups";

/// Synchronous, stateless request builder for the target-group API.
#[derive(Debug, Clone)]
pub struct TargetGroupClient {
    base_url: String,
}

impl TargetGroupClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_target_groups(&self) -> HttpRequest {
        self.request(HttpMethod::Get, self.collection_url(), None)
    }

    pub fn build_get_target_group(&self, id: &str) -> HttpRequest {
        self.request(HttpMethod::Get, self.item_url(id), None)
    }

    pub fn build_create_target_group(
        &self,
        input: &TargetGroupRequest,
    ) -> Result<HttpRequest, ApiError> {
        let body = encode(input)?;
        Ok(self.request(HttpMethod::Post, self.collection_url(), Some(body)))
    }

    pub fn build_update_target_group(
        &self,
        id: &str,
        input: &TargetGroupRequest,
    ) -> Result<HttpRequest, ApiError> {
        let body = encode(input)?;
        Ok(self.request(HttpMethod::Put, self.item_url(id), Some(body)))
    }

    pub fn build_delete_target_group(&self, id: &str) -> HttpRequest {
        self.request(HttpMethod::Delete, self.item_url(id), None)
    }

    pub fn parse_list_target_groups(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<TargetGroup>, ApiError> {
        check_status(&response)?;
        decode(&response)
    }

    /// A 404 here means the group is gone, which is `Lookup::NotFound`
    /// rather than an error.
    pub fn parse_get_target_group(
        &self,
        response: HttpResponse,
    ) -> Result<Lookup<TargetGroup>, ApiError> {
        if response.status == 404 {
            return Ok(Lookup::NotFound);
        }
        check_status(&response)?;
        decode(&response).map(Lookup::Found)
    }

    pub fn parse_create_target_group(&self, response: HttpResponse) -> Result<TargetGroup, ApiError> {
        check_status(&response)?;
        decode(&response)
    }

    pub fn parse_update_target_group(&self, response: HttpResponse) -> Result<TargetGroup, ApiError> {
        check_status(&response)?;
        decode(&response)
    }

    pub fn parse_delete_target_group(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    fn collection_url(&self) -> String {
        format!("{}/{COLLECTION}", self.base_url)
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/{COLLECTION}/{}", self.base_url, urlencoding::encode(id))
    }

    fn request(&self, method: HttpMethod, path: String, body: Option<String>) -> HttpRequest {
        let mut headers = vec![("accept".to_string(), "application/json".to_string())];
        if body.is_some() {
            headers.push(("content-type".to_string(), "application/json".to_string()));
        }
        HttpRequest {
            method,
            path,
            headers,
            body,
        }
    }
}

/// Map non-2xx status codes to `ApiError::HttpError`.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::from_response(response.status, &response.body))
}

fn encode(input: &TargetGroupRequest) -> Result<String, ApiError> {
    serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}
