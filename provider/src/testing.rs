//! In-memory stand-in for the Warpgate admin API.

use std::collections::BTreeMap;
use std::sync::Mutex;

use serde_json::json;
use warpgate_core::{
    ApiError, CallContext, HttpMethod, HttpRequest, HttpResponse, TargetGroup, TargetGroupRequest,
    Transport,
};

/// Assigns ids `g1`, `g2`, ... in creation order.
#[derive(Default)]
pub struct InMemoryWarpgate {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    groups: BTreeMap<String, TargetGroup>,
    next_id: u32,
    requests: usize,
    fail_next: Option<(u16, String)>,
    normalize_names: bool,
}

impl InMemoryWarpgate {
    pub const BASE_URL: &'static str = "http://warpgate.test/api";

    /// Answer the next request with this status and message.
    pub fn fail_next(&self, status: u16, message: &str) {
        self.inner.lock().unwrap().fail_next = Some((status, message.to_string()));
    }

    /// Lowercase names in responses, so tests can tell response data from
    /// request data.
    pub fn normalize_names(&self, on: bool) {
        self.inner.lock().unwrap().normalize_names = on;
    }

    pub fn request_count(&self) -> usize {
        self.inner.lock().unwrap().requests
    }
}

fn respond(status: u16, body: serde_json::Value) -> HttpResponse {
    HttpResponse {
        status,
        headers: Vec::new(),
        body: if body.is_null() { String::new() } else { body.to_string() },
    }
}

fn not_found(id: &str) -> HttpResponse {
    respond(404, json!({ "message": format!("target group {id} not found") }))
}

impl Transport for InMemoryWarpgate {
    fn execute(&self, _ctx: &CallContext, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.requests += 1;
        if let Some((status, message)) = inner.fail_next.take() {
            return Ok(respond(status, json!({ "message": message })));
        }

        let rest = request
            .path
            .strip_prefix(Self::BASE_URL)
            .and_then(|p| p.strip_prefix("/target-groups"))
            .expect("request outside the target-group API");
        let id = rest.strip_prefix('/');
        let input = || -> TargetGroupRequest {
            serde_json::from_str(request.body.as_deref().unwrap_or_default()).unwrap()
        };

        let response = match (request.method, id) {
            (HttpMethod::Get, None) => {
                let all: Vec<&TargetGroup> = inner.groups.values().collect();
                respond(200, json!(all))
            }
            (HttpMethod::Post, None) => {
                let input = input();
                inner.next_id += 1;
                let group = TargetGroup {
                    id: format!("g{}", inner.next_id),
                    name: input.name,
                    description: input.description.unwrap_or_default(),
                    color: input.color,
                };
                inner.groups.insert(group.id.clone(), group.clone());
                respond(201, json!(group))
            }
            (HttpMethod::Get, Some(id)) => match inner.groups.get(id) {
                Some(group) => respond(200, json!(group)),
                None => respond(404, serde_json::Value::Null),
            },
            (HttpMethod::Put, Some(id)) => {
                if !inner.groups.contains_key(id) {
                    return Ok(not_found(id));
                }
                let input = input();
                let group = TargetGroup {
                    id: id.to_string(),
                    name: input.name,
                    description: input.description.unwrap_or_default(),
                    color: input.color,
                };
                inner.groups.insert(id.to_string(), group.clone());
                let mut echoed = group;
                if inner.normalize_names {
                    echoed.name = echoed.name.to_lowercase();
                }
                respond(200, json!(echoed))
            }
            (HttpMethod::Delete, Some(id)) => match inner.groups.remove(id) {
                Some(_) => respond(204, serde_json::Value::Null),
                None => not_found(id),
            },
            _ => respond(405, json!({ "message": "method not allowed" })),
        };
        Ok(response)
    }
}
