//! Executes `HttpRequest` values against the network.
//!
//! # Design
//! `Transport` is the seam between the pure request/response mapping and real
//! I/O. `UreqTransport` is the production implementation; tests substitute
//! in-memory fakes. Status codes are returned as data (never as `Err`) so the
//! client alone decides what a 404 means.

use std::sync::Arc;
use std::time::Duration;

use ureq::typestate::WithBody;
use ureq::RequestBuilder;

use crate::config::ClientConfig;
use crate::context::CallContext;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Performs one HTTP round trip.
pub trait Transport: Send + Sync {
    fn execute(&self, ctx: &CallContext, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn execute(&self, ctx: &CallContext, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(ctx, request)
    }
}

/// Blocking transport backed by `ureq`.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
    timeout: Duration,
    default_headers: Vec<(String, String)>,
}

impl UreqTransport {
    pub fn new(config: &ClientConfig) -> Self {
        let mut default_headers = vec![("user-agent".to_string(), config.user_agent.clone())];
        if let Some(token) = &config.token {
            default_headers.push((ClientConfig::TOKEN_HEADER.to_string(), token.clone()));
        }
        Self {
            agent: agent_with_timeout(config.timeout),
            timeout: config.timeout,
            default_headers,
        }
    }

    fn send(
        &self,
        agent: &ureq::Agent,
        request: &HttpRequest,
    ) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
        let headers = self.default_headers.iter().chain(request.headers.iter());
        match request.method {
            HttpMethod::Get => with_headers(agent.get(&request.path), headers).call(),
            HttpMethod::Delete => with_headers(agent.delete(&request.path), headers).call(),
            HttpMethod::Post => {
                send_body(with_headers(agent.post(&request.path), headers), request.body.as_deref())
            }
            HttpMethod::Put => {
                send_body(with_headers(agent.put(&request.path), headers), request.body.as_deref())
            }
        }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, ctx: &CallContext, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        ctx.check()?;

        // A deadline tighter than the configured timeout needs its own agent.
        let scoped;
        let (agent, bounded_by_deadline) = match ctx.remaining() {
            Some(remaining) if remaining < self.timeout => {
                scoped = agent_with_timeout(remaining);
                (&scoped, true)
            }
            _ => (&self.agent, false),
        };

        tracing::debug!(method = %request.method, path = %request.path, "sending request");
        let mut response = self
            .send(agent, &request)
            .map_err(|e| transport_error(ctx, bounded_by_deadline, e))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| transport_error(ctx, bounded_by_deadline, e))?;
        tracing::debug!(method = %request.method, path = %request.path, status, "received response");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn agent_with_timeout(timeout: Duration) -> ureq::Agent {
    ureq::Agent::config_builder()
        .http_status_as_error(false)
        .timeout_global(Some(timeout))
        .build()
        .new_agent()
}

fn with_headers<'a, B>(
    builder: RequestBuilder<B>,
    headers: impl Iterator<Item = &'a (String, String)>,
) -> RequestBuilder<B> {
    headers.fold(builder, |builder, (name, value)| {
        builder.header(name.as_str(), value.as_str())
    })
}

fn send_body(
    builder: RequestBuilder<WithBody>,
    body: Option<&str>,
) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    match body {
        Some(body) => builder.send(body.as_bytes()),
        None => builder.send_empty(),
    }
}

/// A timeout is `DeadlineExceeded` only when the caller's deadline was the
/// limit in force or has since run out; otherwise the configured timeout
/// fired and it is a plain transport failure.
fn transport_error(ctx: &CallContext, bounded_by_deadline: bool, err: ureq::Error) -> ApiError {
    match err {
        ureq::Error::Timeout(_) if bounded_by_deadline || deadline_expired(ctx) => {
            ApiError::DeadlineExceeded
        }
        other => ApiError::TransportError(other.to_string()),
    }
}

fn deadline_expired(ctx: &CallContext) -> bool {
    ctx.remaining() == Some(Duration::ZERO)
}
