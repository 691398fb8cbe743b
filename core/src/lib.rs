//! Synchronous API client for Warpgate target groups.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network, then executes them through a pluggable `Transport`
//! (`UreqTransport` in production).
//!
//! # Design
//! - `TargetGroupClient` is stateless; it holds only `base_url`.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - `ApiClient` pairs the two halves with a transport and a `CallContext`
//!   for cancellation and deadlines.
//! - A 404 on read is `Lookup::NotFound`, never an error.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use api::ApiClient;
pub use client::TargetGroupClient;
pub use config::ClientConfig;
pub use context::CallContext;
pub use error::{ApiError, ErrorKind};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use types::{Lookup, TargetGroup, TargetGroupRequest, COLOR_PALETTE};
