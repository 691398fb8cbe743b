//! Declarative-state adapter for Warpgate target groups.
//!
//! # Overview
//! A host reconciliation engine calls four lifecycle callbacks (create, read,
//! update, delete) plus import on each managed instance. This crate turns
//! those calls into `warpgate-core` API requests and maps typed responses
//! back into flat declarative state.
//!
//! # Design
//! - `Resource` is the per-type lifecycle trait; `Provider` is the registry.
//! - `Schema` describes configurable attributes; `ResourceData` is the
//!   per-instance property map, checked against the schema on every write.
//! - `FieldTable` is the explicit key <-> struct-field mapping, validated
//!   against the schema when the provider is configured.
//! - A target group deleted out of band is cleared from state on read
//!   instead of failing.

pub mod error;
pub mod logging;
pub mod mapping;
pub mod provider;
pub mod resource;
pub mod schema;
pub mod state;
pub mod target_group;

#[cfg(test)]
mod testing;

pub use error::ProviderError;
pub use logging::{init_logging, try_init_logging};
pub use provider::Provider;
pub use resource::Resource;
pub use schema::{Attribute, AttributeType, Schema, SchemaError};
pub use state::{ResourceData, StateError};
pub use target_group::{TargetGroupResource, TYPE_NAME as TARGET_GROUP};
