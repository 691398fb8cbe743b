//! The lifecycle contract between the host engine and a resource type.

use std::sync::Arc;

use warpgate_core::CallContext;

use crate::error::ProviderError;
use crate::schema::Schema;
use crate::state::ResourceData;

/// One managed resource type.
///
/// The host engine drives each instance through create, read, update and
/// delete; every callback performs at most one API round trip and mutates
/// `data` in place. A callback that fails leaves `data` as it was before the
/// call, except that `read` may have written some fields before aborting.
pub trait Resource: Send + Sync {
    /// Name the host uses to address this type, e.g. `warpgate_target_group`.
    fn type_name(&self) -> &'static str;

    fn schema(&self) -> Arc<Schema>;

    /// Absent -> Present. Stores the server-assigned id.
    fn create(&self, ctx: &CallContext, data: &mut ResourceData) -> Result<(), ProviderError>;

    /// Refresh from the server. A resource deleted out of band is cleared
    /// from `data` without an error.
    fn read(&self, ctx: &CallContext, data: &mut ResourceData) -> Result<(), ProviderError>;

    /// Push changed configuration. The id never changes.
    fn update(&self, ctx: &CallContext, data: &mut ResourceData) -> Result<(), ProviderError>;

    /// Present -> Absent. Clears `data` only once the server confirms.
    fn delete(&self, ctx: &CallContext, data: &mut ResourceData) -> Result<(), ProviderError>;

    /// Adopt an existing remote object. The default treats the raw id as the
    /// whole state key; the host is expected to follow up with `read`.
    fn import(&self, _ctx: &CallContext, id: &str) -> Result<ResourceData, ProviderError> {
        let schema = self.schema();
        if !schema.is_importable() {
            return Err(ProviderError::NotImportable(self.type_name().to_string()));
        }
        if id.trim().is_empty() {
            return Err(ProviderError::EmptyImportId);
        }
        let mut data = ResourceData::new(schema);
        data.set_id(id);
        Ok(data)
    }
}

/// The id of an instance that must already exist.
pub(crate) fn require_id(data: &ResourceData) -> Result<String, ProviderError> {
    data.id().map(str::to_string).ok_or(ProviderError::MissingId)
}
