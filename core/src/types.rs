//! Domain DTOs for the target-group API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.

use serde::{Deserialize, Deserializer, Serialize};

/// Accent colors the Warpgate UI knows how to render. The API does not
/// enforce this list, and neither does the client.
pub const COLOR_PALETTE: [&str; 8] = [
    "Primary",
    "Secondary",
    "Success",
    "Danger",
    "Warning",
    "Info",
    "Light",
    "Dark",
];

/// A target group returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TargetGroup {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Request payload for creating or replacing a target group. The server
/// assigns the id, so it never appears here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TargetGroupRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl TargetGroupRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// Outcome of a lookup by id: 404 is an answer, not a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
}

impl<T> Lookup<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_omits_unset_optional_fields() {
        let json = serde_json::to_value(TargetGroupRequest::new("prod")).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "prod" }));
    }

    #[test]
    fn target_group_tolerates_missing_and_null_fields() {
        let group: TargetGroup =
            serde_json::from_str(r#"{"id":"g1","name":"prod","description":null}"#).unwrap();
        assert_eq!(group.description, "");
        assert!(group.color.is_none());
    }

    #[test]
    fn lookup_into_option() {
        assert_eq!(Lookup::Found(1).into_option(), Some(1));
        assert_eq!(Lookup::<i32>::NotFound.into_option(), None);
        assert!(!Lookup::<i32>::NotFound.is_found());
    }
}
