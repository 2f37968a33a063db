use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Developer-portal visibility of a published API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreVisibility {
    Public,
    Restricted,
    Private,
}

impl StoreVisibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Restricted => "restricted",
            Self::Private => "private",
        }
    }
}

impl fmt::Display for StoreVisibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoreVisibility {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(Self::Public),
            "restricted" => Ok(Self::Restricted),
            "private" => Ok(Self::Private),
            other => Err(CoreError::invalid_visibility(other)),
        }
    }
}

/// A published API description artifact as listed by the governance registry.
///
/// The two `overview_*` attributes keep their registry wire names so artifact
/// payloads round-trip against older hub versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiArtifact {
    pub name: String,
    pub version: String,
    pub provider: String,
    #[serde(rename = "overview_visibility")]
    pub visibility: StoreVisibility,
    #[serde(rename = "overview_visibleRoles", default)]
    pub visible_roles: String,
}

impl ApiArtifact {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        provider: impl Into<String>,
        visibility: StoreVisibility,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            provider: provider.into(),
            visibility,
            visible_roles: String::new(),
        }
    }

    pub fn with_visible_roles(mut self, roles: impl Into<String>) -> Self {
        self.visible_roles = roles.into();
        self
    }

    pub fn is_public(&self) -> bool {
        matches!(self.visibility, StoreVisibility::Public)
    }
}

impl fmt::Display for ApiArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.provider, self.name, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_visibility_roundtrip() {
        for visibility in [
            StoreVisibility::Public,
            StoreVisibility::Restricted,
            StoreVisibility::Private,
        ] {
            let parsed: StoreVisibility = visibility.as_str().parse().unwrap();
            assert_eq!(parsed, visibility);
        }
    }

    #[test]
    fn test_visibility_rejects_unknown_value() {
        let err = "internal".parse::<StoreVisibility>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid store visibility: internal");
    }

    #[test]
    fn test_visibility_serializes_lowercase() {
        let json = serde_json::to_string(&StoreVisibility::Restricted).unwrap();
        assert_eq!(json, "\"restricted\"");
    }

    #[test]
    fn test_artifact_wire_names() {
        let artifact = ApiArtifact::new("Storefront", "1.0.0", "admin", StoreVisibility::Restricted)
            .with_visible_roles("Internal/Dev");

        let value = serde_json::to_value(&artifact).unwrap();
        assert_eq!(value["overview_visibility"], "restricted");
        assert_eq!(value["overview_visibleRoles"], "Internal/Dev");
    }

    #[test]
    fn test_artifact_visible_roles_defaults_empty() {
        let artifact: ApiArtifact = serde_json::from_value(json!({
            "name": "Orders",
            "version": "2.1.0",
            "provider": "ops",
            "overview_visibility": "public"
        }))
        .unwrap();

        assert!(artifact.is_public());
        assert_eq!(artifact.visible_roles, "");
    }

    #[test]
    fn test_artifact_display() {
        let artifact = ApiArtifact::new("Orders", "2.1.0", "ops", StoreVisibility::Private);
        assert_eq!(artifact.to_string(), "ops/Orders/2.1.0");
    }
}
