//! Data types exchanged with registry backends.

use apihub_core::{ApiArtifact, PropertySet};
use serde::{Deserialize, Serialize};

/// A registry resource: a storage path plus the string properties attached
/// to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryResource {
    /// Storage path of the resource.
    pub path: String,
    /// Properties attached to the resource.
    pub properties: PropertySet,
}

impl RegistryResource {
    /// Creates a new `RegistryResource`.
    #[must_use]
    pub fn new(path: impl Into<String>, properties: PropertySet) -> Self {
        Self {
            path: path.into(),
            properties,
        }
    }
}

/// One element of a per-tenant artifact listing: the artifact together with
/// the storage path of the resource that backs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiArtifactEntry {
    /// Path of the registry resource backing the artifact.
    #[serde(rename = "resourcePath")]
    pub resource_path: String,
    /// The artifact itself.
    pub artifact: ApiArtifact,
}

impl ApiArtifactEntry {
    /// Creates a new `ApiArtifactEntry`.
    #[must_use]
    pub fn new(resource_path: impl Into<String>, artifact: ApiArtifact) -> Self {
        Self {
            resource_path: resource_path.into(),
            artifact,
        }
    }
}
