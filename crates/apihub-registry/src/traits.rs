//! Registry traits for the migration tooling.
//!
//! This module defines the contract a registry backend must implement.

use async_trait::async_trait;

use apihub_core::{PropertySet, Tenant};

use crate::error::RegistryError;
use crate::types::{ApiArtifactEntry, RegistryResource};

/// The registry store a migration runs against.
///
/// Implementations must be thread-safe (`Send + Sync`). Reads return
/// `Ok(None)` (or `Ok(false)`) for missing resources; errors are reserved for
/// infrastructure failures.
///
/// # Example
///
/// ```ignore
/// use apihub_registry::{RegistryStore, RegistryError};
///
/// async fn properties_at(
///     store: &dyn RegistryStore,
///     tenant: &Tenant,
///     path: &str,
/// ) -> Result<Option<PropertySet>, RegistryError> {
///     Ok(store.get_resource(tenant, path).await?.map(|r| r.properties))
/// }
/// ```
#[async_trait]
pub trait RegistryStore: Send + Sync {
    /// Lists all published API artifacts for a tenant, each paired with the
    /// storage path of its backing resource.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::UnknownTenant` if the tenant does not exist in
    /// the backend, or an infrastructure error.
    async fn list_api_artifacts(
        &self,
        tenant: &Tenant,
    ) -> Result<Vec<ApiArtifactEntry>, RegistryError>;

    /// Returns whether a resource exists at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error only for infrastructure issues.
    async fn resource_exists(&self, tenant: &Tenant, path: &str) -> Result<bool, RegistryError>;

    /// Reads the resource at the given path.
    ///
    /// Returns `None` if the resource does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error only for infrastructure issues, not for missing
    /// resources.
    async fn get_resource(
        &self,
        tenant: &Tenant,
        path: &str,
    ) -> Result<Option<RegistryResource>, RegistryError>;

    /// Replaces the properties of the resource at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    async fn put_resource(
        &self,
        tenant: &Tenant,
        path: &str,
        properties: PropertySet,
    ) -> Result<(), RegistryError>;

    /// Returns the name of this backend for logging/debugging.
    fn backend_name(&self) -> &'static str;
}

/// Enumerates the tenants a migration may process.
#[async_trait]
pub trait TenantDirectory: Send + Sync {
    /// Returns all tenants known to the hub, in processing order.
    ///
    /// # Errors
    ///
    /// Returns an error if the tenant roster cannot be read; the caller
    /// treats this as fatal.
    async fn tenants(&self) -> Result<Vec<Tenant>, RegistryError>;
}
