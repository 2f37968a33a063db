use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use papaya::HashMap as PapayaHashMap;
use tokio::sync::RwLock;

use apihub_core::{PropertySet, Tenant};
use apihub_registry::{
    ApiArtifactEntry, RegistryError, RegistryResource, RegistryStore, TenantDirectory,
};

pub type RegistryKey = String; // Format: "tenant_id:path"

pub(crate) fn make_registry_key(tenant_id: i32, path: &str) -> RegistryKey {
    format!("{tenant_id}:{path}")
}

/// In-memory registry backend using papaya lock-free HashMap for resources.
///
/// Tenant rosters and artifact listings change rarely and sit behind a
/// `tokio::sync::RwLock`; resource reads and writes go through papaya. A
/// write counter tracks `put_resource` calls so tests can assert that the
/// migration persists only changed resources.
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    /// Resource storage keyed by "tenant_id:path"
    resources: Arc<PapayaHashMap<RegistryKey, RegistryResource>>,
    /// Artifact listings per tenant id
    artifacts: Arc<RwLock<HashMap<i32, Vec<ApiArtifactEntry>>>>,
    /// Tenant roster, in processing order
    tenants: Arc<RwLock<Vec<Tenant>>>,
    /// Number of put_resource calls served
    write_counter: AtomicU64,
}

impl InMemoryRegistry {
    /// Creates a new, empty in-memory registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tenant. Later `tenants()` calls return tenants in
    /// registration order.
    pub async fn add_tenant(&self, tenant: Tenant) {
        self.tenants.write().await.push(tenant);
    }

    /// Adds an artifact to a tenant's listing.
    pub async fn seed_artifact(&self, tenant_id: i32, entry: ApiArtifactEntry) {
        self.artifacts
            .write()
            .await
            .entry(tenant_id)
            .or_default()
            .push(entry);
    }

    /// Creates or replaces the resource at the given path without counting
    /// as a migration write.
    pub async fn seed_resource(&self, tenant_id: i32, path: &str, properties: PropertySet) {
        let key = make_registry_key(tenant_id, path);
        let guard = self.resources.pin();
        guard.insert(key, RegistryResource::new(path, properties));
    }

    /// Returns the number of `put_resource` calls served so far.
    pub fn write_count(&self) -> u64 {
        self.write_counter.load(Ordering::SeqCst)
    }

    async fn known_tenant(&self, tenant: &Tenant) -> Result<(), RegistryError> {
        let known = self.tenants.read().await.iter().any(|t| t.id == tenant.id);
        if known {
            Ok(())
        } else {
            Err(RegistryError::unknown_tenant(&tenant.domain))
        }
    }
}

#[async_trait]
impl RegistryStore for InMemoryRegistry {
    async fn list_api_artifacts(
        &self,
        tenant: &Tenant,
    ) -> Result<Vec<ApiArtifactEntry>, RegistryError> {
        self.known_tenant(tenant).await?;
        let artifacts = self.artifacts.read().await;
        Ok(artifacts.get(&tenant.id).cloned().unwrap_or_default())
    }

    async fn resource_exists(&self, tenant: &Tenant, path: &str) -> Result<bool, RegistryError> {
        let key = make_registry_key(tenant.id, path);
        let guard = self.resources.pin();
        Ok(guard.contains_key(&key))
    }

    async fn get_resource(
        &self,
        tenant: &Tenant,
        path: &str,
    ) -> Result<Option<RegistryResource>, RegistryError> {
        let key = make_registry_key(tenant.id, path);
        let guard = self.resources.pin();
        Ok(guard.get(&key).cloned())
    }

    async fn put_resource(
        &self,
        tenant: &Tenant,
        path: &str,
        properties: PropertySet,
    ) -> Result<(), RegistryError> {
        self.write_counter.fetch_add(1, Ordering::SeqCst);
        let key = make_registry_key(tenant.id, path);
        let guard = self.resources.pin();
        guard.insert(key, RegistryResource::new(path, properties));
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[async_trait]
impl TenantDirectory for InMemoryRegistry {
    async fn tenants(&self) -> Result<Vec<Tenant>, RegistryError> {
        Ok(self.tenants.read().await.clone())
    }
}
