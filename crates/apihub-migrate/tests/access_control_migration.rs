//! End-to-end runs of the access-control migration against the in-memory
//! registry backend.

use std::sync::Arc;

use async_trait::async_trait;

use apihub_core::{ApiArtifact, PropertySet, StoreVisibility, Tenant, keys};
use apihub_migrate::{AccessControlMigration, TenantFilter, TenantSelection};
use apihub_registry::{
    ApiArtifactEntry, RegistryError, RegistryResource, RegistryStore,
};
use apihub_registry_memory::InMemoryRegistry;

fn acme() -> Tenant {
    Tenant::new(1, "acme.com")
}

fn globex() -> Tenant {
    Tenant::new(2, "globex.com")
}

async fn seeded_registry() -> Arc<InMemoryRegistry> {
    let registry = Arc::new(InMemoryRegistry::new());
    registry.add_tenant(acme()).await;
    registry.add_tenant(globex()).await;

    // acme: a pre-access-control API with no properties at all
    registry
        .seed_artifact(
            1,
            ApiArtifactEntry::new(
                "/apis/acme/Legacy/1.0.0/api",
                ApiArtifact::new("Legacy", "1.0.0", "acme", StoreVisibility::Private)
                    .with_visible_roles("Manager"),
            ),
        )
        .await;
    registry
        .seed_resource(1, "/apis/acme/Legacy/1.0.0/api", PropertySet::new())
        .await;

    // acme: a restricted API whose view roles must be derived
    registry
        .seed_artifact(
            1,
            ApiArtifactEntry::new(
                "/apis/acme/Orders/2.0.0/api",
                ApiArtifact::new("Orders", "2.0.0", "acme", StoreVisibility::Restricted)
                    .with_visible_roles("Dev, QA"),
            ),
        )
        .await;
    registry
        .seed_resource(
            1,
            "/apis/acme/Orders/2.0.0/api",
            PropertySet::from([(keys::PUBLISHER_ROLES, "admin")]),
        )
        .await;

    // globex: already consistent, must not be written
    registry
        .seed_artifact(
            2,
            ApiArtifactEntry::new(
                "/apis/globex/Billing/1.0.0/api",
                ApiArtifact::new("Billing", "1.0.0", "globex", StoreVisibility::Public),
            ),
        )
        .await;
    registry
        .seed_resource(
            2,
            "/apis/globex/Billing/1.0.0/api",
            PropertySet::from([
                (keys::PUBLISHER_ROLES, "admin"),
                (keys::STORE_VIEW_ROLES, "null"),
            ]),
        )
        .await;

    registry
}

#[tokio::test]
async fn migrates_all_tenants_and_writes_only_changed_resources() {
    let registry = seeded_registry().await;
    let migration = AccessControlMigration::new(registry.clone());

    let report = migration.run(&[acme(), globex()]).await.unwrap();

    assert_eq!(report.tenants_processed, 2);
    assert_eq!(report.resources_scanned, 3);
    assert_eq!(report.resources_updated, 2);
    assert_eq!(report.resources_missing, 0);
    assert!(report.is_clean());

    // Exactly one write per changed resource, none for the consistent one.
    assert_eq!(registry.write_count(), 2);

    let legacy = registry
        .get_resource(&acme(), "/apis/acme/Legacy/1.0.0/api")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(legacy.properties.get(keys::PUBLISHER_ROLES), Some("null"));
    assert_eq!(
        legacy.properties.get(keys::PUBLISHER_ACCESS_CONTROL),
        Some("all")
    );
    assert_eq!(legacy.properties.get(keys::STORE_VIEW_ROLES), Some("null"));

    let orders = registry
        .get_resource(&acme(), "/apis/acme/Orders/2.0.0/api")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        orders.properties.get(keys::STORE_VIEW_ROLES),
        Some("admin,dev,qa")
    );
}

#[tokio::test]
async fn second_run_is_a_no_op() {
    let registry = seeded_registry().await;
    let migration = AccessControlMigration::new(registry.clone());

    migration.run(&[acme(), globex()]).await.unwrap();
    let writes_after_first = registry.write_count();

    let report = migration.run(&[acme(), globex()]).await.unwrap();
    assert_eq!(report.resources_updated, 0);
    assert_eq!(registry.write_count(), writes_after_first);
}

#[tokio::test]
async fn artifact_without_backing_resource_is_skipped() {
    let registry = Arc::new(InMemoryRegistry::new());
    registry.add_tenant(acme()).await;
    registry
        .seed_artifact(
            1,
            ApiArtifactEntry::new(
                "/apis/acme/Ghost/1.0.0/api",
                ApiArtifact::new("Ghost", "1.0.0", "acme", StoreVisibility::Public),
            ),
        )
        .await;

    let migration = AccessControlMigration::new(registry.clone());
    let report = migration.run(&[acme()]).await.unwrap();

    assert_eq!(report.resources_scanned, 1);
    assert_eq!(report.resources_missing, 1);
    assert_eq!(report.resources_updated, 0);
    assert!(report.is_clean());
    assert_eq!(registry.write_count(), 0);
}

#[tokio::test]
async fn dry_run_counts_updates_without_writing() {
    let registry = seeded_registry().await;
    let migration = AccessControlMigration::new(registry.clone()).with_dry_run(true);

    let report = migration.run(&[acme(), globex()]).await.unwrap();

    assert_eq!(report.resources_updated, 2);
    assert_eq!(registry.write_count(), 0);

    // Nothing was repaired in the store.
    let legacy = registry
        .get_resource(&acme(), "/apis/acme/Legacy/1.0.0/api")
        .await
        .unwrap()
        .unwrap();
    assert!(legacy.properties.is_empty());
}

#[tokio::test]
async fn run_directory_applies_selection_and_deny_list() {
    let registry = seeded_registry().await;
    let migration = AccessControlMigration::new(registry.clone());

    let filter = TenantFilter::new(TenantSelection::All).with_deny_list(vec!["acme.com".into()]);
    let report = migration
        .run_directory(registry.as_ref(), &filter)
        .await
        .unwrap();

    assert_eq!(report.tenants_processed, 1);
    assert_eq!(report.resources_scanned, 1);
    assert_eq!(registry.write_count(), 0);
}

/// Delegating store that fails every read of one poisoned path.
struct PoisonedStore {
    inner: Arc<InMemoryRegistry>,
    poisoned_path: String,
}

#[async_trait]
impl RegistryStore for PoisonedStore {
    async fn list_api_artifacts(
        &self,
        tenant: &Tenant,
    ) -> Result<Vec<ApiArtifactEntry>, RegistryError> {
        self.inner.list_api_artifacts(tenant).await
    }

    async fn resource_exists(&self, tenant: &Tenant, path: &str) -> Result<bool, RegistryError> {
        if path == self.poisoned_path {
            return Err(RegistryError::backend("row lock timeout"));
        }
        self.inner.resource_exists(tenant, path).await
    }

    async fn get_resource(
        &self,
        tenant: &Tenant,
        path: &str,
    ) -> Result<Option<RegistryResource>, RegistryError> {
        self.inner.get_resource(tenant, path).await
    }

    async fn put_resource(
        &self,
        tenant: &Tenant,
        path: &str,
        properties: PropertySet,
    ) -> Result<(), RegistryError> {
        self.inner.put_resource(tenant, path, properties).await
    }

    fn backend_name(&self) -> &'static str {
        "poisoned-memory"
    }
}

#[tokio::test]
async fn one_failing_resource_does_not_stop_the_batch() {
    let registry = seeded_registry().await;
    let store = Arc::new(PoisonedStore {
        inner: registry.clone(),
        poisoned_path: "/apis/acme/Legacy/1.0.0/api".into(),
    });

    let migration = AccessControlMigration::new(store);
    let report = migration.run(&[acme(), globex()]).await.unwrap();

    assert_eq!(report.tenants_processed, 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(
        report.failures[0].path.as_deref(),
        Some("/apis/acme/Legacy/1.0.0/api")
    );
    assert_eq!(report.failures[0].tenant, "acme.com");

    // The healthy resource in the same tenant was still migrated.
    let orders = registry
        .get_resource(&acme(), "/apis/acme/Orders/2.0.0/api")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        orders.properties.get(keys::STORE_VIEW_ROLES),
        Some("admin,dev,qa")
    );
}
