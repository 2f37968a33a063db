//! Best-effort batch runner.
//!
//! Walks the selected tenants one at a time inside a [`TenantFlow`] scope,
//! repairs each API resource via [`reconcile_access_control`], and persists a
//! resource only when the repair changed something. One resource's failure is
//! logged and recorded, never fatal; flow misuse and tenant enumeration
//! failures abort the run.

use std::fmt;

use thiserror::Error;
use tracing::{debug, info, warn};

use apihub_core::Tenant;
use apihub_registry::{ApiArtifactEntry, DynRegistryStore, RegistryError, TenantDirectory};

use crate::access_control::reconcile_access_control;
use crate::flow::{FlowError, TenantFlow};
use crate::selection::TenantFilter;

/// Fatal migration failures.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error(transparent)]
    Flow(#[from] FlowError),

    #[error("Failed to enumerate tenants: {0}")]
    TenantEnumeration(#[source] RegistryError),
}

/// What happened to a single resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceOutcome {
    /// No resource exists behind the artifact; nothing to do.
    Missing,
    /// The properties were already consistent.
    Unchanged,
    /// The properties were repaired (or would be, in a dry run).
    Updated,
}

/// A non-fatal failure recorded during the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationFailure {
    /// Domain of the tenant being processed.
    pub tenant: String,
    /// Resource path, if the failure was per-resource rather than per-tenant.
    pub path: Option<String>,
    /// Error message.
    pub message: String,
}

impl MigrationFailure {
    fn tenant(domain: &str, message: String) -> Self {
        Self {
            tenant: domain.to_string(),
            path: None,
            message,
        }
    }

    fn resource(domain: &str, path: &str, message: String) -> Self {
        Self {
            tenant: domain.to_string(),
            path: Some(path.to_string()),
            message,
        }
    }
}

/// Counters and failures accumulated over a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub tenants_processed: usize,
    pub resources_scanned: usize,
    pub resources_updated: usize,
    pub resources_missing: usize,
    pub failures: Vec<MigrationFailure>,
}

impl MigrationReport {
    /// True when every scanned resource was handled without failure.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

impl fmt::Display for MigrationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "tenants processed:  {}", self.tenants_processed)?;
        writeln!(f, "resources scanned:  {}", self.resources_scanned)?;
        writeln!(f, "resources updated:  {}", self.resources_updated)?;
        writeln!(f, "resources missing:  {}", self.resources_missing)?;
        write!(f, "failures:           {}", self.failures.len())
    }
}

/// The access-control property migration.
pub struct AccessControlMigration {
    store: DynRegistryStore,
    dry_run: bool,
}

impl AccessControlMigration {
    pub fn new(store: DynRegistryStore) -> Self {
        Self {
            store,
            dry_run: false,
        }
    }

    /// In a dry run nothing is persisted; would-be updates are still counted.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Enumerates tenants from `directory`, filters them, and runs the
    /// migration over the selection.
    ///
    /// # Errors
    ///
    /// Tenant enumeration failure and flow misuse are fatal; everything else
    /// is recorded in the report.
    pub async fn run_directory(
        &self,
        directory: &dyn TenantDirectory,
        filter: &TenantFilter,
    ) -> Result<MigrationReport, MigrationError> {
        let tenants = directory
            .tenants()
            .await
            .map_err(MigrationError::TenantEnumeration)?;
        let selected: Vec<Tenant> = tenants
            .into_iter()
            .filter(|tenant| filter.matches(tenant))
            .collect();
        info!(
            selected = selected.len(),
            backend = self.store.backend_name(),
            "selected tenants for access control migration"
        );
        self.run(&selected).await
    }

    /// Runs the migration over the given tenants, one flow at a time.
    pub async fn run(&self, tenants: &[Tenant]) -> Result<MigrationReport, MigrationError> {
        let mut report = MigrationReport::default();
        let mut flow = TenantFlow::new();

        for tenant in tenants {
            flow.start(tenant.clone())?;
            let Some(scoped) = flow.active().cloned() else {
                return Err(FlowError::NotActive.into());
            };
            info!(tenant = %scoped, "migrating access control properties");

            match self.store.list_api_artifacts(&scoped).await {
                Ok(entries) => {
                    debug!(tenant = %scoped, artifacts = entries.len(), "retrieved API artifact listing");
                    for entry in &entries {
                        report.resources_scanned += 1;
                        match self.migrate_resource(&scoped, entry).await {
                            Ok(ResourceOutcome::Updated) => report.resources_updated += 1,
                            Ok(ResourceOutcome::Missing) => report.resources_missing += 1,
                            Ok(ResourceOutcome::Unchanged) => {}
                            Err(e) => {
                                warn!(
                                    tenant = %scoped,
                                    path = %entry.resource_path,
                                    category = %e.category(),
                                    error = %e,
                                    "failed to migrate resource, continuing"
                                );
                                report.failures.push(MigrationFailure::resource(
                                    &scoped.domain,
                                    &entry.resource_path,
                                    e.to_string(),
                                ));
                            }
                        }
                    }
                }
                Err(e) => {
                    warn!(
                        tenant = %scoped,
                        category = %e.category(),
                        error = %e,
                        "failed to list API artifacts, skipping tenant"
                    );
                    report
                        .failures
                        .push(MigrationFailure::tenant(&scoped.domain, e.to_string()));
                }
            }

            flow.end()?;
            report.tenants_processed += 1;
        }

        info!(
            tenants = report.tenants_processed,
            scanned = report.resources_scanned,
            updated = report.resources_updated,
            missing = report.resources_missing,
            failures = report.failures.len(),
            dry_run = self.dry_run,
            "access control migration finished"
        );
        Ok(report)
    }

    async fn migrate_resource(
        &self,
        tenant: &Tenant,
        entry: &ApiArtifactEntry,
    ) -> Result<ResourceOutcome, RegistryError> {
        let path = entry.resource_path.as_str();

        if !self.store.resource_exists(tenant, path).await? {
            debug!(tenant = %tenant, path, "no resource behind artifact, skipping");
            return Ok(ResourceOutcome::Missing);
        }
        let Some(resource) = self.store.get_resource(tenant, path).await? else {
            return Ok(ResourceOutcome::Missing);
        };

        let outcome = reconcile_access_control(path, &entry.artifact, &resource.properties);
        if !outcome.changed {
            return Ok(ResourceOutcome::Unchanged);
        }

        if self.dry_run {
            info!(tenant = %tenant, path, api = %entry.artifact, "dry run: would update access control properties");
            return Ok(ResourceOutcome::Updated);
        }

        self.store
            .put_resource(tenant, path, outcome.properties)
            .await?;
        debug!(tenant = %tenant, path, api = %entry.artifact, "persisted repaired access control properties");
        Ok(ResourceOutcome::Updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_display() {
        let report = MigrationReport {
            tenants_processed: 2,
            resources_scanned: 5,
            resources_updated: 3,
            resources_missing: 1,
            failures: vec![],
        };
        let rendered = report.to_string();
        assert!(rendered.contains("tenants processed:  2"));
        assert!(rendered.contains("failures:           0"));
        assert!(report.is_clean());
    }
}
