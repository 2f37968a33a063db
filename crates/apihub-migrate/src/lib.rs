//! Access-control registry migration for ApiHub.
//!
//! Walks a tenant's published API artifacts and repairs two legacy property
//! conventions on the registry resources backing them: the publisher role
//! list (`publisher_roles` / `publisher_access_control`) and the developer
//! portal visibility roles (`store_view_roles`). The repair itself is a pure
//! function over a property snapshot; persistence, tenant scoping, and
//! best-effort batch semantics live in [`runner`].

pub mod access_control;
pub mod flow;
pub mod runner;
pub mod selection;

pub use access_control::{Reconciliation, reconcile_access_control};
pub use flow::{FlowError, TenantFlow};
pub use runner::{
    AccessControlMigration, MigrationError, MigrationFailure, MigrationReport, ResourceOutcome,
};
pub use selection::{SelectionError, TenantFilter, TenantSelection, parse_id_range};
