//! The per-resource access-control repair.
//!
//! Two conventions changed when publisher access control was introduced:
//! every API resource must carry a `publisher_roles` list (with the `"null"`
//! sentinel meaning "unrestricted"), and a derived `store_view_roles` list
//! that combines publisher roles with the artifact's visible roles. Resources
//! published before the change are missing one or both properties; this
//! module computes the repaired property set.

use apihub_core::{ACCESS_CONTROL_ALL, ApiArtifact, NO_ROLES, PropertySet, StoreVisibility, keys};
use tracing::debug;

/// Result of reconciling one resource's properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// The (possibly repaired) property set.
    pub properties: PropertySet,
    /// Whether any property was written.
    pub changed: bool,
}

/// Repairs the access-control properties of a single resource snapshot.
///
/// Pure over its inputs: the snapshot is copied, nothing is persisted, and
/// the same input always yields the same output. The caller persists the
/// returned set only when `changed` is true.
///
/// `publisher_roles` is repaired when absent or blank after trimming. The
/// `store_view_roles` check is narrower on purpose: only an absent key
/// triggers derivation, an explicitly empty value is left untouched.
pub fn reconcile_access_control(
    path: &str,
    artifact: &ApiArtifact,
    snapshot: &PropertySet,
) -> Reconciliation {
    let mut properties = snapshot.clone();
    let mut changed = false;

    let blank_publisher_roles = properties
        .get(keys::PUBLISHER_ROLES)
        .is_none_or(|roles| roles.trim().is_empty());
    if blank_publisher_roles {
        debug!(
            path,
            "resource has no {} property, storing the {NO_ROLES} sentinel",
            keys::PUBLISHER_ROLES
        );
        properties.set(keys::PUBLISHER_ROLES, NO_ROLES);
        properties.set(keys::PUBLISHER_ACCESS_CONTROL, ACCESS_CONTROL_ALL);
        changed = true;
    }

    if !properties.contains(keys::STORE_VIEW_ROLES) {
        // Re-read after the repair above: a just-written sentinel counts as
        // unrestricted here.
        let publisher_roles = properties.get(keys::PUBLISHER_ROLES).map(str::to_owned);
        let unrestricted = publisher_roles
            .as_deref()
            .is_none_or(|roles| roles.trim().is_empty() || roles == NO_ROLES);

        let store_view_roles = if artifact.visibility == StoreVisibility::Public || unrestricted {
            debug!(
                path,
                visibility = %artifact.visibility,
                "API is public or publisher access is unrestricted, storing the {NO_ROLES} sentinel for {}",
                keys::STORE_VIEW_ROLES
            );
            NO_ROLES.to_string()
        } else {
            // The publisher list is kept verbatim; only the appended visible
            // roles are trimmed and lower-cased.
            let mut combined = publisher_roles.unwrap_or_default();
            for role in artifact.visible_roles.split(',') {
                combined.push(',');
                combined.push_str(&role.trim().to_lowercase());
            }
            debug!(path, roles = %combined, "derived {} from publisher and visible roles", keys::STORE_VIEW_ROLES);
            combined
        };
        properties.set(keys::STORE_VIEW_ROLES, store_view_roles);
        changed = true;
    }

    Reconciliation {
        properties,
        changed,
    }
}
