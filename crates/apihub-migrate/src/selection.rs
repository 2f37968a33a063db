//! Tenant selection.
//!
//! A run covers all tenants, an explicit domain list, or a numeric id range,
//! minus a deny list. Mirrors the `tenants` / `tenantRange` / `blackListed`
//! arguments of earlier hub migration clients.

use apihub_core::Tenant;
use thiserror::Error;

/// Errors from parsing tenant selection arguments.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Invalid tenant range '{0}': expected <start>-<end>")]
    InvalidRange(String),

    #[error("Invalid tenant range '{0}': start is greater than end")]
    EmptyRange(String),
}

/// Which tenants a run covers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TenantSelection {
    /// Every tenant the directory returns.
    #[default]
    All,
    /// Tenants whose domain is in the list.
    Domains(Vec<String>),
    /// Tenants whose numeric id falls in the inclusive range.
    IdRange { start: i32, end: i32 },
}

/// Parses a `<start>-<end>` tenant id range.
pub fn parse_id_range(raw: &str) -> Result<TenantSelection, SelectionError> {
    let (start, end) = raw
        .split_once('-')
        .ok_or_else(|| SelectionError::InvalidRange(raw.to_string()))?;
    let start: i32 = start
        .trim()
        .parse()
        .map_err(|_| SelectionError::InvalidRange(raw.to_string()))?;
    let end: i32 = end
        .trim()
        .parse()
        .map_err(|_| SelectionError::InvalidRange(raw.to_string()))?;
    if start > end {
        return Err(SelectionError::EmptyRange(raw.to_string()));
    }
    Ok(TenantSelection::IdRange { start, end })
}

/// Selection plus deny list. The deny list wins over any selection.
#[derive(Debug, Clone, Default)]
pub struct TenantFilter {
    selection: TenantSelection,
    deny: Vec<String>,
}

impl TenantFilter {
    pub fn new(selection: TenantSelection) -> Self {
        Self {
            selection,
            deny: Vec::new(),
        }
    }

    pub fn with_deny_list(mut self, deny: Vec<String>) -> Self {
        self.deny = deny;
        self
    }

    /// Whether the given tenant should be processed.
    pub fn matches(&self, tenant: &Tenant) -> bool {
        if self.deny.iter().any(|domain| *domain == tenant.domain) {
            return false;
        }
        match &self.selection {
            TenantSelection::All => true,
            TenantSelection::Domains(domains) => {
                domains.iter().any(|domain| *domain == tenant.domain)
            }
            TenantSelection::IdRange { start, end } => {
                (*start..=*end).contains(&tenant.id)
            }
        }
    }
}
