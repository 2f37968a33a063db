//! Tenant flow guard.
//!
//! The migration processes one tenant at a time. `TenantFlow` is an explicit
//! two-state machine (idle, active) whose only legal transitions are
//! `start` and `end`; an illegal transition is a programming error in the
//! caller and surfaces as a typed [`FlowError`].

use apihub_core::Tenant;
use thiserror::Error;

/// Misuse of the tenant flow protocol. Fatal to the run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FlowError {
    #[error("Tenant flow for {0} is still active, end it before starting another")]
    AlreadyActive(String),

    #[error("No tenant flow is active")]
    NotActive,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum FlowState {
    #[default]
    Idle,
    Active(Tenant),
}

/// Scopes registry access to exactly one tenant at a time.
#[derive(Debug, Default)]
pub struct TenantFlow {
    state: FlowState,
}

impl TenantFlow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begins a flow for `tenant`.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::AlreadyActive` if a previous flow was not ended.
    pub fn start(&mut self, tenant: Tenant) -> Result<(), FlowError> {
        match &self.state {
            FlowState::Active(active) => Err(FlowError::AlreadyActive(active.domain.clone())),
            FlowState::Idle => {
                self.state = FlowState::Active(tenant);
                Ok(())
            }
        }
    }

    /// Ends the active flow, returning its tenant.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::NotActive` if no flow is active.
    pub fn end(&mut self) -> Result<Tenant, FlowError> {
        match std::mem::take(&mut self.state) {
            FlowState::Active(tenant) => Ok(tenant),
            FlowState::Idle => Err(FlowError::NotActive),
        }
    }

    /// The tenant of the active flow, if any.
    pub fn active(&self) -> Option<&Tenant> {
        match &self.state {
            FlowState::Active(tenant) => Some(tenant),
            FlowState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_end_cycle() {
        let mut flow = TenantFlow::new();
        assert!(flow.active().is_none());

        flow.start(Tenant::new(1, "acme.com")).unwrap();
        assert_eq!(flow.active().map(|t| t.id), Some(1));

        let ended = flow.end().unwrap();
        assert_eq!(ended.domain, "acme.com");
        assert!(flow.active().is_none());
    }

    #[test]
    fn test_double_start_is_misuse() {
        let mut flow = TenantFlow::new();
        flow.start(Tenant::new(1, "acme.com")).unwrap();

        let err = flow.start(Tenant::new(2, "globex.com")).unwrap_err();
        assert_eq!(err, FlowError::AlreadyActive("acme.com".into()));
        // The active flow is untouched by the rejected start.
        assert_eq!(flow.active().map(|t| t.id), Some(1));
    }

    #[test]
    fn test_end_without_start_is_misuse() {
        let mut flow = TenantFlow::new();
        assert_eq!(flow.end().unwrap_err(), FlowError::NotActive);
    }

    #[test]
    fn test_double_end_is_misuse() {
        let mut flow = TenantFlow::new();
        flow.start(Tenant::new(1, "acme.com")).unwrap();
        flow.end().unwrap();
        assert_eq!(flow.end().unwrap_err(), FlowError::NotActive);
    }

    #[test]
    fn test_flow_is_reusable_after_end() {
        let mut flow = TenantFlow::new();
        flow.start(Tenant::new(1, "acme.com")).unwrap();
        flow.end().unwrap();
        flow.start(Tenant::new(2, "globex.com")).unwrap();
        assert_eq!(flow.active().map(|t| t.id), Some(2));
    }
}
