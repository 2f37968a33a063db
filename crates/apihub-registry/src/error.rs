//! Error types for registry backend operations.

use std::fmt;

/// Errors that can occur while talking to a registry backend.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The backend does not know the given tenant.
    #[error("Unknown tenant: {domain}")]
    UnknownTenant {
        /// Domain of the tenant that was not found.
        domain: String,
    },

    /// The backend reported an error while serving the request.
    #[error("Registry backend error: {message}")]
    Backend {
        /// Description of the backend error.
        message: String,
    },

    /// The backend could not be reached.
    #[error("Connection error: {message}")]
    Connection {
        /// Description of the connection error.
        message: String,
    },
}

impl RegistryError {
    /// Creates a new `UnknownTenant` error.
    #[must_use]
    pub fn unknown_tenant(domain: impl Into<String>) -> Self {
        Self::UnknownTenant {
            domain: domain.into(),
        }
    }

    /// Creates a new `Backend` error.
    #[must_use]
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// Creates a new `Connection` error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Returns `true` if this error means the backend could not be reached.
    #[must_use]
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection { .. })
    }

    /// Returns the error category for logging purposes.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownTenant { .. } => ErrorCategory::Tenant,
            Self::Backend { .. } => ErrorCategory::Backend,
            Self::Connection { .. } => ErrorCategory::Infrastructure,
        }
    }
}

/// Categories of registry errors for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Tenant lookup failure.
    Tenant,
    /// Backend-side failure.
    Backend,
    /// Infrastructure/connection failure.
    Infrastructure,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tenant => write!(f, "tenant"),
            Self::Backend => write!(f, "backend"),
            Self::Infrastructure => write!(f, "infrastructure"),
        }
    }
}
