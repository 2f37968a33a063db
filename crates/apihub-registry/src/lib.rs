//! Registry abstraction layer for the ApiHub migration tooling.
//!
//! This crate defines the traits a registry backend must implement for the
//! migration runner to walk tenants, list their API artifacts, and repair
//! resource properties.

pub mod error;
pub mod traits;
pub mod types;

pub use error::{ErrorCategory, RegistryError};
pub use traits::{RegistryStore, TenantDirectory};
pub use types::{ApiArtifactEntry, RegistryResource};

/// Type alias for a shareable registry store instance.
pub type DynRegistryStore = std::sync::Arc<dyn RegistryStore>;
