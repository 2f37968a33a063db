//! In-memory registry backend for the ApiHub migration tooling.
//!
//! This crate provides an in-memory implementation of the `RegistryStore`
//! and `TenantDirectory` traits from `apihub-registry`, using a papaya
//! lock-free HashMap for resource access. It backs the integration tests
//! and local dry runs.
//!
//! # Example
//!
//! ```ignore
//! use apihub_registry_memory::InMemoryRegistry;
//!
//! let registry = InMemoryRegistry::new();
//! registry.add_tenant(Tenant::new(1, "acme.com")).await;
//! registry.seed_resource(1, "/apis/acme/Orders/1.0.0/api", props).await;
//! ```

mod registry;

pub use registry::{InMemoryRegistry, RegistryKey};

// Re-export the traits for convenience
pub use apihub_registry::{RegistryStore, TenantDirectory};

/// Creates a new in-memory registry behind a shareable handle.
pub fn create_memory_registry() -> std::sync::Arc<InMemoryRegistry> {
    std::sync::Arc::new(InMemoryRegistry::new())
}
