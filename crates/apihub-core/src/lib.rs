pub mod artifact;
pub mod error;
pub mod properties;
pub mod tenant;

pub use artifact::{ApiArtifact, StoreVisibility};
pub use error::{CoreError, Result};
pub use properties::{ACCESS_CONTROL_ALL, NO_ROLES, PropertySet, keys};
pub use tenant::Tenant;
