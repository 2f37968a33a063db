use serde::{Deserialize, Serialize};
use std::fmt;

/// A tenant known to the hub. The `id` is the numeric tenant identifier
/// assigned by the user store; `domain` is the tenant's login domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: i32,
    pub domain: String,
}

impl Tenant {
    pub fn new(id: i32, domain: impl Into<String>) -> Self {
        Self {
            id,
            domain: domain.into(),
        }
    }
}

impl fmt::Display for Tenant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.id, self.domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tenant_display() {
        let tenant = Tenant::new(42, "acme.com");
        assert_eq!(tenant.to_string(), "42(acme.com)");
    }

    #[test]
    fn test_tenant_serialization() {
        let tenant = Tenant::new(1, "example.org");
        let value = serde_json::to_value(&tenant).unwrap();
        assert_eq!(value, json!({"id": 1, "domain": "example.org"}));
    }

    #[test]
    fn test_tenant_deserialization() {
        let tenant: Tenant =
            serde_json::from_value(json!({"id": 7, "domain": "beta.example.io"})).unwrap();
        assert_eq!(tenant, Tenant::new(7, "beta.example.io"));
    }
}
