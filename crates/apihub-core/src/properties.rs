use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Registry property keys consumed by the access-control migration.
pub mod keys {
    /// Comma-separated role list allowed to edit the API in the publisher,
    /// or the [`NO_ROLES`](super::NO_ROLES) sentinel.
    pub const PUBLISHER_ROLES: &str = "publisher_roles";
    /// Publisher access-control mode.
    pub const PUBLISHER_ACCESS_CONTROL: &str = "publisher_access_control";
    /// Comma-separated role list allowed to see the API in the developer
    /// portal, or the [`NO_ROLES`](super::NO_ROLES) sentinel.
    pub const STORE_VIEW_ROLES: &str = "store_view_roles";
}

/// Sentinel stored when a role-list property carries no roles. Older hub
/// consumers compare against this literal token, so it is data, not an
/// absent value.
pub const NO_ROLES: &str = "null";

/// Publisher access-control mode meaning "no restriction".
pub const ACCESS_CONTROL_ALL: &str = "all";

/// String key/value properties attached to a registry resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertySet(HashMap<String, String>);

impl PropertySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for PropertySet {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[(&str, &str); N]> for PropertySet {
    fn from(entries: [(&str, &str); N]) -> Self {
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_set_operations() {
        let mut props = PropertySet::new();
        assert!(props.is_empty());

        props.set(keys::PUBLISHER_ROLES, "admin");
        assert_eq!(props.get(keys::PUBLISHER_ROLES), Some("admin"));
        assert!(props.contains(keys::PUBLISHER_ROLES));
        assert_eq!(props.len(), 1);

        assert_eq!(props.remove(keys::PUBLISHER_ROLES), Some("admin".into()));
        assert!(!props.contains(keys::PUBLISHER_ROLES));
    }

    #[test]
    fn test_property_set_from_pairs() {
        let props = PropertySet::from([(keys::STORE_VIEW_ROLES, NO_ROLES)]);
        assert_eq!(props.get(keys::STORE_VIEW_ROLES), Some(NO_ROLES));
    }

    #[test]
    fn test_property_set_serializes_as_plain_map() {
        let props = PropertySet::from([("publisher_access_control", ACCESS_CONTROL_ALL)]);
        let value = serde_json::to_value(&props).unwrap();
        assert_eq!(value["publisher_access_control"], "all");
    }

    #[test]
    fn test_empty_value_is_distinct_from_absent_key() {
        let props = PropertySet::from([(keys::STORE_VIEW_ROLES, "")]);
        assert!(props.contains(keys::STORE_VIEW_ROLES));
        assert_eq!(props.get(keys::STORE_VIEW_ROLES), Some(""));
        assert_eq!(props.get(keys::PUBLISHER_ROLES), None);
    }
}
