use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of an E2T instance
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum E2TInstanceState {
    /// Eligible for new RAN associations
    #[default]
    Active,
    /// Draining; must never receive new associations
    ToBeDeleted,
}

impl fmt::Display for E2TInstanceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            E2TInstanceState::Active => write!(f, "ACTIVE"),
            E2TInstanceState::ToBeDeleted => write!(f, "TO_BE_DELETED"),
        }
    }
}

/// E2TInstance is a single E2 Termination endpoint known to the registry
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct E2TInstance {
    /// host:port of the endpoint, also its store key
    pub address: String,

    #[serde(default)]
    pub state: E2TInstanceState,

    /// RAN node names currently routed through this instance
    #[serde(default)]
    pub associated_ran_list: Vec<String>,
}

impl E2TInstance {
    /// Create an active instance with no associated RAN nodes
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            state: E2TInstanceState::Active,
            associated_ran_list: Vec::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.state == E2TInstanceState::Active
    }

    /// Number of associated RAN nodes, the load metric used for selection
    pub fn load(&self) -> usize {
        self.associated_ran_list.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_instance_defaults() {
        let instance = E2TInstance::new("10.10.2.15:9800");
        assert_eq!(instance.address, "10.10.2.15:9800");
        assert_eq!(instance.state, E2TInstanceState::Active);
        assert!(instance.associated_ran_list.is_empty());
        assert!(instance.is_active());
        assert_eq!(instance.load(), 0);
    }

    #[test]
    fn test_state_display() {
        assert_eq!(E2TInstanceState::Active.to_string(), "ACTIVE");
        assert_eq!(E2TInstanceState::ToBeDeleted.to_string(), "TO_BE_DELETED");
    }

    #[test]
    fn test_serialized_field_names() {
        let mut instance = E2TInstance::new("10.10.2.15:9800");
        instance.state = E2TInstanceState::ToBeDeleted;
        instance.associated_ran_list = vec!["ran1".to_string()];

        let value = serde_json::to_value(&instance).unwrap();
        assert_eq!(value["address"], "10.10.2.15:9800");
        assert_eq!(value["state"], "TO_BE_DELETED");
        assert_eq!(value["associatedRanList"][0], "ran1");
    }

    #[test]
    fn test_missing_fields_default() {
        let instance: E2TInstance =
            serde_json::from_str(r#"{"address":"10.10.2.16:9800"}"#).unwrap();
        assert_eq!(instance, E2TInstance::new("10.10.2.16:9800"));
    }
}
