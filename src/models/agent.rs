//! Agent, role and agent group models for the Freshservice API.
//!
//! Agents are the technicians who work tickets; roles and agent groups
//! control what they can see and where tickets get routed.

use serde::{Deserialize, Serialize};

use super::Fields;

/// An agent (technician).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    /// Unique agent ID.
    pub id: u64,

    /// First name.
    #[serde(default)]
    pub first_name: Option<String>,

    /// Last name.
    #[serde(default)]
    pub last_name: Option<String>,

    /// Email address.
    #[serde(default)]
    pub email: Option<String>,

    /// Whether the agent is active.
    #[serde(default)]
    pub active: Option<bool>,

    /// Remaining fields.
    #[serde(flatten)]
    pub extra: Fields,
}

/// An agent role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    /// Unique role ID.
    pub id: u64,

    /// Role name.
    #[serde(default)]
    pub name: Option<String>,

    /// Description.
    #[serde(default)]
    pub description: Option<String>,

    /// Remaining fields.
    #[serde(flatten)]
    pub extra: Fields,
}

/// An agent group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentGroup {
    /// Unique group ID.
    pub id: u64,

    /// Group name.
    #[serde(default)]
    pub name: Option<String>,

    /// Description.
    #[serde(default)]
    pub description: Option<String>,

    /// Remaining fields.
    #[serde(flatten)]
    pub extra: Fields,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_agent_group_keeps_null_members() {
        let group: AgentGroup =
            serde_json::from_value(json!({"id": 2, "name": "Desk", "members": null})).unwrap();
        assert_eq!(group.name.as_deref(), Some("Desk"));
        assert!(group.extra["members"].is_null());
    }
}
