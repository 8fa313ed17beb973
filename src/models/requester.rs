//! Requester and requester group models for the Freshservice API.

use serde::{Deserialize, Serialize};

use super::Fields;

/// A requester (end user who raises tickets).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Requester {
    /// Unique requester ID.
    pub id: u64,

    /// First name.
    #[serde(default)]
    pub first_name: Option<String>,

    /// Last name.
    #[serde(default)]
    pub last_name: Option<String>,

    /// Primary email address.
    #[serde(default)]
    pub primary_email: Option<String>,

    /// Whether the requester is active.
    #[serde(default)]
    pub active: Option<bool>,

    /// Remaining fields, including `custom_fields`.
    #[serde(flatten)]
    pub extra: Fields,
}

impl Requester {
    /// Returns first and last name joined without a separator.
    ///
    /// Directory sign-in names on managed laptops take this
    /// `FirstnameLastname` form.
    pub fn compact_name(&self) -> String {
        format!(
            "{}{}",
            self.first_name.as_deref().unwrap_or_default(),
            self.last_name.as_deref().unwrap_or_default()
        )
    }

    /// Returns the primary email if present.
    pub fn email(&self) -> Option<&str> {
        self.primary_email.as_deref()
    }
}

/// Payload for creating a requester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRequester {
    /// First name (required by Freshservice).
    pub first_name: String,

    /// Last name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    /// Primary email address.
    pub primary_email: String,
}

/// A requester group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequesterGroup {
    /// Unique group ID.
    pub id: u64,

    /// Group name.
    #[serde(default)]
    pub name: Option<String>,

    /// Description.
    #[serde(default)]
    pub description: Option<String>,

    /// `manual` or `rule_based`.
    #[serde(default, rename = "type")]
    pub group_type: Option<String>,

    /// Remaining fields.
    #[serde(flatten)]
    pub extra: Fields,
}
