//! Ticket models for the Freshservice API.

use serde::{Deserialize, Serialize};

use super::Fields;

/// A Freshservice ticket.
///
/// Status and priority are the numeric codes Freshservice uses
/// (e.g. status 2 = Open, priority 1 = Low).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    /// Unique ticket ID.
    pub id: u64,

    /// Ticket subject line.
    #[serde(default)]
    pub subject: Option<String>,

    /// Plain-text description.
    #[serde(default)]
    pub description_text: Option<String>,

    /// Numeric status code.
    #[serde(default)]
    pub status: Option<u8>,

    /// Numeric priority code.
    #[serde(default)]
    pub priority: Option<u8>,

    /// Requester who raised the ticket.
    #[serde(default)]
    pub requester_id: Option<u64>,

    /// Assigned agent.
    #[serde(default)]
    pub responder_id: Option<u64>,

    /// Assigned agent group.
    #[serde(default)]
    pub group_id: Option<u64>,

    /// Creation timestamp (ISO 8601).
    #[serde(default)]
    pub created_at: Option<String>,

    /// Last update timestamp (ISO 8601).
    #[serde(default)]
    pub updated_at: Option<String>,

    /// Remaining fields, including `custom_fields`.
    #[serde(flatten)]
    pub extra: Fields,
}

impl Ticket {
    /// Returns the subject or a placeholder.
    pub fn display_subject(&self) -> &str {
        self.subject.as_deref().unwrap_or("(no subject)")
    }
}
