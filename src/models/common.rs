//! Common types shared across Freshservice models.
//!
//! This module defines the resource envelope unwrapping and other
//! shared types used by multiple API endpoints.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::FreshError;

/// Fields a model does not name explicitly.
///
/// Freshservice records carry many instance-specific and custom fields, so
/// every model keeps the remainder of the object here.
pub type Fields = serde_json::Map<String, serde_json::Value>;

/// Unwraps the single expected top-level key of a response body.
///
/// Every Freshservice response wraps its payload in an object keyed by the
/// resource name (`{"ticket": {...}}`, `{"tickets": [...]}`). Which key to
/// expect is part of each operation's contract.
///
/// # Errors
///
/// Returns `FreshError::MissingKey` if the body is empty, not an object, or
/// lacks `key`, and `FreshError::Serialization` if the value under `key`
/// does not match `T`.
pub fn unwrap_envelope<T>(body: &str, key: &str) -> Result<T, FreshError>
where
    T: DeserializeOwned,
{
    if body.trim().is_empty() {
        return Err(FreshError::missing_key(key));
    }

    let value: serde_json::Value = serde_json::from_str(body)?;
    let serde_json::Value::Object(mut envelope) = value else {
        return Err(FreshError::missing_key(key));
    };

    let inner = envelope
        .remove(key)
        .ok_or_else(|| FreshError::missing_key(key))?;

    Ok(serde_json::from_value(inner)?)
}

/// A form field definition from `/requester_fields` or `/agent_fields`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Field identifier used as the key in records.
    #[serde(default)]
    pub name: Option<String>,

    /// Label shown in the Freshservice UI.
    #[serde(default)]
    pub label: Option<String>,

    /// Field type, e.g. `default_first_name` or `custom_text`.
    #[serde(default, rename = "type")]
    pub field_type: Option<String>,

    /// Remaining attributes.
    #[serde(flatten)]
    pub extra: Fields,
}
