//! Asset models for the Freshservice API.

use serde::{Deserialize, Serialize};

use super::Fields;

/// An asset (laptop, chromebook, license, ...).
///
/// Assets are addressed by `display_id` in the API, not by `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    /// Internal ID.
    #[serde(default)]
    pub id: Option<u64>,

    /// ID used in asset URLs.
    pub display_id: u64,

    /// Asset name.
    #[serde(default)]
    pub name: Option<String>,

    /// Asset type this asset belongs to.
    #[serde(default)]
    pub asset_type_id: Option<u64>,

    /// Requester the asset is used by.
    #[serde(default)]
    pub user_id: Option<u64>,

    /// Type-specific fields, present when listed with `include=type_fields`.
    #[serde(default)]
    pub type_fields: Option<Fields>,

    /// Remaining fields.
    #[serde(flatten)]
    pub extra: Fields,
}

impl Asset {
    /// Returns a type field as text.
    ///
    /// Null or absent fields yield `None`; numbers and booleans are rendered.
    pub fn type_field(&self, name: &str) -> Option<String> {
        match self.type_fields.as_ref()?.get(name)? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Returns the name or the display ID.
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("asset {}", self.display_id))
    }
}

/// An asset type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetType {
    /// Unique asset type ID.
    pub id: u64,

    /// Type name (e.g., "Laptop").
    #[serde(default)]
    pub name: Option<String>,

    /// Parent type, if this is a sub-type.
    #[serde(default)]
    pub parent_asset_type_id: Option<u64>,

    /// Remaining fields.
    #[serde(flatten)]
    pub extra: Fields,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn asset(type_fields: serde_json::Value) -> Asset {
        serde_json::from_value(json!({
            "display_id": 12,
            "name": "LT-0012",
            "asset_type_id": 3,
            "type_fields": type_fields
        }))
        .unwrap()
    }

    #[test]
    fn test_type_field_string() {
        let asset = asset(json!({"last_login_by_1": "AdaLovelace"}));
        assert_eq!(
            asset.type_field("last_login_by_1").as_deref(),
            Some("AdaLovelace")
        );
    }

    #[test]
    fn test_type_field_null_and_missing() {
        let asset = asset(json!({"last_login_by_1": null}));
        assert_eq!(asset.type_field("last_login_by_1"), None);
        assert_eq!(asset.type_field("other"), None);
    }

    #[test]
    fn test_type_field_without_type_fields() {
        let asset: Asset = serde_json::from_value(json!({"display_id": 1})).unwrap();
        assert_eq!(asset.type_field("anything"), None);
        assert_eq!(asset.display_name(), "asset 1");
    }

    #[test]
    fn test_type_field_number_rendered() {
        let asset = asset(json!({"ram_1": 16}));
        assert_eq!(asset.type_field("ram_1").as_deref(), Some("16"));
    }
}
