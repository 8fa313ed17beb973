//! Product and vendor models for the Freshservice API.

use serde::{Deserialize, Serialize};

use super::Fields;

/// A product in the asset catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique product ID.
    pub id: u64,

    /// Product name.
    #[serde(default)]
    pub name: Option<String>,

    /// Asset type the product belongs to.
    #[serde(default)]
    pub asset_type_id: Option<u64>,

    /// Manufacturer name.
    #[serde(default)]
    pub manufacturer: Option<String>,

    /// Remaining fields.
    #[serde(flatten)]
    pub extra: Fields,
}

/// A vendor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vendor {
    /// Unique vendor ID.
    pub id: u64,

    /// Vendor name.
    #[serde(default)]
    pub name: Option<String>,

    /// Description.
    #[serde(default)]
    pub description: Option<String>,

    /// Primary contact requester.
    #[serde(default)]
    pub primary_contact_id: Option<u64>,

    /// Remaining fields.
    #[serde(flatten)]
    pub extra: Fields,
}
