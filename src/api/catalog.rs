//! Product and vendor operations.

use serde::Serialize;

use super::resource::{PRODUCTS, VENDORS};
use crate::api_client::{ApiClient, ListParams};
use crate::error::FreshError;
use crate::models::{Product, Vendor};

impl ApiClient {
    /// Creates a product.
    pub async fn create_product<P>(&self, payload: &P) -> Result<Product, FreshError>
    where
        P: Serialize + ?Sized,
    {
        self.create_item(&PRODUCTS, payload).await
    }

    /// Gets a single product.
    pub async fn view_product(&self, product_id: u64) -> Result<Product, FreshError> {
        self.view_item(&PRODUCTS, product_id, &[]).await
    }

    /// Lists products.
    pub async fn all_products(&self) -> Result<Vec<Product>, FreshError> {
        self.list_items(&PRODUCTS, &ListParams::new()).await
    }

    /// Updates a product.
    pub async fn update_product<P>(&self, product_id: u64, payload: &P) -> Result<Product, FreshError>
    where
        P: Serialize + ?Sized,
    {
        self.update_item(&PRODUCTS, product_id, payload).await
    }

    /// Deletes a product.
    pub async fn delete_product(&self, product_id: u64) -> Result<String, FreshError> {
        self.delete_item(&PRODUCTS, product_id).await
    }

    /// Creates a vendor.
    pub async fn create_vendor<P>(&self, payload: &P) -> Result<Vendor, FreshError>
    where
        P: Serialize + ?Sized,
    {
        self.create_item(&VENDORS, payload).await
    }

    /// Gets a single vendor.
    pub async fn view_vendor(&self, vendor_id: u64) -> Result<Vendor, FreshError> {
        self.view_item(&VENDORS, vendor_id, &[]).await
    }

    /// Lists vendors.
    pub async fn all_vendors(&self) -> Result<Vec<Vendor>, FreshError> {
        self.list_items(&VENDORS, &ListParams::new()).await
    }

    /// Updates a vendor.
    pub async fn update_vendor<P>(&self, vendor_id: u64, payload: &P) -> Result<Vendor, FreshError>
    where
        P: Serialize + ?Sized,
    {
        self.update_item(&VENDORS, vendor_id, payload).await
    }

    /// Deletes a vendor.
    pub async fn delete_vendor(&self, vendor_id: u64) -> Result<String, FreshError> {
        self.delete_item(&VENDORS, vendor_id).await
    }
}
