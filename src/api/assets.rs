//! Asset and asset type operations.
//!
//! Assets are addressed by `display_id`. Deleting moves an asset to the
//! trash; `delete_asset_forever` removes a trashed asset for good.

use serde::Serialize;

use super::resource::{ASSETS, ASSET_TYPES};
use crate::api_client::{ApiClient, ListParams};
use crate::error::FreshError;
use crate::models::{Asset, AssetType};

impl ApiClient {
    /// Lists every asset, following pages.
    ///
    /// Use [`ListParams::with_type_fields`] to include type-specific fields.
    pub async fn list_assets(&self, params: ListParams) -> Result<Vec<Asset>, FreshError> {
        self.list_items(&ASSETS, &params).await
    }

    /// Gets a single asset, optionally with its type fields.
    pub async fn view_asset(&self, display_id: u64, type_fields: bool) -> Result<Asset, FreshError> {
        let query = if type_fields {
            vec![("include", "type_fields".to_string())]
        } else {
            Vec::new()
        };
        self.view_item(&ASSETS, display_id, &query).await
    }

    /// Updates an asset.
    pub async fn update_asset<P>(&self, display_id: u64, payload: &P) -> Result<Asset, FreshError>
    where
        P: Serialize + ?Sized,
    {
        self.update_item(&ASSETS, display_id, payload).await
    }

    /// Moves an asset to the trash.
    pub async fn delete_asset(&self, display_id: u64) -> Result<String, FreshError> {
        self.delete_at(&ASSETS.item_path(display_id)).await?;
        Ok(format!("Successfully deleted asset {}", display_id))
    }

    /// Permanently deletes a trashed asset.
    pub async fn delete_asset_forever(&self, display_id: u64) -> Result<String, FreshError> {
        let url = self.endpoint(&ASSETS.action_path(display_id, "delete_forever"), &[])?;
        self.replace(&url, None).await?;
        Ok(format!("Permanently deleted asset {}", display_id))
    }

    /// Lists asset types.
    pub async fn list_asset_types(&self) -> Result<Vec<AssetType>, FreshError> {
        self.list_items(&ASSET_TYPES, &ListParams::new()).await
    }
}
