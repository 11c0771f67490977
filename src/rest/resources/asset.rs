//! Assets and their files.
//!
//! Asset fields are localized with [`LocaleItem`], so the same model reads
//! management payloads (`{"en-US": ...}`) and single-locale delivery
//! payloads.

use serde::{Deserialize, Serialize};

use crate::clients::{Client, Context, HttpError, HttpMethod, HttpRequest, VERSION_HEADER};
use crate::rest::{resource, Collection, Link, LocaleItem, Query, Sys, Versioned};

/// An asset.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// System metadata. `None` for an entity that has not been saved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sys: Option<Sys>,
    /// Localized asset fields.
    #[serde(default)]
    pub fields: AssetFields,
}

resource!(Asset, "asset");

/// The fields of an [`Asset`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetFields {
    /// Title, optionally per locale.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<LocaleItem<String>>,
    /// Description, optionally per locale.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<LocaleItem<String>>,
    /// The binary, optionally per locale.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<LocaleItem<File>>,
}

/// The file attached to an asset.
///
/// Before processing, a file carries `upload` (a public URL) or
/// `upload_from` (a link to an [`Upload`](super::Upload)); processing fills
/// in `url` and `details`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct File {
    /// Protocol-relative URL, set once the asset is processed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Public URL to fetch the binary from when processing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload: Option<String>,
    /// Link to an `Upload` to process instead of `upload`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload_from: Option<Link>,
    /// Size and image dimensions, set by processing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<FileDetails>,
    /// File name shown for downloads.
    pub file_name: String,
    /// MIME type of the binary.
    pub content_type: String,
}

/// Size and dimensions of a processed file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDetails {
    /// Size in bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Present for image assets only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageDetails>,
}

/// Pixel dimensions of an image file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDetails {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Operations on `/spaces/{space}/environments/{env}/assets`.
#[derive(Clone, Copy, Debug)]
pub struct AssetService<'a> {
    client: &'a Client,
}

impl<'a> AssetService<'a> {
    pub(crate) const fn new(client: &'a Client) -> Self {
        Self { client }
    }

    fn collection_path(&self, space_id: &str) -> Result<String, HttpError> {
        Ok(format!("{}/assets", self.client.environment_path(space_id)?))
    }

    fn item_path(
        &self,
        space_id: &str,
        asset: &Asset,
        operation: &'static str,
    ) -> Result<String, HttpError> {
        let id = resource::require_id(asset, operation)?;
        resource::child_path(&self.collection_path(space_id)?, id)
    }

    /// Lists assets.
    ///
    /// # Errors
    ///
    /// Returns any [`HttpError`] from fetching the first page.
    pub async fn list(
        &self,
        ctx: &Context,
        space_id: &str,
        query: Option<Query>,
    ) -> Result<Collection<Asset>, HttpError> {
        let path = self.collection_path(space_id)?;
        resource::list(self.client.http(), path, query, ctx).await
    }

    /// Lists published assets only.
    ///
    /// # Errors
    ///
    /// Returns any [`HttpError`] from fetching the first page.
    pub async fn list_published(
        &self,
        ctx: &Context,
        space_id: &str,
        query: Option<Query>,
    ) -> Result<Collection<Asset>, HttpError> {
        let path = format!("{}/public/assets", self.client.environment_path(space_id)?);
        resource::list(self.client.http(), path, query, ctx).await
    }

    /// Fetches one asset.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::NotFound`] if the asset does not exist.
    pub async fn get(
        &self,
        ctx: &Context,
        space_id: &str,
        asset_id: &str,
    ) -> Result<Asset, HttpError> {
        let path = resource::child_path(&self.collection_path(space_id)?, asset_id)?;
        resource::fetch(self.client.http(), path, ctx).await
    }

    /// Creates or updates an asset.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::VersionMismatch`] if the stored version moved on.
    pub async fn upsert(
        &self,
        ctx: &Context,
        space_id: &str,
        asset: &Asset,
    ) -> Result<Asset, HttpError> {
        let path = self.collection_path(space_id)?;
        resource::upsert(self.client.http(), &path, asset, &[], ctx).await
    }

    /// Deletes an asset.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if the asset has no `sys.id`.
    pub async fn delete(
        &self,
        ctx: &Context,
        space_id: &str,
        asset: &Asset,
    ) -> Result<(), HttpError> {
        let path = self.item_path(space_id, asset, "delete")?;
        resource::delete(self.client.http(), path, asset, ctx).await
    }

    /// Starts processing the file stored for `locale`.
    ///
    /// Processing runs asynchronously on the server; fetch the asset again
    /// to see `url` and `details` filled in.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if the asset has no `sys.id`.
    pub async fn process(
        &self,
        ctx: &Context,
        space_id: &str,
        asset: &Asset,
        locale: &str,
    ) -> Result<(), HttpError> {
        let item = self.item_path(space_id, asset, "process")?;
        let path = format!("{}/process", resource::child_path(&format!("{item}/files"), locale)?);
        let request = HttpRequest::builder(HttpMethod::Put, path)
            .header(VERSION_HEADER, asset.version().to_string())
            .build()?;
        self.client.http().request_empty(&request, ctx).await
    }

    /// Publishes an asset.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if the asset has no `sys.id`.
    pub async fn publish(
        &self,
        ctx: &Context,
        space_id: &str,
        asset: &Asset,
    ) -> Result<Asset, HttpError> {
        let path = format!("{}/published", self.item_path(space_id, asset, "publish")?);
        resource::transition(self.client.http(), HttpMethod::Put, path, asset, ctx).await
    }

    /// Unpublishes an asset.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if the asset has no `sys.id`.
    pub async fn unpublish(
        &self,
        ctx: &Context,
        space_id: &str,
        asset: &Asset,
    ) -> Result<Asset, HttpError> {
        let path = format!("{}/published", self.item_path(space_id, asset, "unpublish")?);
        resource::transition(self.client.http(), HttpMethod::Delete, path, asset, ctx).await
    }

    /// Archives an asset.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if the asset has no `sys.id`.
    pub async fn archive(
        &self,
        ctx: &Context,
        space_id: &str,
        asset: &Asset,
    ) -> Result<Asset, HttpError> {
        let path = format!("{}/archived", self.item_path(space_id, asset, "archive")?);
        resource::transition(self.client.http(), HttpMethod::Put, path, asset, ctx).await
    }

    /// Unarchives an asset.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if the asset has no `sys.id`.
    pub async fn unarchive(
        &self,
        ctx: &Context,
        space_id: &str,
        asset: &Asset,
    ) -> Result<Asset, HttpError> {
        let path = format!("{}/archived", self.item_path(space_id, asset, "unarchive")?);
        resource::transition(self.client.http(), HttpMethod::Delete, path, asset, ctx).await
    }
}
