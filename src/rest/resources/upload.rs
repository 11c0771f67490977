//! Uploads on the Upload API.
//!
//! An upload is a temporary binary blob (kept for 24 hours) that an asset
//! file can reference through `upload_from`. The service must be used with a
//! client built for [`ApiKind::Upload`](crate::ApiKind::Upload).
//!
//! ```rust,ignore
//! let uploads = Client::upload(token)?;
//! let upload = uploads.uploads().create(&ctx, "space", std::fs::read("cat.png")?).await?;
//! ```

use serde::{Deserialize, Serialize};

use crate::clients::{Client, Context, DataType, HttpError, HttpMethod, HttpRequest};
use crate::rest::{resource, Sys};

/// An uploaded file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Upload {
    /// System metadata. `None` for an entity that has not been saved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sys: Option<Sys>,
}

resource!(Upload, "upload");

/// Operations on `/spaces/{space}/uploads`.
#[derive(Clone, Copy, Debug)]
pub struct UploadService<'a> {
    client: &'a Client,
}

impl<'a> UploadService<'a> {
    pub(crate) const fn new(client: &'a Client) -> Self {
        Self { client }
    }

    fn collection_path(&self, space_id: &str) -> Result<String, HttpError> {
        Ok(format!("{}/uploads", self.client.space_path(space_id)?))
    }

    /// Uploads `bytes` as an `application/octet-stream` body.
    ///
    /// Returns `None` when the response body does not decode as an upload.
    ///
    /// # Errors
    ///
    /// Returns any [`HttpError`] from the pipeline.
    pub async fn create(
        &self,
        ctx: &Context,
        space_id: &str,
        bytes: impl Into<Vec<u8>>,
    ) -> Result<Option<Upload>, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Post, self.collection_path(space_id)?)
            .body(bytes)
            .body_type(DataType::OctetStream)
            .build()?;
        self.client.http().request_optional(&request, ctx).await
    }

    /// Fetches an upload's metadata.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::NotFound`] if the upload expired or never existed.
    pub async fn get(
        &self,
        ctx: &Context,
        space_id: &str,
        upload_id: &str,
    ) -> Result<Upload, HttpError> {
        let path = resource::child_path(&self.collection_path(space_id)?, upload_id)?;
        resource::fetch(self.client.http(), path, ctx).await
    }

    /// Deletes an upload.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if the upload has no `sys.id`.
    pub async fn delete(
        &self,
        ctx: &Context,
        space_id: &str,
        upload: &Upload,
    ) -> Result<(), HttpError> {
        let id = resource::require_id(upload, "delete")?;
        let path = resource::child_path(&self.collection_path(space_id)?, id)?;
        resource::delete(self.client.http(), path, upload, ctx).await
    }
}
