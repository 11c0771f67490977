//! Content types.
//!
//! A content type must be activated (`PUT .../published`) before entries of
//! that type can be created, and deactivated before it can be deleted.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clients::{Client, Context, HttpError, HttpMethod};
use crate::rest::{resource, Collection, Query, Sys};

/// A content type.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentType {
    /// System metadata. `None` for an entity that has not been saved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sys: Option<Sys>,
    /// Display name.
    pub name: String,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Id of the field used as the entry title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_field: Option<String>,
    /// Field definitions, in editor order.
    #[serde(default)]
    pub fields: Vec<Field>,
}

resource!(ContentType, "content type");

/// A field of a [`ContentType`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Field id, the key in entry `fields`.
    pub id: String,
    /// Display name.
    pub name: String,
    /// `Symbol`, `Text`, `Integer`, `Number`, `Date`, `Boolean`, `Location`,
    /// `Object`, `RichText`, `Link` or `Array`.
    #[serde(rename = "type")]
    pub kind: String,
    /// `Entry` or `Asset` when `kind` is `Link`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_type: Option<String>,
    /// Item schema when `kind` is `Array`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<FieldItems>,
    /// Whether publishing requires a value.
    #[serde(default)]
    pub required: bool,
    /// Whether the field holds one value per locale.
    #[serde(default)]
    pub localized: bool,
    /// Hidden from the editor.
    #[serde(default)]
    pub disabled: bool,
    /// Left out of delivery API responses.
    #[serde(default)]
    pub omitted: bool,
    /// Validation rules, kept as raw JSON.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validations: Vec<Value>,
}

/// Item schema of an `Array` field.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldItems {
    /// Item type, such as `Symbol` or `Link`.
    #[serde(rename = "type")]
    pub kind: String,
    /// `Entry` or `Asset` when `kind` is `Link`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_type: Option<String>,
    /// Validation rules applied to each item.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validations: Vec<Value>,
}

/// Operations on `/spaces/{space}/environments/{env}/content_types`.
#[derive(Clone, Copy, Debug)]
pub struct ContentTypeService<'a> {
    client: &'a Client,
}

impl<'a> ContentTypeService<'a> {
    pub(crate) const fn new(client: &'a Client) -> Self {
        Self { client }
    }

    fn collection_path(&self, space_id: &str) -> Result<String, HttpError> {
        Ok(format!("{}/content_types", self.client.environment_path(space_id)?))
    }

    fn item_path(
        &self,
        space_id: &str,
        content_type: &ContentType,
        operation: &'static str,
    ) -> Result<String, HttpError> {
        let id = resource::require_id(content_type, operation)?;
        resource::child_path(&self.collection_path(space_id)?, id)
    }

    /// Lists content types.
    ///
    /// # Errors
    ///
    /// Returns any [`HttpError`] from fetching the first page.
    pub async fn list(
        &self,
        ctx: &Context,
        space_id: &str,
        query: Option<Query>,
    ) -> Result<Collection<ContentType>, HttpError> {
        let path = self.collection_path(space_id)?;
        resource::list(self.client.http(), path, query, ctx).await
    }

    /// Fetches one content type.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::NotFound`] if the content type does not exist.
    pub async fn get(
        &self,
        ctx: &Context,
        space_id: &str,
        content_type_id: &str,
    ) -> Result<ContentType, HttpError> {
        let path = resource::child_path(&self.collection_path(space_id)?, content_type_id)?;
        resource::fetch(self.client.http(), path, ctx).await
    }

    /// Creates or updates a content type.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::ValidationFailed`] if the field schema is rejected.
    pub async fn upsert(
        &self,
        ctx: &Context,
        space_id: &str,
        content_type: &ContentType,
    ) -> Result<ContentType, HttpError> {
        let path = self.collection_path(space_id)?;
        resource::upsert(self.client.http(), &path, content_type, &[], ctx).await
    }

    /// Deletes a content type.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if the content type has no `sys.id`.
    pub async fn delete(
        &self,
        ctx: &Context,
        space_id: &str,
        content_type: &ContentType,
    ) -> Result<(), HttpError> {
        let path = self.item_path(space_id, content_type, "delete")?;
        resource::delete(self.client.http(), path, content_type, ctx).await
    }

    /// Activates (publishes) a content type.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if the content type has no `sys.id`.
    pub async fn activate(
        &self,
        ctx: &Context,
        space_id: &str,
        content_type: &ContentType,
    ) -> Result<ContentType, HttpError> {
        let path = format!("{}/published", self.item_path(space_id, content_type, "activate")?);
        resource::transition(self.client.http(), HttpMethod::Put, path, content_type, ctx).await
    }

    /// Deactivates (unpublishes) a content type.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if the content type has no `sys.id`.
    pub async fn deactivate(
        &self,
        ctx: &Context,
        space_id: &str,
        content_type: &ContentType,
    ) -> Result<ContentType, HttpError> {
        let path = format!("{}/published", self.item_path(space_id, content_type, "deactivate")?);
        resource::transition(self.client.http(), HttpMethod::Delete, path, content_type, ctx).await
    }
}
