//! UI extensions installed in an environment.

use serde::{Deserialize, Serialize};

use crate::clients::{Client, Context, HttpError};
use crate::rest::{resource, Collection, Query, Sys};

/// A UI extension.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extension {
    /// System metadata. `None` for an entity that has not been saved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sys: Option<Sys>,
    /// The extension definition.
    pub extension: ExtensionDetails,
}

resource!(Extension, "extension");

/// What an [`Extension`] renders and where.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionDetails {
    /// URL the extension is loaded from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    /// Display name.
    pub name: String,
    /// Field types the extension can edit.
    #[serde(default)]
    pub field_types: Vec<FieldType>,
    /// Render in the entry sidebar instead of as a field editor.
    #[serde(default)]
    pub sidebar: bool,
}

/// A field type an extension or app location applies to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldType {
    /// Field type, such as `Symbol`, `Link` or `Array`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Target of a `Link` field, `Entry` or `Asset`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_type: Option<String>,
}

impl FieldType {
    /// A field type without a link target, e.g. `Symbol`.
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            link_type: None,
        }
    }
}

/// Operations on `/spaces/{space}/environments/{env}/extensions`.
#[derive(Clone, Copy, Debug)]
pub struct ExtensionService<'a> {
    client: &'a Client,
}

impl<'a> ExtensionService<'a> {
    pub(crate) const fn new(client: &'a Client) -> Self {
        Self { client }
    }

    fn collection_path(&self, space_id: &str) -> Result<String, HttpError> {
        Ok(format!("{}/extensions", self.client.environment_path(space_id)?))
    }

    /// Lists extensions.
    ///
    /// # Errors
    ///
    /// Returns any [`HttpError`] from fetching the first page.
    pub async fn list(
        &self,
        ctx: &Context,
        space_id: &str,
        query: Option<Query>,
    ) -> Result<Collection<Extension>, HttpError> {
        let path = self.collection_path(space_id)?;
        resource::list(self.client.http(), path, query, ctx).await
    }

    /// Fetches one extension.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::NotFound`] if the extension does not exist.
    pub async fn get(
        &self,
        ctx: &Context,
        space_id: &str,
        extension_id: &str,
    ) -> Result<Extension, HttpError> {
        let path = resource::child_path(&self.collection_path(space_id)?, extension_id)?;
        resource::fetch(self.client.http(), path, ctx).await
    }

    /// Creates or updates an extension.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::ValidationFailed`] if the definition is rejected.
    pub async fn upsert(
        &self,
        ctx: &Context,
        space_id: &str,
        extension: &Extension,
    ) -> Result<Extension, HttpError> {
        let path = self.collection_path(space_id)?;
        resource::upsert(self.client.http(), &path, extension, &[], ctx).await
    }

    /// Deletes an extension.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if the extension has no `sys.id`.
    pub async fn delete(
        &self,
        ctx: &Context,
        space_id: &str,
        extension: &Extension,
    ) -> Result<(), HttpError> {
        let id = resource::require_id(extension, "delete")?;
        let path = resource::child_path(&self.collection_path(space_id)?, id)?;
        resource::delete(self.client.http(), path, extension, ctx).await
    }
}
