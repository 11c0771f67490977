//! Spaces.

use serde::{Deserialize, Serialize};

use crate::clients::{Client, Context, HttpError};
use crate::rest::{resource, Collection, Query, Sys};

/// A Contentful space.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Space {
    /// System metadata. `None` for an entity that has not been saved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sys: Option<Sys>,
    /// Display name.
    pub name: String,
    /// Locale code of the space's default locale. Only honored on creation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_locale: Option<String>,
}

resource!(Space, "space");

/// Operations on `/spaces`.
#[derive(Clone, Copy, Debug)]
pub struct SpaceService<'a> {
    client: &'a Client,
}

impl<'a> SpaceService<'a> {
    pub(crate) const fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Lists the spaces the token can access.
    ///
    /// # Errors
    ///
    /// Returns any [`HttpError`] from fetching the first page.
    pub async fn list(
        &self,
        ctx: &Context,
        query: Option<Query>,
    ) -> Result<Collection<Space>, HttpError> {
        resource::list(self.client.http(), "/spaces".to_string(), query, ctx).await
    }

    /// Fetches one space.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::NotFound`] if the space does not exist.
    pub async fn get(&self, ctx: &Context, space_id: &str) -> Result<Space, HttpError> {
        let path = self.client.space_path(space_id)?;
        resource::fetch(self.client.http(), path, ctx).await
    }

    /// Creates a space, or updates it when `sys.id` is set.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::VersionMismatch`] if the stored version moved on.
    pub async fn upsert(&self, ctx: &Context, space: &Space) -> Result<Space, HttpError> {
        resource::upsert(self.client.http(), "/spaces", space, &[], ctx).await
    }

    /// Deletes a space.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if the space has no `sys.id`.
    pub async fn delete(&self, ctx: &Context, space: &Space) -> Result<(), HttpError> {
        let id = resource::require_id(space, "delete")?;
        let path = self.client.space_path(id)?;
        resource::delete(self.client.http(), path, space, ctx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_space_serializes_without_sys() {
        let space = Space {
            name: "Blog".to_string(),
            default_locale: Some("en-US".to_string()),
            ..Space::default()
        };
        assert_eq!(
            serde_json::to_value(&space).unwrap(),
            serde_json::json!({"name": "Blog", "defaultLocale": "en-US"})
        );
    }
}
