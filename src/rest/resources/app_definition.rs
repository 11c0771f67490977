//! App definitions owned by an organization.

use serde::{Deserialize, Serialize};

use super::FieldType;
use crate::clients::{Client, Context, HttpError};
use crate::rest::{resource, Collection, Query, Sys};

/// An app definition.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppDefinition {
    /// System metadata. `None` for an entity that has not been saved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sys: Option<Sys>,
    /// Display name.
    pub name: String,
    /// URL of the app frontend. Apps without one only run backend code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    /// Where the app renders.
    #[serde(default)]
    pub locations: Vec<AppLocation>,
}

resource!(AppDefinition, "app definition");

/// A place in the web app where an app renders.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppLocation {
    /// `app-config`, `entry-field`, `entry-sidebar`, `entry-editor`, `dialog`
    /// or `page`.
    pub location: String,
    /// Required for `entry-field`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub field_types: Vec<FieldType>,
}

/// Operations on `/organizations/{organization}/app_definitions`.
#[derive(Clone, Copy, Debug)]
pub struct AppDefinitionService<'a> {
    client: &'a Client,
}

impl<'a> AppDefinitionService<'a> {
    pub(crate) const fn new(client: &'a Client) -> Self {
        Self { client }
    }

    fn collection_path(&self, organization_id: &str) -> Result<String, HttpError> {
        Ok(format!(
            "{}/app_definitions",
            self.client.organization_path(organization_id)?
        ))
    }

    /// Lists the organization's app definitions.
    ///
    /// # Errors
    ///
    /// Returns any [`HttpError`] from fetching the first page.
    pub async fn list(
        &self,
        ctx: &Context,
        organization_id: &str,
        query: Option<Query>,
    ) -> Result<Collection<AppDefinition>, HttpError> {
        let path = self.collection_path(organization_id)?;
        resource::list(self.client.http(), path, query, ctx).await
    }

    /// Fetches one app definition.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::NotFound`] if the definition does not exist.
    pub async fn get(
        &self,
        ctx: &Context,
        organization_id: &str,
        app_definition_id: &str,
    ) -> Result<AppDefinition, HttpError> {
        let collection = self.collection_path(organization_id)?;
        let path = resource::child_path(&collection, app_definition_id)?;
        resource::fetch(self.client.http(), path, ctx).await
    }

    /// Creates or updates an app definition.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::ValidationFailed`] if the locations are rejected.
    pub async fn upsert(
        &self,
        ctx: &Context,
        organization_id: &str,
        definition: &AppDefinition,
    ) -> Result<AppDefinition, HttpError> {
        let path = self.collection_path(organization_id)?;
        resource::upsert(self.client.http(), &path, definition, &[], ctx).await
    }

    /// Deletes an app definition.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if `app_definition_id` is empty.
    pub async fn delete(
        &self,
        ctx: &Context,
        organization_id: &str,
        app_definition_id: &str,
    ) -> Result<(), HttpError> {
        let collection = self.collection_path(organization_id)?;
        let path = resource::child_path(&collection, app_definition_id)?;
        resource::remove(self.client.http(), path, None, ctx).await
    }
}
