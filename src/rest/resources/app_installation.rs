//! Apps installed in an environment.
//!
//! An installation is addressed by the id of the app definition it
//! installs, so installing and reconfiguring are both a `PUT`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clients::{Client, Context, HttpError, HttpMethod};
use crate::rest::{resource, Collection, Query, Sys};

/// An app installation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AppInstallation {
    /// System metadata. `None` for an entity that has not been saved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sys: Option<Sys>,
    /// Installation parameters defined by the app.
    #[serde(default)]
    pub parameters: BTreeMap<String, Value>,
}

resource!(AppInstallation, "app installation");

/// Operations on `/spaces/{space}/environments/{env}/app_installations`.
#[derive(Clone, Copy, Debug)]
pub struct AppInstallationService<'a> {
    client: &'a Client,
}

impl<'a> AppInstallationService<'a> {
    pub(crate) const fn new(client: &'a Client) -> Self {
        Self { client }
    }

    fn collection_path(&self, space_id: &str) -> Result<String, HttpError> {
        Ok(format!(
            "{}/app_installations",
            self.client.environment_path(space_id)?
        ))
    }

    fn item_path(&self, space_id: &str, app_definition_id: &str) -> Result<String, HttpError> {
        resource::child_path(&self.collection_path(space_id)?, app_definition_id)
    }

    /// Lists installed apps.
    ///
    /// # Errors
    ///
    /// Returns any [`HttpError`] from fetching the first page.
    pub async fn list(
        &self,
        ctx: &Context,
        space_id: &str,
        query: Option<Query>,
    ) -> Result<Collection<AppInstallation>, HttpError> {
        let path = self.collection_path(space_id)?;
        resource::list(self.client.http(), path, query, ctx).await
    }

    /// Fetches the installation of one app.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::NotFound`] if the app is not installed.
    pub async fn get(
        &self,
        ctx: &Context,
        space_id: &str,
        app_definition_id: &str,
    ) -> Result<AppInstallation, HttpError> {
        let path = self.item_path(space_id, app_definition_id)?;
        resource::fetch(self.client.http(), path, ctx).await
    }

    /// Installs an app, or updates the parameters of an installed one.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if `app_definition_id` is empty.
    pub async fn upsert(
        &self,
        ctx: &Context,
        space_id: &str,
        app_definition_id: &str,
        installation: &AppInstallation,
    ) -> Result<AppInstallation, HttpError> {
        let path = self.item_path(space_id, app_definition_id)?;
        resource::write(self.client.http(), HttpMethod::Put, path, installation, &[], ctx).await
    }

    /// Uninstalls an app.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if `app_definition_id` is empty.
    pub async fn delete(
        &self,
        ctx: &Context,
        space_id: &str,
        app_definition_id: &str,
    ) -> Result<(), HttpError> {
        let path = self.item_path(space_id, app_definition_id)?;
        resource::remove(self.client.http(), path, None, ctx).await
    }
}
