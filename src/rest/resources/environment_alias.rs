//! Environment aliases of a space.
//!
//! An alias such as `master` points at one environment. Changing the target
//! is an update of the alias; aliases themselves are created in the web app.

use serde::{Deserialize, Serialize};

use crate::clients::{Client, Context, HttpError, HttpMethod};
use crate::rest::{resource, Collection, Link, Query, Sys};

/// An environment alias.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentAlias {
    /// System metadata. `None` for an entity that has not been saved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sys: Option<Sys>,
    /// Link to the target `Environment`.
    pub environment: Link,
}

resource!(EnvironmentAlias, "environment alias");

impl EnvironmentAlias {
    /// Points the alias at `environment_id`.
    pub fn retarget(&mut self, environment_id: impl Into<String>) {
        self.environment = Link::new("Environment", environment_id);
    }

    /// Returns the id of the target environment.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.environment.sys.id
    }
}

/// Operations on `/spaces/{space}/environment_aliases`.
#[derive(Clone, Copy, Debug)]
pub struct EnvironmentAliasService<'a> {
    client: &'a Client,
}

impl<'a> EnvironmentAliasService<'a> {
    pub(crate) const fn new(client: &'a Client) -> Self {
        Self { client }
    }

    fn collection_path(&self, space_id: &str) -> Result<String, HttpError> {
        Ok(format!("{}/environment_aliases", self.client.space_path(space_id)?))
    }

    /// Lists the aliases of a space.
    ///
    /// # Errors
    ///
    /// Returns any [`HttpError`] from fetching the first page.
    pub async fn list(
        &self,
        ctx: &Context,
        space_id: &str,
        query: Option<Query>,
    ) -> Result<Collection<EnvironmentAlias>, HttpError> {
        let path = self.collection_path(space_id)?;
        resource::list(self.client.http(), path, query, ctx).await
    }

    /// Fetches one alias.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::NotFound`] if the alias does not exist.
    pub async fn get(
        &self,
        ctx: &Context,
        space_id: &str,
        alias_id: &str,
    ) -> Result<EnvironmentAlias, HttpError> {
        let path = resource::child_path(&self.collection_path(space_id)?, alias_id)?;
        resource::fetch(self.client.http(), path, ctx).await
    }

    /// Saves the alias's target environment.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if the alias has no `sys.id`.
    pub async fn update(
        &self,
        ctx: &Context,
        space_id: &str,
        alias: &EnvironmentAlias,
    ) -> Result<EnvironmentAlias, HttpError> {
        let id = resource::require_id(alias, "update")?;
        let path = resource::child_path(&self.collection_path(space_id)?, id)?;
        resource::write(self.client.http(), HttpMethod::Put, path, alias, &[], ctx).await
    }
}
