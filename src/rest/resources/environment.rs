//! Environments of a space.
//!
//! Environments are addressed by id. Creating one always uses
//! `PUT /spaces/{space}/environments/{id}`, where the id is `sys.id` when
//! present and the environment name otherwise.

use serde::{Deserialize, Serialize};

use crate::clients::{Client, Context, HttpError, HttpMethod};
use crate::rest::{resource, Collection, Query, Sys};

/// An environment of a space.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    /// System metadata. `None` for an entity that has not been saved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sys: Option<Sys>,
    /// Display name.
    pub name: String,
}

resource!(Environment, "environment");

/// Operations on `/spaces/{space}/environments`.
#[derive(Clone, Copy, Debug)]
pub struct EnvironmentService<'a> {
    client: &'a Client,
}

impl<'a> EnvironmentService<'a> {
    pub(crate) const fn new(client: &'a Client) -> Self {
        Self { client }
    }

    fn collection_path(&self, space_id: &str) -> Result<String, HttpError> {
        Ok(format!("{}/environments", self.client.space_path(space_id)?))
    }

    /// Lists the environments of a space.
    ///
    /// # Errors
    ///
    /// Returns any [`HttpError`] from fetching the first page.
    pub async fn list(
        &self,
        ctx: &Context,
        space_id: &str,
        query: Option<Query>,
    ) -> Result<Collection<Environment>, HttpError> {
        let path = self.collection_path(space_id)?;
        resource::list(self.client.http(), path, query, ctx).await
    }

    /// Fetches one environment.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::NotFound`] if the environment does not exist.
    pub async fn get(
        &self,
        ctx: &Context,
        space_id: &str,
        environment_id: &str,
    ) -> Result<Environment, HttpError> {
        let path = resource::child_path(&self.collection_path(space_id)?, environment_id)?;
        resource::fetch(self.client.http(), path, ctx).await
    }

    /// Creates or updates an environment.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if the environment has neither
    /// `sys.id` nor a name.
    pub async fn upsert(
        &self,
        ctx: &Context,
        space_id: &str,
        environment: &Environment,
    ) -> Result<Environment, HttpError> {
        let id = environment.sys.as_ref().and_then(|sys| sys.id.as_deref());
        let id = id.unwrap_or(&environment.name);
        let path = resource::child_path(&self.collection_path(space_id)?, id)?;
        resource::write(self.client.http(), HttpMethod::Put, path, environment, &[], ctx).await
    }

    /// Deletes an environment.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if the environment has no `sys.id`.
    pub async fn delete(
        &self,
        ctx: &Context,
        space_id: &str,
        environment: &Environment,
    ) -> Result<(), HttpError> {
        let id = resource::require_id(environment, "delete")?;
        let path = resource::child_path(&self.collection_path(space_id)?, id)?;
        resource::delete(self.client.http(), path, environment, ctx).await
    }
}
