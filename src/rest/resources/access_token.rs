//! Personal access tokens of the authenticated user.
//!
//! The token value itself is only returned once, in the response to
//! [`AccessTokenService::create`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{Client, Context, HttpError, HttpMethod};
use crate::rest::{resource, Collection, Query, Sys};

const COLLECTION_PATH: &str = "/users/me/access_tokens";

/// A personal access token.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalAccessToken {
    /// System metadata. `None` for an entity that has not been saved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sys: Option<Sys>,
    /// Label shown in the web app.
    pub name: String,
    /// Set once the token has been revoked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revoked_at: Option<DateTime<Utc>>,
    /// `content_management_manage` or `content_management_read`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scopes: Vec<String>,
    /// The secret, present only right after creation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

resource!(PersonalAccessToken, "access token");

impl PersonalAccessToken {
    /// Returns `true` once the token has been revoked.
    #[must_use]
    pub const fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }
}

/// Operations on `/users/me/access_tokens`.
#[derive(Clone, Copy, Debug)]
pub struct AccessTokenService<'a> {
    client: &'a Client,
}

impl<'a> AccessTokenService<'a> {
    pub(crate) const fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Lists the user's personal access tokens.
    ///
    /// # Errors
    ///
    /// Returns any [`HttpError`] from fetching the first page.
    pub async fn list(
        &self,
        ctx: &Context,
        query: Option<Query>,
    ) -> Result<Collection<PersonalAccessToken>, HttpError> {
        resource::list(self.client.http(), COLLECTION_PATH.to_string(), query, ctx).await
    }

    /// Fetches one token.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::NotFound`] if the token does not exist.
    pub async fn get(
        &self,
        ctx: &Context,
        token_id: &str,
    ) -> Result<PersonalAccessToken, HttpError> {
        let path = resource::child_path(COLLECTION_PATH, token_id)?;
        resource::fetch(self.client.http(), path, ctx).await
    }

    /// Creates a token. The returned value carries the secret in `token`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::ValidationFailed`] if the name or scopes are
    /// rejected.
    pub async fn create(
        &self,
        ctx: &Context,
        token: &PersonalAccessToken,
    ) -> Result<PersonalAccessToken, HttpError> {
        let path = COLLECTION_PATH.to_string();
        resource::write(self.client.http(), HttpMethod::Post, path, token, &[], ctx).await
    }

    /// Revokes a token.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if the token has no `sys.id`.
    pub async fn revoke(
        &self,
        ctx: &Context,
        token: &PersonalAccessToken,
    ) -> Result<PersonalAccessToken, HttpError> {
        let id = resource::require_id(token, "revoke")?;
        let path = format!("{}/revoked", resource::child_path(COLLECTION_PATH, id)?);
        resource::transition(self.client.http(), HttpMethod::Put, path, token, ctx).await
    }
}
