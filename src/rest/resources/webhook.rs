//! Webhook definitions of a space.
//!
//! To check that an incoming webhook call really came from Contentful, see
//! [`crate::webhooks`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clients::{Client, Context, HttpError};
use crate::rest::{resource, Collection, Query, Sys};

/// A webhook definition.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Webhook {
    /// System metadata. `None` for an entity that has not been saved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sys: Option<Sys>,
    /// Display name.
    pub name: String,
    /// Target URL of the calls.
    pub url: String,
    /// Event topics such as `Entry.publish` or `*.*`.
    #[serde(default)]
    pub topics: Vec<String>,
    /// Extra headers sent with every call.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<WebhookHeader>,
    /// User for HTTP basic auth on the target.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_basic_username: Option<String>,
    /// Write-only; never returned by the API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_basic_password: Option<String>,
    /// Filters on the triggering entity, as raw JSON.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<Value>,
    /// `Some(false)` pauses the webhook.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

resource!(Webhook, "webhook");

/// A custom header sent with every webhook call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookHeader {
    /// Header name.
    pub key: String,
    /// Header value. Empty in replies when `secret` is set.
    pub value: String,
    /// Hidden in replies once saved.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub secret: bool,
}

/// Operations on `/spaces/{space}/webhook_definitions`.
#[derive(Clone, Copy, Debug)]
pub struct WebhookService<'a> {
    client: &'a Client,
}

impl<'a> WebhookService<'a> {
    pub(crate) const fn new(client: &'a Client) -> Self {
        Self { client }
    }

    fn collection_path(&self, space_id: &str) -> Result<String, HttpError> {
        Ok(format!("{}/webhook_definitions", self.client.space_path(space_id)?))
    }

    /// Lists webhook definitions.
    ///
    /// # Errors
    ///
    /// Returns any [`HttpError`] from fetching the first page.
    pub async fn list(
        &self,
        ctx: &Context,
        space_id: &str,
        query: Option<Query>,
    ) -> Result<Collection<Webhook>, HttpError> {
        let path = self.collection_path(space_id)?;
        resource::list(self.client.http(), path, query, ctx).await
    }

    /// Fetches one webhook definition.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::NotFound`] if the webhook does not exist.
    pub async fn get(
        &self,
        ctx: &Context,
        space_id: &str,
        webhook_id: &str,
    ) -> Result<Webhook, HttpError> {
        let path = resource::child_path(&self.collection_path(space_id)?, webhook_id)?;
        resource::fetch(self.client.http(), path, ctx).await
    }

    /// Creates or updates a webhook definition.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::ValidationFailed`] if the URL or topics are rejected.
    pub async fn upsert(
        &self,
        ctx: &Context,
        space_id: &str,
        webhook: &Webhook,
    ) -> Result<Webhook, HttpError> {
        let path = self.collection_path(space_id)?;
        resource::upsert(self.client.http(), &path, webhook, &[], ctx).await
    }

    /// Deletes a webhook definition.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if the webhook has no `sys.id`.
    pub async fn delete(
        &self,
        ctx: &Context,
        space_id: &str,
        webhook: &Webhook,
    ) -> Result<(), HttpError> {
        let id = resource::require_id(webhook, "delete")?;
        let path = resource::child_path(&self.collection_path(space_id)?, id)?;
        resource::delete(self.client.http(), path, webhook, ctx).await
    }
}
