//! Organizations.

use serde::{Deserialize, Serialize};

use crate::clients::{Client, Context, HttpError};
use crate::rest::{resource, Collection, Query, Sys};

/// An organization the user belongs to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// System metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sys: Option<Sys>,
    /// Display name.
    pub name: String,
}

resource!(Organization, "organization");

/// Operations on `/organizations`.
#[derive(Clone, Copy, Debug)]
pub struct OrganizationService<'a> {
    client: &'a Client,
}

impl<'a> OrganizationService<'a> {
    pub(crate) const fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Lists the organizations the token can access.
    ///
    /// # Errors
    ///
    /// Returns any [`HttpError`] from fetching the first page.
    pub async fn list(
        &self,
        ctx: &Context,
        query: Option<Query>,
    ) -> Result<Collection<Organization>, HttpError> {
        resource::list(self.client.http(), "/organizations".to_string(), query, ctx).await
    }
}
