//! Locales.

use serde::{Deserialize, Serialize};

use crate::clients::{Client, Context, HttpError};
use crate::rest::{resource, Collection, Query, Sys};

/// A locale enabled in an environment.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Locale {
    /// System metadata. `None` for an entity that has not been saved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sys: Option<Sys>,
    /// Display name.
    pub name: String,
    /// Locale code, such as `en-US`.
    pub code: String,
    /// Locale whose values are served when this locale has none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_code: Option<String>,
    /// Whether this is the default locale of the environment.
    #[serde(default)]
    pub default: bool,
    /// Whether entries may be published without values in this locale.
    #[serde(default)]
    pub optional: bool,
    /// Served by the delivery API.
    #[serde(default = "enabled")]
    pub content_delivery_api: bool,
    /// Editable through the management API.
    #[serde(default = "enabled")]
    pub content_management_api: bool,
}

const fn enabled() -> bool {
    true
}

resource!(Locale, "locale");

/// Operations on `/spaces/{space}/environments/{env}/locales`.
#[derive(Clone, Copy, Debug)]
pub struct LocaleService<'a> {
    client: &'a Client,
}

impl<'a> LocaleService<'a> {
    pub(crate) const fn new(client: &'a Client) -> Self {
        Self { client }
    }

    fn collection_path(&self, space_id: &str) -> Result<String, HttpError> {
        Ok(format!("{}/locales", self.client.environment_path(space_id)?))
    }

    /// Lists locales.
    ///
    /// # Errors
    ///
    /// Returns any [`HttpError`] from fetching the first page.
    pub async fn list(
        &self,
        ctx: &Context,
        space_id: &str,
        query: Option<Query>,
    ) -> Result<Collection<Locale>, HttpError> {
        let path = self.collection_path(space_id)?;
        resource::list(self.client.http(), path, query, ctx).await
    }

    /// Fetches one locale by id (not by code).
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::NotFound`] if the locale does not exist.
    pub async fn get(
        &self,
        ctx: &Context,
        space_id: &str,
        locale_id: &str,
    ) -> Result<Locale, HttpError> {
        let path = resource::child_path(&self.collection_path(space_id)?, locale_id)?;
        resource::fetch(self.client.http(), path, ctx).await
    }

    /// Creates or updates a locale.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::ValidationFailed`] if the code is unknown or taken.
    pub async fn upsert(
        &self,
        ctx: &Context,
        space_id: &str,
        locale: &Locale,
    ) -> Result<Locale, HttpError> {
        let path = self.collection_path(space_id)?;
        resource::upsert(self.client.http(), &path, locale, &[], ctx).await
    }

    /// Deletes a locale.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if the locale has no `sys.id`.
    pub async fn delete(
        &self,
        ctx: &Context,
        space_id: &str,
        locale: &Locale,
    ) -> Result<(), HttpError> {
        let id = resource::require_id(locale, "delete")?;
        let path = resource::child_path(&self.collection_path(space_id)?, id)?;
        resource::delete(self.client.http(), path, locale, ctx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_defaults_api_flags() {
        let locale: Locale =
            serde_json::from_str(r#"{"name": "German (Austria)", "code": "de-AT"}"#).unwrap();
        assert!(locale.content_delivery_api);
        assert!(locale.content_management_api);
        assert!(!locale.default);
        assert!(locale.fallback_code.is_none());
    }
}
