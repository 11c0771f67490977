//! Entries.
//!
//! Entry fields are kept as raw JSON. The Management API returns every field
//! keyed by locale (`{"title": {"en-US": "Hello"}}`) while the delivery APIs
//! return bare values for a single locale; [`Entry::field`] reads both.
//!
//! # Example
//!
//! ```rust,ignore
//! use contentful::rest::resources::Entry;
//!
//! let mut entry = Entry::default();
//! entry.fields.insert("title".into(), serde_json::json!({"en-US": "Hello"}));
//!
//! let entry = client.entries().upsert(&ctx, "space", "blogPost", &entry).await?;
//! let entry = client.entries().publish(&ctx, "space", &entry).await?;
//! assert!(entry.is_published());
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clients::{Client, Context, HttpError, HttpMethod, CONTENT_TYPE_ID_HEADER};
use crate::rest::{resource, Collection, Query, Sys};

/// An entry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// System metadata. `None` for an entity that has not been saved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sys: Option<Sys>,
    /// Field values keyed by field id, then by locale code.
    #[serde(default)]
    pub fields: BTreeMap<String, Value>,
}

resource!(Entry, "entry");

impl Entry {
    /// Returns the value of field `name` for `locale`.
    ///
    /// A field keyed by locale yields the value stored under `locale`; any
    /// other field yields its bare value.
    #[must_use]
    pub fn field(&self, name: &str, locale: &str) -> Option<&Value> {
        let value = self.fields.get(name)?;
        match value.as_object() {
            Some(map) if map.contains_key(locale) => map.get(locale),
            _ => Some(value),
        }
    }

    /// Returns the id of the entry's content type.
    #[must_use]
    pub fn content_type_id(&self) -> Option<&str> {
        self.sys
            .as_ref()
            .and_then(|sys| sys.content_type.as_ref())
            .map(|link| link.sys.id.as_str())
    }
}

/// Operations on `/spaces/{space}/environments/{env}/entries`.
#[derive(Clone, Copy, Debug)]
pub struct EntryService<'a> {
    client: &'a Client,
}

impl<'a> EntryService<'a> {
    pub(crate) const fn new(client: &'a Client) -> Self {
        Self { client }
    }

    fn collection_path(&self, space_id: &str) -> Result<String, HttpError> {
        Ok(format!("{}/entries", self.client.environment_path(space_id)?))
    }

    fn item_path(
        &self,
        space_id: &str,
        entry: &Entry,
        operation: &'static str,
    ) -> Result<String, HttpError> {
        let id = resource::require_id(entry, operation)?;
        resource::child_path(&self.collection_path(space_id)?, id)
    }

    /// Lists entries.
    ///
    /// # Errors
    ///
    /// Returns any [`HttpError`] from fetching the first page.
    pub async fn list(
        &self,
        ctx: &Context,
        space_id: &str,
        query: Option<Query>,
    ) -> Result<Collection<Entry>, HttpError> {
        let path = self.collection_path(space_id)?;
        resource::list(self.client.http(), path, query, ctx).await
    }

    /// Fetches one entry.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::NotFound`] if the entry does not exist.
    pub async fn get(
        &self,
        ctx: &Context,
        space_id: &str,
        entry_id: &str,
    ) -> Result<Entry, HttpError> {
        let path = resource::child_path(&self.collection_path(space_id)?, entry_id)?;
        resource::fetch(self.client.http(), path, ctx).await
    }

    /// Creates or updates an entry of content type `content_type_id`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::ValidationFailed`] if the fields do not match the
    /// content type, [`HttpError::VersionMismatch`] if the stored version
    /// moved on.
    pub async fn upsert(
        &self,
        ctx: &Context,
        space_id: &str,
        content_type_id: &str,
        entry: &Entry,
    ) -> Result<Entry, HttpError> {
        let path = self.collection_path(space_id)?;
        resource::upsert(
            self.client.http(),
            &path,
            entry,
            &[(CONTENT_TYPE_ID_HEADER, content_type_id)],
            ctx,
        )
        .await
    }

    /// Deletes an entry.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if the entry has no `sys.id`.
    pub async fn delete(
        &self,
        ctx: &Context,
        space_id: &str,
        entry: &Entry,
    ) -> Result<(), HttpError> {
        let path = self.item_path(space_id, entry, "delete")?;
        resource::delete(self.client.http(), path, entry, ctx).await
    }

    /// Publishes the entry's current version.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if the entry has no `sys.id`.
    pub async fn publish(
        &self,
        ctx: &Context,
        space_id: &str,
        entry: &Entry,
    ) -> Result<Entry, HttpError> {
        let path = format!("{}/published", self.item_path(space_id, entry, "publish")?);
        resource::transition(self.client.http(), HttpMethod::Put, path, entry, ctx).await
    }

    /// Unpublishes an entry.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if the entry has no `sys.id`.
    pub async fn unpublish(
        &self,
        ctx: &Context,
        space_id: &str,
        entry: &Entry,
    ) -> Result<Entry, HttpError> {
        let path = format!("{}/published", self.item_path(space_id, entry, "unpublish")?);
        resource::transition(self.client.http(), HttpMethod::Delete, path, entry, ctx).await
    }

    /// Archives an entry.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if the entry has no `sys.id`.
    pub async fn archive(
        &self,
        ctx: &Context,
        space_id: &str,
        entry: &Entry,
    ) -> Result<Entry, HttpError> {
        let path = format!("{}/archived", self.item_path(space_id, entry, "archive")?);
        resource::transition(self.client.http(), HttpMethod::Put, path, entry, ctx).await
    }

    /// Unarchives an entry.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if the entry has no `sys.id`.
    pub async fn unarchive(
        &self,
        ctx: &Context,
        space_id: &str,
        entry: &Entry,
    ) -> Result<Entry, HttpError> {
        let path = format!("{}/archived", self.item_path(space_id, entry, "unarchive")?);
        resource::transition(self.client.http(), HttpMethod::Delete, path, entry, ctx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::Versioned;

    fn entry() -> Entry {
        serde_json::from_str(
            r#"{
                "sys": {
                    "id": "nyancat",
                    "type": "Entry",
                    "version": 4,
                    "contentType": {"sys": {"type": "Link", "linkType": "ContentType", "id": "cat"}}
                },
                "fields": {
                    "name": {"en-US": "Nyan Cat", "tlh": "Nyan vIghro'"},
                    "likes": ["rainbows", "fish"]
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_field_reads_localized_and_bare_values() {
        let entry = entry();
        assert_eq!(entry.field("name", "tlh").unwrap(), "Nyan vIghro'");
        assert_eq!(entry.field("likes", "en-US").unwrap()[0], "rainbows");
        assert!(entry.field("missing", "en-US").is_none());
    }

    #[test]
    fn test_entry_metadata() {
        let entry = entry();
        assert_eq!(entry.id(), Some("nyancat"));
        assert_eq!(entry.version(), 4);
        assert_eq!(entry.content_type_id(), Some("cat"));
    }

    #[test]
    fn test_entry_without_fields_decodes() {
        let entry: Entry = serde_json::from_str(r#"{"sys": {"id": "e"}}"#).unwrap();
        assert!(entry.fields.is_empty());
    }
}
