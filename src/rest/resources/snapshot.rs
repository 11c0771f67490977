//! Snapshots: the state of an entry or content type at each publish.

use serde::{Deserialize, Serialize};

use super::{ContentType, Entry};
use crate::clients::{Client, Context, HttpError};
use crate::rest::{resource, Collection, Query, Sys};

/// An entry as it was when published.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EntrySnapshot {
    /// Snapshot metadata; `snapshot.sys` describes the entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sys: Option<Sys>,
    /// The entry as it was published.
    pub snapshot: Entry,
}

resource!(EntrySnapshot, "entry snapshot");

/// A content type as it was when activated.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentTypeSnapshot {
    /// Snapshot metadata; `snapshot.sys` describes the content type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sys: Option<Sys>,
    /// The content type as it was published.
    pub snapshot: ContentType,
}

resource!(ContentTypeSnapshot, "content type snapshot");

/// Read-only access to entry and content type snapshots in the client's
/// environment.
#[derive(Clone, Copy, Debug)]
pub struct SnapshotService<'a> {
    client: &'a Client,
}

impl<'a> SnapshotService<'a> {
    pub(crate) const fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// `{env}/{kind}/{id}/snapshots`
    fn collection_path(&self, space_id: &str, kind: &str, id: &str) -> Result<String, HttpError> {
        let parent = format!("{}/{kind}", self.client.environment_path(space_id)?);
        Ok(format!("{}/snapshots", resource::child_path(&parent, id)?))
    }

    /// Lists the snapshots of an entry.
    ///
    /// # Errors
    ///
    /// Returns any [`HttpError`] from fetching the first page.
    pub async fn list_entry_snapshots(
        &self,
        ctx: &Context,
        space_id: &str,
        entry_id: &str,
        query: Option<Query>,
    ) -> Result<Collection<EntrySnapshot>, HttpError> {
        let path = self.collection_path(space_id, "entries", entry_id)?;
        resource::list(self.client.http(), path, query, ctx).await
    }

    /// Fetches one snapshot of an entry.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::NotFound`] if the snapshot does not exist.
    pub async fn get_entry_snapshot(
        &self,
        ctx: &Context,
        space_id: &str,
        entry_id: &str,
        snapshot_id: &str,
    ) -> Result<EntrySnapshot, HttpError> {
        let collection = self.collection_path(space_id, "entries", entry_id)?;
        let path = resource::child_path(&collection, snapshot_id)?;
        resource::fetch(self.client.http(), path, ctx).await
    }

    /// Lists the snapshots of a content type.
    ///
    /// # Errors
    ///
    /// Returns any [`HttpError`] from fetching the first page.
    pub async fn list_content_type_snapshots(
        &self,
        ctx: &Context,
        space_id: &str,
        content_type_id: &str,
        query: Option<Query>,
    ) -> Result<Collection<ContentTypeSnapshot>, HttpError> {
        let path = self.collection_path(space_id, "content_types", content_type_id)?;
        resource::list(self.client.http(), path, query, ctx).await
    }

    /// Fetches one snapshot of a content type.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::NotFound`] if the snapshot does not exist.
    pub async fn get_content_type_snapshot(
        &self,
        ctx: &Context,
        space_id: &str,
        content_type_id: &str,
        snapshot_id: &str,
    ) -> Result<ContentTypeSnapshot, HttpError> {
        let collection = self.collection_path(space_id, "content_types", content_type_id)?;
        let path = resource::child_path(&collection, snapshot_id)?;
        resource::fetch(self.client.http(), path, ctx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::Versioned;

    #[test]
    fn test_entry_snapshot_wraps_entry() {
        let snapshot: EntrySnapshot = serde_json::from_str(
            r#"{
                "sys": {"id": "snap1", "type": "Snapshot"},
                "snapshot": {
                    "sys": {"id": "nyancat", "type": "Entry", "publishedVersion": 3},
                    "fields": {"name": {"en-US": "Nyan Cat"}}
                }
            }"#,
        )
        .unwrap();

        assert_eq!(snapshot.id(), Some("snap1"));
        assert_eq!(snapshot.snapshot.id(), Some("nyancat"));
        assert!(snapshot.snapshot.is_published());
        assert_eq!(snapshot.snapshot.field("name", "en-US").unwrap(), "Nyan Cat");
    }
}
