//! Tasks attached to an entry.

use serde::{Deserialize, Serialize};

use crate::clients::{Client, Context, HttpError};
use crate::rest::{resource, Collection, Link, Query, Sys};

/// A task assigned to a user on an entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryTask {
    /// System metadata. `None` for an entity that has not been saved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sys: Option<Sys>,
    /// Task description.
    pub body: String,
    /// Whether the task is still open.
    pub status: TaskStatus,
    /// Link to the assigned `User`.
    pub assigned_to: Link,
}

resource!(EntryTask, "entry task");

impl EntryTask {
    /// Creates an active task assigned to `user_id`.
    #[must_use]
    pub fn new(body: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            sys: None,
            body: body.into(),
            status: TaskStatus::Active,
            assigned_to: Link::new("User", user_id),
        }
    }
}

/// State of an [`EntryTask`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Active,
    Resolved,
}

/// Operations on `/spaces/{space}/environments/{env}/entries/{entry}/tasks`.
#[derive(Clone, Copy, Debug)]
pub struct EntryTaskService<'a> {
    client: &'a Client,
}

impl<'a> EntryTaskService<'a> {
    pub(crate) const fn new(client: &'a Client) -> Self {
        Self { client }
    }

    fn collection_path(&self, space_id: &str, entry_id: &str) -> Result<String, HttpError> {
        let entries = format!("{}/entries", self.client.environment_path(space_id)?);
        Ok(format!("{}/tasks", resource::child_path(&entries, entry_id)?))
    }

    /// Lists the tasks of an entry.
    ///
    /// # Errors
    ///
    /// Returns any [`HttpError`] from fetching the first page.
    pub async fn list(
        &self,
        ctx: &Context,
        space_id: &str,
        entry_id: &str,
        query: Option<Query>,
    ) -> Result<Collection<EntryTask>, HttpError> {
        let path = self.collection_path(space_id, entry_id)?;
        resource::list(self.client.http(), path, query, ctx).await
    }

    /// Fetches one task.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::NotFound`] if the task does not exist.
    pub async fn get(
        &self,
        ctx: &Context,
        space_id: &str,
        entry_id: &str,
        task_id: &str,
    ) -> Result<EntryTask, HttpError> {
        let path = resource::child_path(&self.collection_path(space_id, entry_id)?, task_id)?;
        resource::fetch(self.client.http(), path, ctx).await
    }

    /// Creates or updates a task.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::ValidationFailed`] if the assignee cannot be
    /// assigned.
    pub async fn upsert(
        &self,
        ctx: &Context,
        space_id: &str,
        entry_id: &str,
        task: &EntryTask,
    ) -> Result<EntryTask, HttpError> {
        let path = self.collection_path(space_id, entry_id)?;
        resource::upsert(self.client.http(), &path, task, &[], ctx).await
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if the task has no `sys.id`.
    pub async fn delete(
        &self,
        ctx: &Context,
        space_id: &str,
        entry_id: &str,
        task: &EntryTask,
    ) -> Result<(), HttpError> {
        let id = resource::require_id(task, "delete")?;
        let path = resource::child_path(&self.collection_path(space_id, entry_id)?, id)?;
        resource::delete(self.client.http(), path, task, ctx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_links_assignee() {
        let task = EntryTask::new("Check the spelling", "user1");

        assert_eq!(
            serde_json::to_value(&task).unwrap(),
            serde_json::json!({
                "body": "Check the spelling",
                "status": "active",
                "assignedTo": {"sys": {"id": "user1", "type": "Link", "linkType": "User"}}
            })
        );
    }
}
