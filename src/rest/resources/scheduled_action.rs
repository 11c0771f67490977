//! Scheduled publishing.
//!
//! Scheduled actions live under the space but always name the environment
//! they act in. The service fills that in from the client's environment.
//!
//! ```rust,ignore
//! use contentful::rest::resources::{ScheduledAction, ScheduledActionKind};
//!
//! let at = "2030-01-01T09:00:00Z".parse()?;
//! let action = ScheduledAction::for_entry("nyancat", ScheduledActionKind::Publish, at);
//! let action = client.scheduled_actions().create(&ctx, "space", action).await?;
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{Client, Context, HttpError, HttpMethod};
use crate::rest::{resource, Collection, Link, Query, Sys};

/// A publish or unpublish scheduled for a point in time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledAction {
    /// System metadata. `None` for an entity that has not been saved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sys: Option<Sys>,
    /// Link to the `Entry` or `Asset` acted on.
    pub entity: Link,
    /// Link to the `Environment` the action runs in.
    pub environment: Link,
    /// When the action runs.
    pub scheduled_for: ScheduledFor,
    /// What happens to the entity.
    pub action: ScheduledActionKind,
}

resource!(ScheduledAction, "scheduled action");

impl ScheduledAction {
    /// Schedules `action` on entry `entry_id` at `datetime`.
    ///
    /// The environment link is left empty; [`ScheduledActionService::create`]
    /// fills it in.
    #[must_use]
    pub fn for_entry(
        entry_id: impl Into<String>,
        action: ScheduledActionKind,
        datetime: DateTime<Utc>,
    ) -> Self {
        Self {
            sys: None,
            entity: Link::new("Entry", entry_id),
            environment: Link::new("Environment", String::new()),
            scheduled_for: ScheduledFor {
                datetime,
                timezone: None,
            },
            action,
        }
    }
}

/// When a [`ScheduledAction`] runs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledFor {
    /// Time the action runs.
    pub datetime: DateTime<Utc>,
    /// IANA zone shown in the web app, e.g. `Europe/Berlin`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

/// What a [`ScheduledAction`] does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduledActionKind {
    Publish,
    Unpublish,
}

/// Operations on `/spaces/{space}/scheduled_actions`.
#[derive(Clone, Copy, Debug)]
pub struct ScheduledActionService<'a> {
    client: &'a Client,
}

impl<'a> ScheduledActionService<'a> {
    pub(crate) const fn new(client: &'a Client) -> Self {
        Self { client }
    }

    fn collection_path(&self, space_id: &str) -> Result<String, HttpError> {
        Ok(format!("{}/scheduled_actions", self.client.space_path(space_id)?))
    }

    fn environment_query(&self) -> Query {
        Query::new().equal("environment.sys.id", self.client.environment())
    }

    /// Lists the actions scheduled for entry `entry_id` in the client's
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns any [`HttpError`] from fetching the first page.
    pub async fn list(
        &self,
        ctx: &Context,
        space_id: &str,
        entry_id: &str,
    ) -> Result<Collection<ScheduledAction>, HttpError> {
        let path = self.collection_path(space_id)?;
        let query = self.environment_query().equal("entity.sys.id", entry_id);
        resource::list(self.client.http(), path, Some(query), ctx).await
    }

    /// Schedules an action in the client's environment.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::ValidationFailed`] if the time is in the past or
    /// the entity cannot be scheduled.
    pub async fn create(
        &self,
        ctx: &Context,
        space_id: &str,
        mut action: ScheduledAction,
    ) -> Result<ScheduledAction, HttpError> {
        action.environment = Link::new("Environment", self.client.environment().as_ref());
        let path = self.collection_path(space_id)?;
        resource::write(self.client.http(), HttpMethod::Post, path, &action, &[], ctx).await
    }

    /// Cancels a scheduled action.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if `action_id` is empty.
    pub async fn delete(
        &self,
        ctx: &Context,
        space_id: &str,
        action_id: &str,
    ) -> Result<(), HttpError> {
        let path = resource::child_path(&self.collection_path(space_id)?, action_id)?;
        let query = self.environment_query();
        resource::remove(self.client.http(), path, Some(&query), ctx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_entry_serializes_schedule() {
        let at = "2030-01-01T09:00:00Z".parse().unwrap();
        let action = ScheduledAction::for_entry("nyancat", ScheduledActionKind::Unpublish, at);

        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(value["entity"]["sys"]["linkType"], "Entry");
        assert_eq!(value["entity"]["sys"]["id"], "nyancat");
        assert_eq!(value["action"], "unpublish");
        assert_eq!(value["scheduledFor"]["datetime"], "2030-01-01T09:00:00Z");
        assert!(value["scheduledFor"].get("timezone").is_none());
    }
}
