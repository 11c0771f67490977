//! Roles of a space.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clients::{Client, Context, HttpError};
use crate::rest::{resource, Collection, Query, Sys};

/// A role granting a set of policies and permissions.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Role {
    /// System metadata. `None` for an entity that has not been saved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sys: Option<Sys>,
    /// Display name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Access rules, evaluated together.
    #[serde(default)]
    pub policies: Vec<Policy>,
    /// Permissions outside the content policies.
    #[serde(default)]
    pub permissions: Permissions,
}

resource!(Role, "role");

/// One `allow` or `deny` rule of a role.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    /// `allow` or `deny`.
    pub effect: String,
    /// `"all"` or a list of action names.
    pub actions: Value,
    /// Which entities the policy covers, as raw JSON.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub constraint: Value,
}

/// Coarse permissions of a role. Each is `"all"` or a list of actions.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Permissions {
    /// `"all"` or a list of actions.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub content_model: Value,
    /// `"all"` or a list of actions.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub settings: Value,
    /// `"all"` or a list of actions.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub content_delivery: Value,
    /// `"all"` or a list of actions.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub environments: Value,
    /// `"all"` or a list of actions.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub environment_aliases: Value,
}

/// Operations on `/spaces/{space}/roles`.
#[derive(Clone, Copy, Debug)]
pub struct RoleService<'a> {
    client: &'a Client,
}

impl<'a> RoleService<'a> {
    pub(crate) const fn new(client: &'a Client) -> Self {
        Self { client }
    }

    fn collection_path(&self, space_id: &str) -> Result<String, HttpError> {
        Ok(format!("{}/roles", self.client.space_path(space_id)?))
    }

    /// Lists roles.
    ///
    /// # Errors
    ///
    /// Returns any [`HttpError`] from fetching the first page.
    pub async fn list(
        &self,
        ctx: &Context,
        space_id: &str,
        query: Option<Query>,
    ) -> Result<Collection<Role>, HttpError> {
        let path = self.collection_path(space_id)?;
        resource::list(self.client.http(), path, query, ctx).await
    }

    /// Fetches one role.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::NotFound`] if the role does not exist.
    pub async fn get(
        &self,
        ctx: &Context,
        space_id: &str,
        role_id: &str,
    ) -> Result<Role, HttpError> {
        let path = resource::child_path(&self.collection_path(space_id)?, role_id)?;
        resource::fetch(self.client.http(), path, ctx).await
    }

    /// Creates or updates a role.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::ValidationFailed`] if a policy is malformed.
    pub async fn upsert(
        &self,
        ctx: &Context,
        space_id: &str,
        role: &Role,
    ) -> Result<Role, HttpError> {
        let path = self.collection_path(space_id)?;
        resource::upsert(self.client.http(), &path, role, &[], ctx).await
    }

    /// Deletes a role.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if the role has no `sys.id`.
    pub async fn delete(
        &self,
        ctx: &Context,
        space_id: &str,
        role: &Role,
    ) -> Result<(), HttpError> {
        let id = resource::require_id(role, "delete")?;
        let path = resource::child_path(&self.collection_path(space_id)?, id)?;
        resource::delete(self.client.http(), path, role, ctx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_policies_and_permissions() {
        let raw = serde_json::json!({
            "name": "Author",
            "description": "Writes posts",
            "policies": [
                {
                    "effect": "allow",
                    "actions": ["read", "create"],
                    "constraint": {"and": [{"equals": [{"doc": "sys.type"}, "Entry"]}]}
                }
            ],
            "permissions": {"ContentModel": ["read"], "Settings": "all"}
        });

        let role: Role = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(role.policies[0].effect, "allow");
        assert_eq!(role.permissions.settings, "all");
        assert!(role.permissions.environments.is_null());

        assert_eq!(serde_json::to_value(&role).unwrap(), raw);
    }
}
