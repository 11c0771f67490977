//! Editor interfaces: which widget edits each field of a content type.
//!
//! Every content type has exactly one editor interface, created together
//! with the content type. It can be read and updated but not deleted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clients::{Client, Context, HttpError, HttpMethod};
use crate::rest::{resource, Collection, Query, Sys};

/// The editor interface of a content type.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EditorInterface {
    /// System metadata. `None` for an entity that has not been saved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sys: Option<Sys>,
    /// One control per field.
    #[serde(default)]
    pub controls: Vec<Control>,
    /// Sidebar widgets. Empty means the default sidebar.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sidebar: Vec<SidebarWidget>,
}

resource!(EditorInterface, "editor interface");

impl EditorInterface {
    /// Returns the control of field `field_id`.
    #[must_use]
    pub fn control(&self, field_id: &str) -> Option<&Control> {
        self.controls
            .iter()
            .find(|control| control.field_id == field_id)
    }
}

/// The widget used for one field.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Control {
    /// Id of the field this control edits.
    pub field_id: String,
    /// `builtin`, `extension` or `app`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub widget_namespace: Option<String>,
    /// Widget id within its namespace.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub widget_id: Option<String>,
    /// Widget-specific settings.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub settings: BTreeMap<String, Value>,
}

/// A widget in the entry sidebar.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarWidget {
    /// `sidebar-builtin`, `extension` or `app`.
    pub widget_namespace: String,
    /// Widget id within its namespace.
    pub widget_id: String,
    /// Widget-specific settings.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub settings: BTreeMap<String, Value>,
    /// Hidden from the sidebar.
    #[serde(default)]
    pub disabled: bool,
}

/// Operations on editor interfaces in the client's environment.
#[derive(Clone, Copy, Debug)]
pub struct EditorInterfaceService<'a> {
    client: &'a Client,
}

impl<'a> EditorInterfaceService<'a> {
    pub(crate) const fn new(client: &'a Client) -> Self {
        Self { client }
    }

    fn item_path(&self, space_id: &str, content_type_id: &str) -> Result<String, HttpError> {
        let content_types = format!("{}/content_types", self.client.environment_path(space_id)?);
        Ok(format!(
            "{}/editor_interface",
            resource::child_path(&content_types, content_type_id)?
        ))
    }

    /// Lists the editor interfaces of every content type.
    ///
    /// # Errors
    ///
    /// Returns any [`HttpError`] from fetching the first page.
    pub async fn list(
        &self,
        ctx: &Context,
        space_id: &str,
        query: Option<Query>,
    ) -> Result<Collection<EditorInterface>, HttpError> {
        let path = format!("{}/editor_interfaces", self.client.environment_path(space_id)?);
        resource::list(self.client.http(), path, query, ctx).await
    }

    /// Fetches the editor interface of a content type.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::NotFound`] if the content type does not exist.
    pub async fn get(
        &self,
        ctx: &Context,
        space_id: &str,
        content_type_id: &str,
    ) -> Result<EditorInterface, HttpError> {
        let path = self.item_path(space_id, content_type_id)?;
        resource::fetch(self.client.http(), path, ctx).await
    }

    /// Replaces the editor interface of a content type.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::VersionMismatch`] if the stored version moved on.
    pub async fn update(
        &self,
        ctx: &Context,
        space_id: &str,
        content_type_id: &str,
        editor_interface: &EditorInterface,
    ) -> Result<EditorInterface, HttpError> {
        let path = self.item_path(space_id, content_type_id)?;
        resource::write(
            self.client.http(),
            HttpMethod::Put,
            path,
            editor_interface,
            &[],
            ctx,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_lookup_by_field_id() {
        let editor_interface: EditorInterface = serde_json::from_str(
            r#"{
                "sys": {"id": "default", "type": "EditorInterface", "version": 3},
                "controls": [
                    {"fieldId": "name", "widgetId": "singleLine", "widgetNamespace": "builtin"},
                    {"fieldId": "lives", "widgetId": "numberEditor",
                     "settings": {"helpText": "1-9"}}
                ]
            }"#,
        )
        .unwrap();

        let lives = editor_interface.control("lives").unwrap();
        assert_eq!(lives.widget_id.as_deref(), Some("numberEditor"));
        assert_eq!(lives.settings["helpText"], "1-9");
        assert!(editor_interface.control("color").is_none());
        assert!(editor_interface.sidebar.is_empty());
    }
}
