//! Contentful resource models and the services that read and write them.
//!
//! Each resource module pairs a model (e.g. [`Entry`]) with a service
//! borrowed from the [`Client`](crate::Client) (e.g. [`EntryService`]).
//!
//! # Path Scoping
//!
//! | Service | Collection path |
//! |---------|-----------------|
//! | spaces | `/spaces` |
//! | environments | `/spaces/{space}/environments` |
//! | entries | `/spaces/{space}/environments/{env}/entries` |
//! | assets | `/spaces/{space}/environments/{env}/assets` |
//! | content types | `/spaces/{space}/environments/{env}/content_types` |
//! | locales | `/spaces/{space}/environments/{env}/locales` |
//! | roles | `/spaces/{space}/roles` |
//! | webhooks | `/spaces/{space}/webhook_definitions` |
//! | uploads | `/spaces/{space}/uploads` (Upload API) |
//! | environment aliases | `/spaces/{space}/environment_aliases` |
//! | scheduled actions | `/spaces/{space}/scheduled_actions` |
//! | editor interfaces | `/spaces/{space}/environments/{env}/content_types/{ct}/editor_interface` |
//! | entry tasks | `/spaces/{space}/environments/{env}/entries/{entry}/tasks` |
//! | extensions | `/spaces/{space}/environments/{env}/extensions` |
//! | app installations | `/spaces/{space}/environments/{env}/app_installations` |
//! | snapshots | `/spaces/{space}/environments/{env}/{entries,content_types}/{id}/snapshots` |
//! | app definitions | `/organizations/{org}/app_definitions` |
//! | usages | `/organizations/{org}/{organization,space}_periodic_usages` |
//! | organizations | `/organizations` |
//! | users | `/users/me` |
//! | access tokens | `/users/me/access_tokens` |
//!
//! `{env}` is the client's environment, see
//! [`Client::set_environment`](crate::Client::set_environment).
//!
//! # Example
//!
//! ```rust,ignore
//! use contentful::{Client, Context, Query};
//! use contentful::rest::resources::Entry;
//!
//! let ctx = Context::background();
//! let entries = client.entries();
//!
//! let mut entry = entries.get(&ctx, "space", "nyancat").await?;
//! entry.fields.insert("name".into(), serde_json::json!({"en-US": "Nyan"}));
//! let entry = entries.upsert(&ctx, "space", "cat", &entry).await?;
//! let entry = entries.publish(&ctx, "space", &entry).await?;
//! ```

/// Implements [`Versioned`](crate::rest::Versioned) and
/// [`Resource`](crate::rest::Resource) for a model with an
/// `Option<Sys>` field named `sys`.
macro_rules! resource {
    ($model:ty, $name:literal) => {
        impl $crate::rest::Versioned for $model {
            fn sys(&self) -> Option<&$crate::rest::Sys> {
                self.sys.as_ref()
            }
        }

        impl $crate::rest::Resource for $model {
            const NAME: &'static str = $name;
        }
    };
}

mod access_token;
mod app_definition;
mod app_installation;
mod asset;
mod content_type;
mod editor_interface;
mod entry;
mod entry_task;
mod environment;
mod environment_alias;
mod extension;
mod locale;
mod organization;
mod role;
mod scheduled_action;
mod snapshot;
mod space;
mod upload;
mod usage;
mod user;
mod webhook;

pub use access_token::{AccessTokenService, PersonalAccessToken};
pub use app_definition::{AppDefinition, AppDefinitionService, AppLocation};
pub use app_installation::{AppInstallation, AppInstallationService};
pub use asset::{Asset, AssetFields, AssetService, File, FileDetails, ImageDetails};
pub use content_type::{ContentType, ContentTypeService, Field, FieldItems};
pub use editor_interface::{Control, EditorInterface, EditorInterfaceService, SidebarWidget};
pub use entry::{Entry, EntryService};
pub use entry_task::{EntryTask, EntryTaskService, TaskStatus};
pub use environment::{Environment, EnvironmentService};
pub use environment_alias::{EnvironmentAlias, EnvironmentAliasService};
pub use extension::{Extension, ExtensionDetails, ExtensionService, FieldType};
pub use locale::{Locale, LocaleService};
pub use organization::{Organization, OrganizationService};
pub use role::{Permissions, Policy, Role, RoleService};
pub use scheduled_action::{
    ScheduledAction, ScheduledActionKind, ScheduledActionService, ScheduledFor,
};
pub use snapshot::{ContentTypeSnapshot, EntrySnapshot, SnapshotService};
pub use space::{Space, SpaceService};
pub use upload::{Upload, UploadService};
pub use usage::{DateRange, Usage, UsageFilter, UsageMetric, UsageService};
pub use user::{User, UserService};
pub use webhook::{Webhook, WebhookHeader, WebhookService};
