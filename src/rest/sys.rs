//! System metadata shared by every Contentful entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A link to another entity.
///
/// ```json
/// { "sys": { "type": "Link", "linkType": "Space", "id": "cfexampleapi" } }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// The link target.
    pub sys: LinkSys,
}

/// The `sys` block of a [`Link`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSys {
    /// Id of the linked entity.
    pub id: String,
    /// Always `Link`.
    #[serde(rename = "type", default = "LinkSys::default_type")]
    pub kind: String,
    /// Type of the linked entity, e.g. `Entry`, `Asset`, `ContentType`.
    pub link_type: String,
}

impl LinkSys {
    fn default_type() -> String {
        "Link".to_string()
    }
}

impl Link {
    /// Creates a link to an entity of `link_type`.
    #[must_use]
    pub fn new(link_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            sys: LinkSys {
                id: id.into(),
                kind: LinkSys::default_type(),
                link_type: link_type.into(),
            },
        }
    }
}

/// System metadata of an entity.
///
/// Every field is optional: new entities have no `sys` at all, and the
/// delivery API omits the versioning fields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sys {
    /// Entity id. Absent until the entity is first saved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Entity type, e.g. `Entry` or `Asset`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Current version, sent back as `X-Contentful-Version` on writes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
    /// Delivery API revision counter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<u64>,
    /// Creation time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Time of the last update.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Time of the most recent publish.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    /// Time of the first publish.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_published_at: Option<DateTime<Utc>>,
    /// Time the entity was archived.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived_at: Option<DateTime<Utc>>,
    /// Version that was last published.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_version: Option<u64>,
    /// Number of times the entity has been published.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_counter: Option<u64>,
    /// Version that was archived.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived_version: Option<u64>,
    /// Locale of a delivery response fetched for a single locale.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Owning space.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space: Option<Link>,
    /// Owning environment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<Link>,
    /// Content type of an entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<Link>,
    /// User who created the entity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<Link>,
    /// User who last updated the entity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<Link>,
}

/// An entity that carries `sys` metadata.
///
/// Upserts send `X-Contentful-Version: version()`; entities that have never
/// been saved report version 1.
pub trait Versioned {
    /// Returns the entity's system metadata, if any.
    fn sys(&self) -> Option<&Sys>;

    /// Returns the entity id, if the entity has been saved.
    fn id(&self) -> Option<&str> {
        self.sys().and_then(|sys| sys.id.as_deref())
    }

    /// Returns the stored version, or 1 when unknown.
    fn version(&self) -> u64 {
        self.sys().and_then(|sys| sys.version).unwrap_or(1)
    }

    /// Returns `true` if the entity has a published version.
    fn is_published(&self) -> bool {
        self.sys().and_then(|sys| sys.published_version).is_some()
    }
}
