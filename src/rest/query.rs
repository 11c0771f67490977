//! Search parameters for list endpoints.
//!
//! [`Query`] is an owned builder for the URL query parameters Contentful list
//! endpoints accept: ordering, paging, field filters, projections, link
//! resolution depth, locale, content type, full-text search and MIME type
//! groups.
//!
//! Serialization is deterministic. Parameters are sorted by key and
//! multi-valued parameters are joined with `,` in insertion order.
//!
//! # Example
//!
//! ```rust
//! use contentful::Query;
//!
//! let query = Query::new()
//!     .content_type("blogPost")
//!     .equal("fields.slug", "hello-world")
//!     .order("sys.createdAt", true)
//!     .limit(10);
//!
//! assert_eq!(
//!     query.to_query_string(),
//!     "content_type=blogPost&fields.slug=hello-world&limit=10&order=-sys.createdAt"
//! );
//! ```

use std::collections::BTreeMap;
use std::fmt;

/// MIME type groups accepted by the `mimetype_group` asset filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MimeTypeGroup {
    /// `attachment`
    Attachment,
    /// `plaintext`
    Plaintext,
    /// `image`
    Image,
    /// `audio`
    Audio,
    /// `video`
    Video,
    /// `richtext`
    Richtext,
    /// `presentation`
    Presentation,
    /// `spreadsheet`
    Spreadsheet,
    /// `pdfdocument`
    PdfDocument,
    /// `archive`
    Archive,
    /// `code`
    Code,
    /// `markup`
    Markup,
}

impl MimeTypeGroup {
    /// Returns the wire name of the group.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Attachment => "attachment",
            Self::Plaintext => "plaintext",
            Self::Image => "image",
            Self::Audio => "audio",
            Self::Video => "video",
            Self::Richtext => "richtext",
            Self::Presentation => "presentation",
            Self::Spreadsheet => "spreadsheet",
            Self::PdfDocument => "pdfdocument",
            Self::Archive => "archive",
            Self::Code => "code",
            Self::Markup => "markup",
        }
    }
}

/// Query parameters for a list request.
///
/// Builder methods consume and return the query. Single-valued parameters
/// are replaced when set twice; `order`, `select` and the array filters
/// accumulate.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query {
    params: BTreeMap<String, Vec<String>>,
}

impl Query {
    /// Creates an empty query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), vec![value.into()]);
        self
    }

    fn push<I, S>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params
            .entry(key.into())
            .or_default()
            .extend(values.into_iter().map(Into::into));
        self
    }

    /// Adds an ordering field. Later calls add secondary orderings.
    #[must_use]
    pub fn order(self, field: &str, descending: bool) -> Self {
        let value = if descending {
            format!("-{field}")
        } else {
            field.to_string()
        };
        self.push("order", [value])
    }

    /// Sets the page size.
    #[must_use]
    pub fn limit(self, limit: u32) -> Self {
        self.set("limit", limit.to_string())
    }

    /// Sets the number of items to skip.
    #[must_use]
    pub fn skip(self, skip: u64) -> Self {
        self.set("skip", skip.to_string())
    }

    /// Restricts the returned fields, e.g. `["sys.id", "fields.title"]`.
    #[must_use]
    pub fn select<I, S>(self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push("select", fields)
    }

    /// Sets how many levels of links are resolved into `includes`.
    #[must_use]
    pub fn include(self, levels: u8) -> Self {
        self.set("include", levels.to_string())
    }

    /// Sets the locale, or `*` for all locales.
    #[must_use]
    pub fn locale(self, code: &str) -> Self {
        self.set("locale", code)
    }

    /// Restricts entries to one content type.
    #[must_use]
    pub fn content_type(self, id: &str) -> Self {
        self.set("content_type", id)
    }

    /// Full-text search across all text fields.
    #[must_use]
    pub fn query(self, text: &str) -> Self {
        self.set("query", text)
    }

    /// `field=value`
    #[must_use]
    pub fn equal(self, field: &str, value: impl fmt::Display) -> Self {
        self.set(field, value.to_string())
    }

    /// `field[ne]=value`
    #[must_use]
    pub fn not_equal(self, field: &str, value: impl fmt::Display) -> Self {
        self.set(format!("{field}[ne]"), value.to_string())
    }

    /// `field[all]=a,b` matches when the array field contains every value.
    #[must_use]
    pub fn all<I, S>(self, field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(format!("{field}[all]"), values)
    }

    /// `field[in]=a,b` matches when the field equals any value.
    #[must_use]
    pub fn in_values<I, S>(self, field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(format!("{field}[in]"), values)
    }

    /// `field[nin]=a,b` matches when the field equals none of the values.
    #[must_use]
    pub fn not_in<I, S>(self, field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(format!("{field}[nin]"), values)
    }

    /// `field[exists]=true|false`
    #[must_use]
    pub fn exists(self, field: &str, exists: bool) -> Self {
        self.set(format!("{field}[exists]"), exists.to_string())
    }

    /// `field[gt]=value`
    #[must_use]
    pub fn greater_than(self, field: &str, value: impl fmt::Display) -> Self {
        self.set(format!("{field}[gt]"), value.to_string())
    }

    /// `field[gte]=value`
    #[must_use]
    pub fn greater_than_or_equal(self, field: &str, value: impl fmt::Display) -> Self {
        self.set(format!("{field}[gte]"), value.to_string())
    }

    /// `field[lt]=value`
    #[must_use]
    pub fn less_than(self, field: &str, value: impl fmt::Display) -> Self {
        self.set(format!("{field}[lt]"), value.to_string())
    }

    /// `field[lte]=value`
    #[must_use]
    pub fn less_than_or_equal(self, field: &str, value: impl fmt::Display) -> Self {
        self.set(format!("{field}[lte]"), value.to_string())
    }

    /// `field[match]=text` full-text search on one field.
    #[must_use]
    pub fn matches(self, field: &str, text: &str) -> Self {
        self.set(format!("{field}[match]"), text)
    }

    /// Restricts assets to a MIME type group.
    #[must_use]
    pub fn mime_type(self, group: MimeTypeGroup) -> Self {
        self.set("mimetype_group", group.as_str())
    }

    /// Returns the current `limit`, if set.
    #[must_use]
    pub fn limit_value(&self) -> Option<u32> {
        self.single("limit").and_then(|v| v.parse().ok())
    }

    /// Returns the current `skip`, if set.
    #[must_use]
    pub fn skip_value(&self) -> Option<u64> {
        self.single("skip").and_then(|v| v.parse().ok())
    }

    fn single(&self, key: &str) -> Option<&str> {
        self.params
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Sets `skip` in place. Zero removes the parameter.
    pub(crate) fn set_skip(&mut self, skip: u64) {
        if skip == 0 {
            self.params.remove("skip");
        } else {
            self.params
                .insert("skip".to_string(), vec![skip.to_string()]);
        }
    }

    /// Returns `true` if no parameter is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Returns the parameters as `(key, value)` pairs, sorted by key.
    #[must_use]
    pub fn params(&self) -> Vec<(String, String)> {
        self.params
            .iter()
            .map(|(key, values)| (key.clone(), values.join(",")))
            .collect()
    }

    /// Returns the URL-encoded query string, without a leading `?`.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params())
            .finish()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}
