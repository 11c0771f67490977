//! Paginated listings.
//!
//! A [`Collection<T>`] holds one page of a list endpoint together with the
//! request that produced it. [`Collection::next`] re-issues that request
//! with the following `skip` and overwrites the page in place.
//!
//! # Deref Pattern
//!
//! `Collection<T>` implements `Deref<Target = [T]>` over the current page:
//!
//! ```rust,ignore
//! let mut entries = client.entries().list(&ctx, "space", None).await?;
//! loop {
//!     for entry in entries.iter() {
//!         println!("{:?}", entry.sys.as_ref().and_then(|s| s.id.as_deref()));
//!     }
//!     if !entries.has_more() {
//!         break;
//!     }
//!     entries.next(&ctx).await?;
//! }
//! ```

use std::ops::Deref;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::clients::{Context, HttpClient, HttpError, HttpRequest};
use crate::rest::query::Query;
use crate::rest::sys::Sys;

/// Field every listing is ordered by when the caller gives no query.
pub const DEFAULT_ORDER_FIELD: &str = "sys.createdAt";

#[derive(Deserialize)]
struct Page<T> {
    #[serde(default)]
    sys: Option<Sys>,
    #[serde(default)]
    total: u64,
    #[serde(default)]
    skip: u64,
    #[serde(default)]
    limit: u64,
    #[serde(default = "Vec::new")]
    items: Vec<T>,
    #[serde(default)]
    includes: Option<serde_json::Value>,
}

/// One page of a paginated listing, plus the cursor to fetch the next.
///
/// The page counter starts at 1 and is incremented each time a fetch is
/// issued, whether or not it succeeds.
#[derive(Debug)]
pub struct Collection<T> {
    http: HttpClient,
    request: HttpRequest,
    query: Query,
    page: u64,
    /// Collection metadata (`{"type": "Array"}`).
    pub sys: Option<Sys>,
    /// Total number of matching items across all pages.
    pub total: u64,
    /// Offset of the current page.
    pub skip: u64,
    /// Page size reported by the API.
    pub limit: u64,
    /// Items on the current page.
    pub items: Vec<T>,
    /// Linked entries and assets resolved through `include`.
    pub includes: Option<serde_json::Value>,
}

impl<T: DeserializeOwned> Collection<T> {
    /// Creates a collection and fetches its first page.
    ///
    /// Without a `query`, items are ordered by `sys.createdAt` ascending.
    ///
    /// # Errors
    ///
    /// Returns any [`HttpError`] from fetching the first page.
    pub async fn new(
        http: HttpClient,
        request: HttpRequest,
        query: Option<Query>,
        ctx: &Context,
    ) -> Result<Self, HttpError> {
        let query = query.unwrap_or_else(|| Query::new().order(DEFAULT_ORDER_FIELD, false));
        let mut collection = Self {
            http,
            request,
            query,
            page: 1,
            sys: None,
            total: 0,
            skip: 0,
            limit: 0,
            items: Vec::new(),
            includes: None,
        };
        collection.next(ctx).await?;
        Ok(collection)
    }

    /// Fetches the next page into this collection.
    ///
    /// The request is re-issued with `skip = limit * (page - 1)`, where
    /// `limit` is the page size of the last successful fetch. A zero skip is
    /// left out of the query string.
    ///
    /// # Errors
    ///
    /// Returns any [`HttpError`] from the pipeline. The page counter has
    /// already advanced when an error is returned; the page fields keep
    /// their previous values.
    pub async fn next(&mut self, ctx: &Context) -> Result<&mut Self, HttpError> {
        let skip = self.limit * (self.page - 1);
        self.query.set_skip(skip);
        self.request.set_query(self.query.params());
        self.page += 1;

        let page: Page<T> = self.http.request_json(&self.request, ctx).await?;

        self.sys = page.sys;
        self.total = page.total;
        self.skip = page.skip;
        self.limit = page.limit;
        self.items = page.items;
        self.includes = page.includes;

        Ok(self)
    }

    /// Follows [`next`](Self::next) until every page has been read and
    /// returns all items.
    ///
    /// # Errors
    ///
    /// Returns the first [`HttpError`] encountered.
    pub async fn collect_all(mut self, ctx: &Context) -> Result<Vec<T>, HttpError> {
        let mut all = Vec::new();
        loop {
            let more = self.has_more() && !self.items.is_empty() && self.limit > 0;
            all.append(&mut self.items);
            if !more {
                return Ok(all);
            }
            self.next(ctx).await?;
        }
    }
}

impl<T> Collection<T> {
    /// Returns the number of the page the next fetch will request.
    #[must_use]
    pub const fn page(&self) -> u64 {
        self.page
    }

    /// Returns the query used for fetching.
    #[must_use]
    pub const fn query(&self) -> &Query {
        &self.query
    }

    /// Returns `true` if items exist beyond the current page.
    #[must_use]
    pub fn has_more(&self) -> bool {
        let seen = u64::try_from(self.items.len()).unwrap_or(u64::MAX);
        self.skip.saturating_add(seen) < self.total
    }

    /// Takes the items of the current page.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

impl<T> Deref for Collection<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_decodes_envelope() {
        let page: Page<serde_json::Value> = serde_json::from_str(
            r#"{
                "sys": {"type": "Array"},
                "total": 3,
                "skip": 0,
                "limit": 2,
                "items": [{"a": 1}, {"a": 2}],
                "includes": {"Asset": []}
            }"#,
        )
        .unwrap();

        assert_eq!(page.sys.unwrap().kind.as_deref(), Some("Array"));
        assert_eq!(page.total, 3);
        assert_eq!(page.limit, 2);
        assert_eq!(page.items.len(), 2);
        assert!(page.includes.is_some());
    }

    #[test]
    fn test_page_tolerates_missing_fields() {
        let page: Page<serde_json::Value> = serde_json::from_str("{}").unwrap();
        assert_eq!(page.total, 0);
        assert!(page.items.is_empty());
        assert!(page.sys.is_none());
    }
}
