//! API usage of an organization, in total or broken down by space.
//!
//! ```rust,ignore
//! use chrono::NaiveDate;
//! use contentful::rest::resources::{UsageFilter, UsageMetric};
//!
//! let filter = UsageFilter::new(
//!     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
//! )
//! .metric(UsageMetric::Cma)
//! .metric(UsageMetric::Cda);
//!
//! let usages = client.usages().organization_usage(&ctx, "org", &filter).await?;
//! ```

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::clients::{Client, Context, HttpError};
use crate::rest::{resource, Collection, Query, Sys};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Usage of one metric over a date range.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    /// System metadata. `sys.type` tells organization and space usage apart.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sys: Option<Sys>,
    /// Unit of the counts, such as `apiRequests`.
    pub unit_of_measure: String,
    /// Metric code, such as `cma`.
    pub metric: String,
    /// Days covered.
    pub date_range: DateRange,
    /// Sum over the date range.
    #[serde(rename = "usage")]
    pub total: u64,
    /// Count per day.
    #[serde(default)]
    pub usage_per_day: BTreeMap<NaiveDate, u64>,
}

resource!(Usage, "usage");

/// An inclusive range of days.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    /// First day.
    pub start_at: NaiveDate,
    /// Last day.
    pub end_at: NaiveDate,
}

/// An API whose calls are metered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageMetric {
    /// Content Management API.
    Cma,
    /// Content Delivery API.
    Cda,
    /// Content Preview API.
    Cpa,
    /// GraphQL Content API.
    Gql,
}

impl UsageMetric {
    /// Returns the metric code used in queries.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cma => "cma",
            Self::Cda => "cda",
            Self::Cpa => "cpa",
            Self::Gql => "gql",
        }
    }
}

impl fmt::Display for UsageMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which usages to fetch.
///
/// Without metrics every metric is returned. Results are ordered by usage,
/// highest first, unless [`order`](Self::order) says otherwise.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UsageFilter {
    start_at: NaiveDate,
    end_at: NaiveDate,
    metrics: Vec<UsageMetric>,
    order: Option<(String, bool)>,
    limit: Option<u32>,
}

impl UsageFilter {
    /// Covers the days from `start_at` to `end_at`, both included.
    #[must_use]
    pub const fn new(start_at: NaiveDate, end_at: NaiveDate) -> Self {
        Self {
            start_at,
            end_at,
            metrics: Vec::new(),
            order: None,
            limit: None,
        }
    }

    /// Adds a metric.
    #[must_use]
    pub fn metric(mut self, metric: UsageMetric) -> Self {
        if !self.metrics.contains(&metric) {
            self.metrics.push(metric);
        }
        self
    }

    /// Orders by `field` instead of by descending usage.
    #[must_use]
    pub fn order(mut self, field: &str, descending: bool) -> Self {
        self.order = Some((field.to_string(), descending));
        self
    }

    /// Sets the page size.
    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Returns the query parameters for this filter.
    #[must_use]
    pub fn to_query(&self) -> Query {
        let mut query = match &self.order {
            Some((field, descending)) => Query::new().order(field, *descending),
            None => Query::new().order("usage", true),
        };
        if !self.metrics.is_empty() {
            let metrics = self.metrics.iter().copied().map(UsageMetric::as_str);
            query = query.in_values("metric", metrics);
        }
        if let Some(limit) = self.limit {
            query = query.limit(limit);
        }
        query
            .equal("dateRange.startAt", self.start_at.format(DATE_FORMAT))
            .equal("dateRange.endAt", self.end_at.format(DATE_FORMAT))
    }
}

/// Operations on `/organizations/{organization}/*_periodic_usages`.
#[derive(Clone, Copy, Debug)]
pub struct UsageService<'a> {
    client: &'a Client,
}

impl<'a> UsageService<'a> {
    pub(crate) const fn new(client: &'a Client) -> Self {
        Self { client }
    }

    async fn periodic(
        &self,
        ctx: &Context,
        organization_id: &str,
        kind: &str,
        filter: &UsageFilter,
    ) -> Result<Collection<Usage>, HttpError> {
        let path = format!(
            "{}/{kind}_periodic_usages",
            self.client.organization_path(organization_id)?
        );
        tracing::debug!(
            %path,
            start_at = %filter.start_at,
            end_at = %filter.end_at,
            "fetching usage"
        );
        resource::list(self.client.http(), path, Some(filter.to_query()), ctx).await
    }

    /// Fetches the organization's usage per metric.
    ///
    /// # Errors
    ///
    /// Returns any [`HttpError`] from fetching the first page.
    pub async fn organization_usage(
        &self,
        ctx: &Context,
        organization_id: &str,
        filter: &UsageFilter,
    ) -> Result<Collection<Usage>, HttpError> {
        self.periodic(ctx, organization_id, "organization", filter)
            .await
    }

    /// Fetches the organization's usage per space and metric.
    ///
    /// # Errors
    ///
    /// Returns any [`HttpError`] from fetching the first page.
    pub async fn space_usage(
        &self,
        ctx: &Context,
        organization_id: &str,
        filter: &UsageFilter,
    ) -> Result<Collection<Usage>, HttpError> {
        self.periodic(ctx, organization_id, "space", filter).await
    }
}
