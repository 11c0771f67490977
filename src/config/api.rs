//! Contentful API kinds.
//!
//! This module provides the [`ApiKind`] enum selecting which of the four
//! Contentful REST APIs a client talks to.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Media type sent with every Content Management API request.
pub const MANAGEMENT_CONTENT_TYPE: &str = "application/vnd.contentful.management.v1+json";

/// Media type sent with every Delivery and Preview API request.
pub const DELIVERY_CONTENT_TYPE: &str = "application/vnd.contentful.delivery.v1+json";

/// Contentful REST API selected by a client.
///
/// Each kind has a default base URL and a default `Content-Type`. The Upload
/// API shares the management media type by default; upload calls override it
/// with `application/octet-stream`.
///
/// # Example
///
/// ```rust
/// use contentful::ApiKind;
///
/// let kind: ApiKind = "cda".parse().unwrap();
/// assert_eq!(kind, ApiKind::Delivery);
/// assert_eq!(kind.base_url(), "https://cdn.contentful.com");
/// assert_eq!(kind.to_string(), "cda");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ApiKind {
    /// Content Management API (CMA).
    #[default]
    Management,
    /// Content Delivery API (CDA).
    Delivery,
    /// Content Preview API (CPA).
    Preview,
    /// Upload API.
    Upload,
}

impl ApiKind {
    /// Returns the production base URL for this API.
    #[must_use]
    pub const fn base_url(self) -> &'static str {
        match self {
            Self::Management => "https://api.contentful.com",
            Self::Delivery => "https://cdn.contentful.com",
            Self::Preview => "https://preview.contentful.com",
            Self::Upload => "https://upload.contentful.com",
        }
    }

    /// Returns the default `Content-Type` header value for this API.
    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Management | Self::Upload => MANAGEMENT_CONTENT_TYPE,
            Self::Delivery | Self::Preview => DELIVERY_CONTENT_TYPE,
        }
    }

    /// Returns `true` for the read-only delivery and preview APIs.
    #[must_use]
    pub const fn is_read_only(self) -> bool {
        matches!(self, Self::Delivery | Self::Preview)
    }
}

impl fmt::Display for ApiKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Management => "cma",
            Self::Delivery => "cda",
            Self::Preview => "cpa",
            Self::Upload => "upload",
        };
        f.write_str(s)
    }
}

impl FromStr for ApiKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cma" | "management" => Ok(Self::Management),
            "cda" | "delivery" => Ok(Self::Delivery),
            "cpa" | "preview" => Ok(Self::Preview),
            "upload" | "urc" => Ok(Self::Upload),
            _ => Err(ConfigError::InvalidApiKind {
                value: s.to_string(),
            }),
        }
    }
}
