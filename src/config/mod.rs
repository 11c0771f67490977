//! Configuration types for the Contentful client.
//!
//! This module provides the configuration used to construct a
//! [`Client`](crate::Client) for one of the Contentful REST APIs.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ContentfulConfig`]: The configuration struct holding all client settings
//! - [`ContentfulConfigBuilder`]: A builder for constructing [`ContentfulConfig`] instances
//! - [`ApiKind`]: Which API (CMA, CDA, CPA or Upload) the client talks to
//! - [`AccessToken`]: A validated access token with masked debug output
//! - [`BaseUrl`]: A validated absolute http(s) base URL
//! - [`EnvironmentId`]: A validated environment name
//!
//! # Example
//!
//! ```rust
//! use contentful::{AccessToken, ApiKind, ContentfulConfig};
//!
//! let config = ContentfulConfig::builder()
//!     .access_token(AccessToken::new("cda-token").unwrap())
//!     .api(ApiKind::Delivery)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url().as_ref(), "https://cdn.contentful.com");
//! ```

mod api;
mod newtypes;

pub use api::{ApiKind, DELIVERY_CONTENT_TYPE, MANAGEMENT_CONTENT_TYPE};
pub use newtypes::{AccessToken, BaseUrl, EnvironmentId};

use std::collections::BTreeMap;
use std::time::Duration;

use crate::clients::RetryPolicy;
use crate::error::ConfigError;

/// Configuration for a Contentful client.
///
/// # Thread Safety
///
/// `ContentfulConfig` is `Clone`, `Send`, and `Sync`.
///
/// # Default Query
///
/// Parameters in the default query are added to every request the client
/// sends. When a request already carries a parameter with the same key, the
/// default value replaces it.
///
/// # Example
///
/// ```rust
/// use contentful::{AccessToken, ContentfulConfig, RetryPolicy};
///
/// let config = ContentfulConfig::builder()
///     .access_token(AccessToken::new("CFPAT-token").unwrap())
///     .organization("org-id")
///     .default_query("locale", "en-US")
///     .retry_policy(RetryPolicy::new(3))
///     .build()
///     .unwrap();
///
/// assert_eq!(config.organization(), Some("org-id"));
/// assert_eq!(config.default_query().get("locale").map(String::as_str), Some("en-US"));
/// ```
#[derive(Clone, Debug)]
pub struct ContentfulConfig {
    access_token: AccessToken,
    api: ApiKind,
    base_url: BaseUrl,
    environment: EnvironmentId,
    organization: Option<String>,
    user_agent_prefix: Option<String>,
    default_query: BTreeMap<String, String>,
    retry_policy: RetryPolicy,
    timeout: Option<Duration>,
}

impl ContentfulConfig {
    /// Creates a new builder for constructing a `ContentfulConfig`.
    #[must_use]
    pub fn builder() -> ContentfulConfigBuilder {
        ContentfulConfigBuilder::new()
    }

    /// Returns the access token.
    #[must_use]
    pub const fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    /// Returns the API kind.
    #[must_use]
    pub const fn api(&self) -> ApiKind {
        self.api
    }

    /// Returns the base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the environment used for environment-scoped paths.
    #[must_use]
    pub const fn environment(&self) -> &EnvironmentId {
        &self.environment
    }

    /// Returns the organization id sent as `X-Contentful-Organization`, if set.
    #[must_use]
    pub fn organization(&self) -> Option<&str> {
        self.organization.as_deref()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the query parameters added to every request.
    #[must_use]
    pub const fn default_query(&self) -> &BTreeMap<String, String> {
        &self.default_query
    }

    /// Returns the rate-limit retry policy.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Returns the per-request transport timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

// Verify ContentfulConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ContentfulConfig>();
};

/// Builder for constructing [`ContentfulConfig`] instances.
///
/// The only required field is `access_token`.
///
/// # Defaults
///
/// - `api`: [`ApiKind::Management`]
/// - `base_url`: the production URL of the selected API
/// - `environment`: `master`
/// - `retry_policy`: [`RetryPolicy::default`] (5 retries, no jitter)
/// - everything else: unset
#[derive(Debug, Default)]
pub struct ContentfulConfigBuilder {
    access_token: Option<AccessToken>,
    api: Option<ApiKind>,
    base_url: Option<BaseUrl>,
    environment: Option<EnvironmentId>,
    organization: Option<String>,
    user_agent_prefix: Option<String>,
    default_query: BTreeMap<String, String>,
    retry_policy: Option<RetryPolicy>,
    timeout: Option<Duration>,
}

impl ContentfulConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the access token (required).
    #[must_use]
    pub fn access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    /// Sets the API kind.
    #[must_use]
    pub const fn api(mut self, api: ApiKind) -> Self {
        self.api = Some(api);
        self
    }

    /// Overrides the base URL, e.g. to point at a proxy or a mock server.
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the environment.
    #[must_use]
    pub fn environment(mut self, environment: EnvironmentId) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Sets the organization id.
    #[must_use]
    pub fn organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    /// Sets the user agent prefix.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Adds a query parameter sent with every request.
    #[must_use]
    pub fn default_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_query.insert(key.into(), value.into());
        self
    }

    /// Sets the rate-limit retry policy.
    #[must_use]
    pub const fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = Some(policy);
        self
    }

    /// Sets the per-request transport timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the [`ContentfulConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `access_token` is not
    /// set.
    pub fn build(self) -> Result<ContentfulConfig, ConfigError> {
        let access_token = self
            .access_token
            .ok_or(ConfigError::MissingRequiredField {
                field: "access_token",
            })?;
        let api = self.api.unwrap_or_default();
        let base_url = match self.base_url {
            Some(url) => url,
            None => BaseUrl::new(api.base_url())?,
        };

        Ok(ContentfulConfig {
            access_token,
            api,
            base_url,
            environment: self.environment.unwrap_or_default(),
            organization: self.organization,
            user_agent_prefix: self.user_agent_prefix,
            default_query: self.default_query,
            retry_policy: self.retry_policy.unwrap_or_default(),
            timeout: self.timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token() -> AccessToken {
        AccessToken::new("token").unwrap()
    }

    #[test]
    fn test_builder_requires_access_token() {
        let result = ContentfulConfigBuilder::new().build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField {
                field: "access_token"
            })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = ContentfulConfig::builder()
            .access_token(token())
            .build()
            .unwrap();

        assert_eq!(config.api(), ApiKind::Management);
        assert_eq!(config.base_url().as_ref(), "https://api.contentful.com");
        assert_eq!(config.environment().as_ref(), "master");
        assert!(config.organization().is_none());
        assert!(config.user_agent_prefix().is_none());
        assert!(config.default_query().is_empty());
        assert_eq!(config.retry_policy(), &RetryPolicy::default());
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_base_url_follows_api_kind() {
        let config = ContentfulConfig::builder()
            .access_token(token())
            .api(ApiKind::Preview)
            .build()
            .unwrap();

        assert_eq!(config.base_url().as_ref(), "https://preview.contentful.com");
    }

    #[test]
    fn test_explicit_base_url_wins() {
        let config = ContentfulConfig::builder()
            .access_token(token())
            .api(ApiKind::Delivery)
            .base_url(BaseUrl::new("http://localhost:9999").unwrap())
            .build()
            .unwrap();

        assert_eq!(config.base_url().as_ref(), "http://localhost:9999");
        assert_eq!(config.api(), ApiKind::Delivery);
    }

    #[test]
    fn test_default_query_accumulates() {
        let config = ContentfulConfig::builder()
            .access_token(token())
            .default_query("locale", "de-DE")
            .default_query("include", "2")
            .default_query("locale", "en-US")
            .build()
            .unwrap();

        assert_eq!(config.default_query().len(), 2);
        assert_eq!(config.default_query()["locale"], "en-US");
    }

    #[test]
    fn test_config_debug_masks_token() {
        let config = ContentfulConfig::builder()
            .access_token(AccessToken::new("very-secret").unwrap())
            .build()
            .unwrap();

        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("ContentfulConfig"));
        assert!(!debug_str.contains("very-secret"));
    }
}
