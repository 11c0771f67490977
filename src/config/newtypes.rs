//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use url::Url;

/// A validated Contentful access token.
///
/// The same type is used for management (CMA), delivery (CDA) and preview
/// (CPA) tokens. The token is sent as `Authorization: Bearer <token>`.
///
/// # Security
///
/// The `Debug` implementation masks the token, displaying only
/// `AccessToken(*****)`.
///
/// # Example
///
/// ```rust
/// use contentful::AccessToken;
///
/// let token = AccessToken::new("CFPAT-abc").unwrap();
/// assert_eq!(token.as_ref(), "CFPAT-abc");
/// assert_eq!(format!("{:?}", token), "AccessToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Creates a new validated access token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAccessToken`] if the token is empty or whitespace.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ConfigError::EmptyAccessToken);
        }
        Ok(Self(token))
    }

    /// Returns the `Authorization` header value for this token.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(*****)")
    }
}

/// A validated base URL for one of the Contentful APIs.
///
/// The URL must be absolute and use the `http` or `https` scheme. Any
/// trailing slash is removed so that request paths can be appended directly.
///
/// # Example
///
/// ```rust
/// use contentful::BaseUrl;
///
/// let url = BaseUrl::new("https://api.contentful.com/").unwrap();
/// assert_eq!(url.as_ref(), "https://api.contentful.com");
/// assert_eq!(url.host_name(), Some("api.contentful.com"));
///
/// assert!(BaseUrl::new("api.contentful.com").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl {
    url: String,
    host: Option<String>,
}

impl BaseUrl {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL cannot be parsed,
    /// has no host, or uses a scheme other than http/https.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = url.into();
        let trimmed = raw.trim().trim_end_matches('/').to_string();

        let parsed =
            Url::parse(&trimmed).map_err(|_| ConfigError::InvalidBaseUrl { url: raw.clone() })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl { url: raw });
        }

        let host = parsed.host_str().map(ToString::to_string);
        if host.is_none() {
            return Err(ConfigError::InvalidBaseUrl { url: raw });
        }

        Ok(Self { url: trimmed, host })
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> Option<&str> {
        self.host.as_deref()
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

/// A validated environment id (e.g. `master`, `staging`).
///
/// # Serialization
///
/// `EnvironmentId` serializes to and deserializes from the bare string.
///
/// ```rust
/// use contentful::EnvironmentId;
///
/// let env = EnvironmentId::new("staging").unwrap();
/// assert_eq!(serde_json::to_string(&env).unwrap(), r#""staging""#);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EnvironmentId(String);

impl EnvironmentId {
    /// The environment every space starts with.
    pub const MASTER: &'static str = "master";

    /// Creates a new validated environment name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyEnvironment`] if the name is empty.
    pub fn new(name: impl Into<String>) -> Result<Self, ConfigError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ConfigError::EmptyEnvironment);
        }
        Ok(Self(name))
    }

    /// Returns the `master` environment.
    #[must_use]
    pub fn master() -> Self {
        Self(Self::MASTER.to_string())
    }

    /// Returns `true` for the `master` environment.
    #[must_use]
    pub fn is_master(&self) -> bool {
        self.0 == Self::MASTER
    }
}

impl Default for EnvironmentId {
    fn default() -> Self {
        Self::master()
    }
}

impl AsRef<str> for EnvironmentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EnvironmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for EnvironmentId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for EnvironmentId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_rejects_empty_string() {
        assert!(matches!(
            AccessToken::new(""),
            Err(ConfigError::EmptyAccessToken)
        ));
        assert!(matches!(
            AccessToken::new("   "),
            Err(ConfigError::EmptyAccessToken)
        ));
    }

    #[test]
    fn test_access_token_masks_value_in_debug() {
        let token = AccessToken::new("super-secret-token").unwrap();
        let debug_output = format!("{:?}", token);
        assert_eq!(debug_output, "AccessToken(*****)");
        assert!(!debug_output.contains("super-secret-token"));
    }

    #[test]
    fn test_access_token_bearer_format() {
        let token = AccessToken::new("abc123").unwrap();
        assert_eq!(token.bearer(), "Bearer abc123");
    }

    #[test]
    fn test_base_url_strips_trailing_slash() {
        let url = BaseUrl::new("https://cdn.contentful.com/").unwrap();
        assert_eq!(url.as_ref(), "https://cdn.contentful.com");
        assert_eq!(url.host_name(), Some("cdn.contentful.com"));
    }

    #[test]
    fn test_base_url_accepts_local_mock_servers() {
        let url = BaseUrl::new("http://127.0.0.1:8080").unwrap();
        assert_eq!(url.host_name(), Some("127.0.0.1"));
    }

    #[test]
    fn test_base_url_rejects_invalid() {
        assert!(BaseUrl::new("api.contentful.com").is_err());
        assert!(BaseUrl::new("ftp://api.contentful.com").is_err());
        assert!(BaseUrl::new("").is_err());
    }

    #[test]
    fn test_environment_defaults_to_master() {
        assert_eq!(EnvironmentId::default().as_ref(), "master");
        assert!(EnvironmentId::default().is_master());
        assert!(!EnvironmentId::new("staging").unwrap().is_master());
        assert!(matches!(
            EnvironmentId::new(" "),
            Err(ConfigError::EmptyEnvironment)
        ));
    }

    #[test]
    fn test_environment_deserialize_validates() {
        let env: EnvironmentId = serde_json::from_str(r#""staging""#).unwrap();
        assert_eq!(env.to_string(), "staging");
        assert!(serde_json::from_str::<EnvironmentId>(r#""""#).is_err());
    }
}
