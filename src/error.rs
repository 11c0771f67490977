//! Configuration error types for the Contentful client.
//!
//! This module contains the error type returned while building a
//! [`ContentfulConfig`](crate::ContentfulConfig) or one of its validated
//! newtypes. Errors raised while talking to the API live in
//! [`crate::clients`].
//!
//! # Example
//!
//! ```rust
//! use contentful::{AccessToken, ConfigError};
//!
//! let result = AccessToken::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyAccessToken)));
//! ```

use thiserror::Error;

/// Errors that can occur during client configuration.
///
/// Each variant carries enough context to explain which value was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Access token cannot be empty.
    #[error("Access token cannot be empty. Please provide a valid Contentful access token.")]
    EmptyAccessToken,

    /// Environment name cannot be empty.
    #[error("Environment cannot be empty. Use 'master' for the default environment.")]
    EmptyEnvironment,

    /// Base URL is not an absolute http(s) URL.
    #[error("Invalid base URL '{url}'. Please provide an absolute URL with scheme (e.g., 'https://api.contentful.com').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// API kind string is not recognized.
    #[error("Invalid API kind '{value}'. Expected one of 'cma', 'cda', 'cpa' or 'upload'.")]
    InvalidApiKind {
        /// The unrecognized value.
        value: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}
