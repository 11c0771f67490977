//! # Contentful Rust Client
//!
//! A typed async client for the Contentful Management (CMA), Delivery (CDA),
//! Preview (CPA) and Upload APIs.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ContentfulConfig`] and [`ContentfulConfigBuilder`]
//! - Validated newtypes for access tokens, base URLs and environment ids
//! - An async request pipeline that classifies API errors and retries rate
//!   limits according to a [`RetryPolicy`]
//! - Cancellation and deadlines for every call through [`Context`]
//! - Paginated listings with [`Collection`] and search parameters with [`Query`]
//! - Localized field values with [`LocaleItem`]
//! - Resource services for spaces, environments, entries, assets, content
//!   types, locales, roles, webhooks and uploads
//! - Signature verification for incoming webhook calls via [`webhooks`]
//!
//! ## Quick Start
//!
//! ```rust
//! use contentful::{AccessToken, ApiKind, ContentfulConfig, EnvironmentId, RetryPolicy};
//!
//! let config = ContentfulConfig::builder()
//!     .access_token(AccessToken::new("CFPAT-your-token").unwrap())
//!     .api(ApiKind::Management)
//!     .environment(EnvironmentId::new("staging").unwrap())
//!     .retry_policy(RetryPolicy::new(3))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url().as_ref(), "https://api.contentful.com");
//! ```
//!
//! ## Making Requests
//!
//! ```rust,ignore
//! use contentful::{Client, Context, ContentfulConfig, HttpError, Query};
//! use std::time::Duration;
//!
//! let client = Client::new(&config)?;
//! let ctx = Context::with_timeout(Duration::from_secs(30));
//!
//! let query = Query::new().content_type("blogPost").order("sys.createdAt", true);
//! let posts = client.entries().list(&ctx, "space-id", Some(query)).await?;
//!
//! match client.entries().get(&ctx, "space-id", "missing").await {
//!     Err(HttpError::NotFound(err)) => println!("not found: {}", err.message),
//!     other => println!("{other:?}"),
//! }
//! ```
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events and never installs a subscriber.
//! Requests and responses are logged at `debug`, rate-limit retries at `warn`.
//!
//! ## Error Handling
//!
//! API failures are classified into [`HttpError`] variants, one per
//! [`ErrorKind`]:
//!
//! ```rust
//! use contentful::{ErrorKind, HttpError};
//!
//! fn is_retryable(error: &HttpError) -> bool {
//!     matches!(error.kind(), Some(ErrorKind::RateLimitExceeded))
//! }
//!
//! assert!(!is_retryable(&HttpError::Cancelled));
//! ```

pub mod clients;
pub mod config;
pub mod error;
pub mod rest;
pub mod webhooks;

// Re-export public types at crate root for convenience
pub use config::{
    AccessToken, ApiKind, BaseUrl, ContentfulConfig, ContentfulConfigBuilder, EnvironmentId,
};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    ApiError, CancelHandle, Client, Context, DataType, ErrorKind, HttpClient, HttpError,
    HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse, InvalidHttpRequestError,
    MaxHttpRetriesExceededError, RateLimit, RetryPolicy,
};

// Re-export REST building blocks
pub use rest::{Collection, LocaleItem, Query, Versioned};
