//! HTTP client types for Contentful API communication.
//!
//! This module provides the request pipeline shared by every resource
//! service. It builds requests, sends them under a cancellable
//! [`Context`], classifies failures and retries rate-limited calls.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`Client`]: The entry point, owning a pipeline and handing out resource services
//! - [`HttpClient`]: The async request pipeline for one Contentful API
//! - [`HttpRequest`]: A request descriptor with a buffered body
//! - [`HttpResponse`]: A response with raw body and parsed rate limit headers
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, DELETE)
//! - [`DataType`]: Content types for request bodies
//! - [`Context`] / [`CancelHandle`]: Cancellation and deadlines
//! - [`RetryPolicy`]: How rate limits are retried
//! - [`HttpError`], [`ApiError`], [`ErrorKind`]: The error taxonomy
//!
//! # Example
//!
//! ```rust,ignore
//! use contentful::{AccessToken, Client, Context};
//!
//! let client = Client::delivery(AccessToken::new("cda-token")?)?;
//! let ctx = Context::background();
//!
//! let entries = client.entries().list(&ctx, "space-id", None).await?;
//! println!("{} of {} entries", entries.items.len(), entries.total);
//! ```
//!
//! # Retry Behavior
//!
//! - **429 `RateLimitExceeded` with `X-Contentful-RateLimit-Reset`**: pauses
//!   for the reset interval and resends the same request, up to the
//!   [`RetryPolicy`] cap (5 by default)
//! - **429 without a usable reset header**: returns
//!   [`HttpError::RateLimitExceeded`] immediately
//! - **Everything else**: returned immediately, never retried

mod client;
mod context;
mod errors;
mod http_client;
mod http_request;
mod http_response;
mod retry;

pub use client::Client;
pub use context::{CancelHandle, Context};
pub use errors::{
    ApiError, ErrorKind, ErrorResponse, ErrorSys, HttpError, InvalidHttpRequestError,
    MaxHttpRetriesExceededError,
};
pub use http_client::{
    HttpClient, CONTENT_TYPE_ID_HEADER, ORGANIZATION_HEADER, SDK_VERSION, USER_AGENT_HEADER,
    VERSION_HEADER,
};
pub use http_request::{DataType, HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::{HttpResponse, RateLimit, RATE_LIMIT_RESET_HEADER, REQUEST_ID_HEADER};
pub use retry::{RetryPolicy, DEFAULT_MAX_RETRIES};
