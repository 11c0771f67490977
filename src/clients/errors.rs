//! HTTP-specific error types for the Contentful client.
//!
//! This module contains the error taxonomy for every call that goes through
//! the request pipeline: classified API failures, retry exhaustion, request
//! validation failures, transport errors and cancellation.
//!
//! # Error Handling
//!
//! - [`ErrorKind`]: The closed set of API failure kinds, keyed on the
//!   `sys.id` of the error body
//! - [`ErrorResponse`]: The decoded Contentful error envelope
//! - [`ApiError`]: A failed response together with the request that caused it
//! - [`MaxHttpRetriesExceededError`]: Rate-limit retries were exhausted
//! - [`InvalidHttpRequestError`]: A request failed validation before sending
//! - [`HttpError`]: Unified error type encompassing all of the above
//!
//! # Example
//!
//! ```rust,ignore
//! use contentful::{Context, HttpError};
//!
//! match client.entries().get(&Context::background(), "space", "entry").await {
//!     Ok(entry) => println!("{:?}", entry.sys),
//!     Err(HttpError::NotFound(e)) => println!("missing: {}", e.message),
//!     Err(HttpError::RateLimitExceeded(e)) => {
//!         println!("slow down: {:?}", e.response.rate_limit_reset());
//!     }
//!     Err(e) => println!("other failure: {e}"),
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::HttpResponse;

/// Number of body bytes kept when logging an unparseable error body.
const ERROR_SNIPPET_LEN: usize = 256;

/// Classification of a failed Contentful API response.
///
/// The kind is derived from the `sys.id` field of the error body. `Conflict`
/// is folded into [`ErrorKind::VersionMismatch`]. Any id that is not
/// recognized is kept verbatim in [`ErrorKind::Other`].
///
/// # Example
///
/// ```rust
/// use contentful::ErrorKind;
///
/// assert_eq!(ErrorKind::from_id("NotFound"), ErrorKind::NotFound);
/// assert_eq!(ErrorKind::from_id("Conflict"), ErrorKind::VersionMismatch);
/// assert_eq!(
///     ErrorKind::from_id("BadRequest"),
///     ErrorKind::Other("BadRequest".to_string())
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The requested resource does not exist.
    NotFound,
    /// The request was rate limited.
    RateLimitExceeded,
    /// The access token is missing, malformed or revoked.
    AccessTokenInvalid,
    /// The payload failed validation.
    ValidationFailed,
    /// The `X-Contentful-Version` did not match the stored version.
    VersionMismatch,
    /// Any other error id reported by the API.
    Other(String),
}

impl ErrorKind {
    /// Classifies an error body `sys.id`.
    #[must_use]
    pub fn from_id(id: &str) -> Self {
        match id {
            "NotFound" => Self::NotFound,
            "RateLimitExceeded" => Self::RateLimitExceeded,
            "AccessTokenInvalid" => Self::AccessTokenInvalid,
            "ValidationFailed" => Self::ValidationFailed,
            "VersionMismatch" | "Conflict" => Self::VersionMismatch,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => f.write_str("NotFound"),
            Self::RateLimitExceeded => f.write_str("RateLimitExceeded"),
            Self::AccessTokenInvalid => f.write_str("AccessTokenInvalid"),
            Self::ValidationFailed => f.write_str("ValidationFailed"),
            Self::VersionMismatch => f.write_str("VersionMismatch"),
            Self::Other(id) if id.is_empty() => f.write_str("UnknownError"),
            Self::Other(id) => f.write_str(id),
        }
    }
}

/// The `sys` block of an error body.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorSys {
    /// The error id, e.g. `NotFound`.
    #[serde(default)]
    pub id: String,
    /// Always `Error` for well-formed bodies.
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// The decoded Contentful error envelope.
///
/// ```json
/// { "sys": { "type": "Error", "id": "NotFound" },
///   "message": "The resource could not be found.",
///   "details": { "type": "Entry", "id": "abc" },
///   "requestId": "a1b2c3" }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Identifies the kind of error.
    #[serde(default)]
    pub sys: ErrorSys,
    /// Human readable message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Error specific details, e.g. validation errors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Request id assigned by Contentful.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// A non-successful response from the Contentful API.
///
/// Carries the classified kind, the request that was sent, the raw response
/// and the decoded error body. When the body is not a JSON error envelope,
/// the kind is [`ErrorKind::Other`] and the message is the HTTP status line.
#[derive(Debug, Error)]
#[error("{kind} ({}): {message}", .response.code)]
pub struct ApiError {
    /// The classified error kind.
    pub kind: ErrorKind,
    /// The message reported by the API or the status line.
    pub message: String,
    /// The request that produced this error.
    pub request: HttpRequest,
    /// The raw response.
    pub response: HttpResponse,
    /// The decoded error body.
    pub body: ErrorResponse,
}

impl ApiError {
    /// Builds an error from a failed response, decoding its body.
    #[must_use]
    pub fn from_response(request: HttpRequest, response: HttpResponse) -> Self {
        let status_line = response.status_line();

        let body = match serde_json::from_slice::<ErrorResponse>(&response.body) {
            Ok(body) => body,
            Err(e) => {
                let text = response.text();
                let snippet: String = text.chars().take(ERROR_SNIPPET_LEN).collect();
                tracing::debug!(
                    status = response.code,
                    error = %e,
                    body = %snippet,
                    "Contentful error body is not a JSON error envelope"
                );
                ErrorResponse {
                    message: Some(status_line.clone()),
                    ..ErrorResponse::default()
                }
            }
        };

        let kind = ErrorKind::from_id(&body.sys.id);
        let message = body.message.clone().unwrap_or(status_line);

        Self {
            kind,
            message,
            request,
            response,
            body,
        }
    }
}

/// Error returned when rate-limit retries have been exhausted.
#[derive(Debug, Error)]
#[error("Exceeded maximum retry count of {retries}. Last error: {last}")]
pub struct MaxHttpRetriesExceededError {
    /// The number of retries that were attempted.
    pub retries: u32,
    /// The last rate-limit error received.
    pub last: Box<ApiError>,
}

/// Error returned when an HTTP request fails validation.
///
/// Raised before any I/O takes place.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A request body was provided without specifying the body type.
    #[error("Cannot set a body without also setting body_type.")]
    MissingBodyType,

    /// The request path is not absolute or has unfilled placeholders.
    #[error("Invalid request path '{path}'.")]
    InvalidPath {
        /// The offending path.
        path: String,
    },

    /// A header name or value contains characters not allowed in HTTP headers.
    #[error("Invalid header '{name}'.")]
    InvalidHeader {
        /// The offending header name.
        name: String,
    },

    /// A lifecycle call was made on an entity that has no `sys.id`.
    #[error("Cannot {operation} {resource} without sys.id.")]
    MissingEntityId {
        /// The resource name, e.g. `Entry`.
        resource: &'static str,
        /// The attempted operation, e.g. `publish`.
        operation: &'static str,
    },
}

/// Unified error type for all HTTP-related errors.
///
/// One variant exists per classified [`ErrorKind`]; unrecognized API errors
/// use [`HttpError::Api`].
///
/// # Example
///
/// ```rust
/// use contentful::{ErrorKind, HttpError};
///
/// let error = HttpError::EmptyPayload;
/// assert!(error.kind().is_none());
/// assert_eq!(error.to_string(), "Response payload is empty");
/// ```
#[derive(Debug, Error)]
pub enum HttpError {
    /// The resource does not exist.
    #[error(transparent)]
    NotFound(Box<ApiError>),

    /// The request was rate limited and not retried.
    #[error(transparent)]
    RateLimitExceeded(Box<ApiError>),

    /// The access token was rejected.
    #[error(transparent)]
    AccessTokenInvalid(Box<ApiError>),

    /// The payload failed validation.
    #[error(transparent)]
    ValidationFailed(Box<ApiError>),

    /// Version mismatch or conflict.
    #[error(transparent)]
    VersionMismatch(Box<ApiError>),

    /// Any other API failure.
    #[error(transparent)]
    Api(Box<ApiError>),

    /// Rate-limit retries exhausted.
    #[error(transparent)]
    MaxRetries(#[from] MaxHttpRetriesExceededError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// The client configuration is invalid.
    #[error(transparent)]
    Config(#[from] crate::error::ConfigError),

    /// The request URL could not be resolved.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body could not be decoded.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The request body could not be encoded.
    #[error("Encode error: {0}")]
    Encode(serde_json::Error),

    /// A body was expected but the payload was empty.
    #[error("Response payload is empty")]
    EmptyPayload,

    /// The call was cancelled through its context.
    #[error("Request cancelled")]
    Cancelled,

    /// The context deadline passed before the call completed.
    #[error("Request deadline exceeded")]
    DeadlineExceeded,
}

impl HttpError {
    /// Wraps an API error in the variant matching its kind.
    #[must_use]
    pub fn classify(error: ApiError) -> Self {
        let error = Box::new(error);
        match error.kind {
            ErrorKind::NotFound => Self::NotFound(error),
            ErrorKind::RateLimitExceeded => Self::RateLimitExceeded(error),
            ErrorKind::AccessTokenInvalid => Self::AccessTokenInvalid(error),
            ErrorKind::ValidationFailed => Self::ValidationFailed(error),
            ErrorKind::VersionMismatch => Self::VersionMismatch(error),
            ErrorKind::Other(_) => Self::Api(error),
        }
    }

    /// Returns the underlying API error, if this failure came from a response.
    ///
    /// For [`HttpError::MaxRetries`] this is the last rate-limit error.
    #[must_use]
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::NotFound(e)
            | Self::RateLimitExceeded(e)
            | Self::AccessTokenInvalid(e)
            | Self::ValidationFailed(e)
            | Self::VersionMismatch(e)
            | Self::Api(e) => Some(e),
            Self::MaxRetries(e) => Some(&e.last),
            _ => None,
        }
    }

    /// Returns the classified kind, if this failure came from a response.
    #[must_use]
    pub fn kind(&self) -> Option<&ErrorKind> {
        self.api_error().map(|e| &e.kind)
    }
}

// Verify error types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpError>();
    assert_send_sync::<ApiError>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::http_request::HttpMethod;
    use std::collections::HashMap;

    fn api_error(code: u16, body: &str) -> ApiError {
        let request = HttpRequest::builder(HttpMethod::Get, "/spaces/abc")
            .build()
            .unwrap();
        let response = HttpResponse::new(code, HashMap::new(), body.as_bytes().to_vec());
        ApiError::from_response(request, response)
    }

    #[test]
    fn test_error_kind_from_known_ids() {
        assert_eq!(ErrorKind::from_id("NotFound"), ErrorKind::NotFound);
        assert_eq!(
            ErrorKind::from_id("RateLimitExceeded"),
            ErrorKind::RateLimitExceeded
        );
        assert_eq!(
            ErrorKind::from_id("AccessTokenInvalid"),
            ErrorKind::AccessTokenInvalid
        );
        assert_eq!(
            ErrorKind::from_id("ValidationFailed"),
            ErrorKind::ValidationFailed
        );
        assert_eq!(
            ErrorKind::from_id("VersionMismatch"),
            ErrorKind::VersionMismatch
        );
        assert_eq!(ErrorKind::from_id("Conflict"), ErrorKind::VersionMismatch);
    }

    #[test]
    fn test_unknown_id_is_kept_verbatim() {
        assert_eq!(
            ErrorKind::from_id("InvalidQuery"),
            ErrorKind::Other("InvalidQuery".to_string())
        );
    }

    #[test]
    fn test_api_error_decodes_envelope() {
        let error = api_error(
            404,
            r#"{
                "sys": {"type": "Error", "id": "NotFound"},
                "message": "The resource could not be found.",
                "requestId": "req-1"
            }"#,
        );

        assert_eq!(error.kind, ErrorKind::NotFound);
        assert_eq!(error.message, "The resource could not be found.");
        assert_eq!(error.body.request_id.as_deref(), Some("req-1"));
        assert_eq!(
            error.to_string(),
            "NotFound (404): The resource could not be found."
        );
    }

    #[test]
    fn test_non_json_body_degrades_to_status_line() {
        let error = api_error(502, "<html>Bad Gateway</html>");

        assert_eq!(error.kind, ErrorKind::Other(String::new()));
        assert_eq!(error.message, "502 Bad Gateway");
        assert!(matches!(HttpError::classify(error), HttpError::Api(_)));
    }

    #[test]
    fn test_classify_maps_kind_to_variant() {
        let not_found = api_error(404, r#"{"sys":{"id":"NotFound"}}"#);
        assert!(matches!(
            HttpError::classify(not_found),
            HttpError::NotFound(_)
        ));

        let conflict = api_error(409, r#"{"sys":{"id":"Conflict"}}"#);
        let error = HttpError::classify(conflict);
        assert!(matches!(error, HttpError::VersionMismatch(_)));
        assert_eq!(error.kind(), Some(&ErrorKind::VersionMismatch));

        let other = api_error(400, r#"{"sys":{"id":"BadRequest"}}"#);
        assert!(matches!(HttpError::classify(other), HttpError::Api(_)));
    }

    #[test]
    fn test_max_retries_exposes_last_error() {
        let last = api_error(429, r#"{"sys":{"id":"RateLimitExceeded"}}"#);
        let error = HttpError::from(MaxHttpRetriesExceededError {
            retries: 5,
            last: Box::new(last),
        });

        assert_eq!(error.kind(), Some(&ErrorKind::RateLimitExceeded));
        assert!(error.to_string().contains("Exceeded maximum retry count of 5"));
    }

    #[test]
    fn test_missing_entity_id_message() {
        let error = InvalidHttpRequestError::MissingEntityId {
            resource: "Entry",
            operation: "publish",
        };
        assert_eq!(error.to_string(), "Cannot publish Entry without sys.id.");
    }

    #[test]
    fn test_non_api_errors_have_no_kind() {
        assert!(HttpError::Cancelled.kind().is_none());
        assert!(HttpError::DeadlineExceeded.api_error().is_none());
    }
}
