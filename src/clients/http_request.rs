//! HTTP request types for the Contentful client.
//!
//! This module provides the [`HttpRequest`] descriptor and its builder.
//! A request owns its body as buffered bytes, so the pipeline can resend it
//! unchanged after a rate-limit pause.

use std::collections::BTreeMap;
use std::fmt;

use crate::clients::errors::InvalidHttpRequestError;

/// HTTP methods used by the Contentful REST APIs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources with a server-assigned id.
    Post,
    /// HTTP PUT method for creating or updating resources.
    Put,
    /// HTTP DELETE method for removing resources and lifecycle states.
    Delete,
}

impl HttpMethod {
    /// Returns the matching `reqwest` method.
    #[must_use]
    pub const fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// Content type of a request body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataType {
    /// JSON body, sent with the API's vendor media type.
    Json,
    /// Raw binary body (`application/octet-stream`), used by the Upload API.
    OctetStream,
}

impl DataType {
    /// Returns the explicit MIME type for this data type, if it overrides
    /// the client's default `Content-Type`.
    #[must_use]
    pub const fn content_type_override(&self) -> Option<&'static str> {
        match self {
            Self::Json => None,
            Self::OctetStream => Some("application/octet-stream"),
        }
    }
}

/// A request descriptor to be sent through the pipeline.
///
/// Use [`HttpRequest::builder`] to construct requests.
///
/// # Example
///
/// ```rust
/// use contentful::clients::{DataType, HttpMethod, HttpRequest};
///
/// let request = HttpRequest::builder(HttpMethod::Put, "/spaces/abc/environments/master/entries/1")
///     .json_body(&serde_json::json!({"fields": {}}))
///     .unwrap()
///     .header("X-Contentful-Version", "3")
///     .build()
///     .unwrap();
///
/// assert_eq!(request.body_type, Some(DataType::Json));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub method: HttpMethod,
    /// The absolute path (starting with `/`) relative to the base URL.
    pub path: String,
    /// The buffered request body, if any.
    pub body: Option<Vec<u8>>,
    /// The content type of the body.
    pub body_type: Option<DataType>,
    /// Query parameters in the order they are sent.
    pub query: Vec<(String, String)>,
    /// Per-call headers, applied after the client's default headers.
    pub extra_headers: BTreeMap<String, String>,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, path)
    }

    /// Replaces the query parameters of this request.
    pub fn set_query(&mut self, query: Vec<(String, String)>) {
        self.query = query;
    }

    /// Returns the value of a per-call header.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.extra_headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if:
    /// - `body` is `Some` but `body_type` is `None`
    /// - `path` does not start with `/` or still contains a `{placeholder}`
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if self.body.is_some() && self.body_type.is_none() {
            return Err(InvalidHttpRequestError::MissingBodyType);
        }

        if !self.path.starts_with('/') || self.path.contains('{') || self.path.contains('}') {
            return Err(InvalidHttpRequestError::InvalidPath {
                path: self.path.clone(),
            });
        }

        Ok(())
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    method: HttpMethod,
    path: String,
    body: Option<Vec<u8>>,
    body_type: Option<DataType>,
    query: Vec<(String, String)>,
    extra_headers: BTreeMap<String, String>,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            body_type: None,
            query: Vec::new(),
            extra_headers: BTreeMap::new(),
        }
    }

    /// Sets the raw request body.
    ///
    /// When setting a body, you must also set the body type via [`body_type`](Self::body_type).
    #[must_use]
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serializes `value` as the JSON body and sets the body type.
    ///
    /// # Errors
    ///
    /// Returns the serializer error if `value` cannot be encoded.
    pub fn json_body<T: serde::Serialize + ?Sized>(
        mut self,
        value: &T,
    ) -> Result<Self, serde_json::Error> {
        self.body = Some(serde_json::to_vec(value)?);
        self.body_type = Some(DataType::Json);
        Ok(self)
    }

    /// Sets the content type of the request body.
    #[must_use]
    pub const fn body_type(mut self, body_type: DataType) -> Self {
        self.body_type = Some(body_type);
        self
    }

    /// Sets all query parameters at once.
    #[must_use]
    pub fn query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    /// Appends a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Adds a single per-call header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(key.into(), value.into());
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            method: self.method,
            path: self.path,
            body: self.body,
            body_type: self.body_type,
            query: self.query,
            extra_headers: self.extra_headers,
        };
        request.verify()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_display_is_uppercase() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
        assert_eq!(HttpMethod::Put.as_reqwest(), reqwest::Method::PUT);
    }

    #[test]
    fn test_body_without_type_is_rejected() {
        let result = HttpRequest::builder(HttpMethod::Post, "/spaces")
            .body(b"{}".to_vec())
            .build();

        assert_eq!(result, Err(InvalidHttpRequestError::MissingBodyType));
    }

    #[test]
    fn test_put_without_body_is_allowed() {
        let request = HttpRequest::builder(HttpMethod::Put, "/spaces/a/entries/b/published")
            .header("X-Contentful-Version", "2")
            .build()
            .unwrap();

        assert!(request.body.is_none());
        assert_eq!(request.header("x-contentful-version"), Some("2"));
    }

    #[test]
    fn test_relative_path_is_rejected() {
        let result = HttpRequest::builder(HttpMethod::Get, "spaces").build();
        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::InvalidPath { .. })
        ));
    }

    #[test]
    fn test_unfilled_placeholder_is_rejected() {
        let result = HttpRequest::builder(HttpMethod::Get, "/spaces/{space_id}").build();
        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::InvalidPath { path }) if path == "/spaces/{space_id}"
        ));
    }

    #[test]
    fn test_json_body_sets_type() {
        let request = HttpRequest::builder(HttpMethod::Post, "/spaces")
            .json_body(&serde_json::json!({"name": "Blog"}))
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(request.body_type, Some(DataType::Json));
        assert_eq!(request.body.as_deref(), Some(br#"{"name":"Blog"}"#.as_slice()));
    }

    #[test]
    fn test_query_params_keep_insertion_order() {
        let mut request = HttpRequest::builder(HttpMethod::Get, "/spaces")
            .query_param("skip", "0")
            .query_param("limit", "10")
            .build()
            .unwrap();

        assert_eq!(request.query[0].0, "skip");
        request.set_query(vec![("order".to_string(), "sys.createdAt".to_string())]);
        assert_eq!(request.query.len(), 1);
    }
}
