//! HTTP response types for the Contentful client.
//!
//! This module provides the [`HttpResponse`] type and the rate limit
//! information Contentful reports on every response.

use std::collections::HashMap;

use serde::de::DeserializeOwned;

use crate::clients::errors::HttpError;

/// Header carrying the number of seconds until the rate limit resets.
pub const RATE_LIMIT_RESET_HEADER: &str = "x-contentful-ratelimit-reset";

/// Header carrying the Contentful request id.
pub const REQUEST_ID_HEADER: &str = "x-contentful-request-id";

/// Rate limit information parsed from the `X-Contentful-RateLimit-*` headers.
///
/// Every field is optional because the Delivery API omits the per-hour
/// headers and error responses may omit all of them.
///
/// # Example
///
/// ```rust
/// use contentful::clients::{HttpResponse, RateLimit};
/// use std::collections::HashMap;
///
/// let mut headers = HashMap::new();
/// headers.insert("x-contentful-ratelimit-second-remaining".to_string(), vec!["6".to_string()]);
/// headers.insert("x-contentful-ratelimit-reset".to_string(), vec!["0".to_string()]);
///
/// let response = HttpResponse::new(200, headers, Vec::new());
/// assert_eq!(response.rate_limit.second_remaining, Some(6));
/// assert_eq!(response.rate_limit.reset, Some(0));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RateLimit {
    /// Requests allowed per hour.
    pub hour_limit: Option<u64>,
    /// Requests left in the current hour.
    pub hour_remaining: Option<u64>,
    /// Requests allowed per second.
    pub second_limit: Option<u64>,
    /// Requests left in the current second.
    pub second_remaining: Option<u64>,
    /// Seconds until the limit resets.
    pub reset: Option<u64>,
}

impl RateLimit {
    fn from_headers(headers: &HashMap<String, Vec<String>>) -> Self {
        let read = |name: &str| {
            headers
                .get(name)
                .and_then(|values| values.first())
                .and_then(|value| value.trim().parse::<u64>().ok())
        };

        Self {
            hour_limit: read("x-contentful-ratelimit-hour-limit"),
            hour_remaining: read("x-contentful-ratelimit-hour-remaining"),
            second_limit: read("x-contentful-ratelimit-second-limit"),
            second_remaining: read("x-contentful-ratelimit-second-remaining"),
            reset: read(RATE_LIMIT_RESET_HEADER),
        }
    }
}

/// An HTTP response from a Contentful API.
///
/// The body is kept as raw bytes; decoding happens in the pipeline's
/// decode helpers so that callers can choose whether a body is expected.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, keyed by lowercase name.
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body.
    pub body: Vec<u8>,
    /// Rate limit information from the response headers.
    pub rate_limit: RateLimit,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`, parsing the rate limit headers.
    ///
    /// Header names must already be lowercase.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: Vec<u8>) -> Self {
        let rate_limit = RateLimit::from_headers(&headers);
        Self {
            code,
            headers,
            body,
            rate_limit,
        }
    }

    /// Returns `true` for status codes in `[200, 400)`.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code < 400
    }

    /// Returns the first value of a header.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the rate limit reset in seconds, if the header holds an
    /// unsigned integer.
    #[must_use]
    pub const fn rate_limit_reset(&self) -> Option<u64> {
        self.rate_limit.reset
    }

    /// Returns the `X-Contentful-Request-Id` header value, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header(REQUEST_ID_HEADER)
    }

    /// Returns the status line, e.g. `404 Not Found`.
    #[must_use]
    pub fn status_line(&self) -> String {
        let reason = reqwest::StatusCode::from_u16(self.code)
            .ok()
            .and_then(|status| status.canonical_reason());
        reason.map_or_else(|| self.code.to_string(), |r| format!("{} {r}", self.code))
    }

    /// Returns the body as text, replacing invalid UTF-8.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::EmptyPayload`] if the body is empty or only
    /// whitespace, and [`HttpError::Decode`] if it is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, HttpError> {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return Err(HttpError::EmptyPayload);
        }
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Parses `reqwest` headers into a lowercase-keyed map.
    pub(crate) fn parse_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&str, &str)]) -> HashMap<String, Vec<String>> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), vec![(*v).to_string()]))
            .collect()
    }

    #[test]
    fn test_is_ok_covers_2xx_and_3xx() {
        for code in [200, 201, 204, 301, 304, 399] {
            let response = HttpResponse::new(code, HashMap::new(), Vec::new());
            assert!(response.is_ok(), "Expected is_ok() to be true for {code}");
        }
    }

    #[test]
    fn test_is_ok_returns_false_for_4xx_and_5xx() {
        for code in [400, 404, 409, 422, 429, 500, 503] {
            let response = HttpResponse::new(code, HashMap::new(), Vec::new());
            assert!(!response.is_ok(), "Expected is_ok() to be false for {code}");
        }
    }

    #[test]
    fn test_rate_limit_headers_are_parsed() {
        let response = HttpResponse::new(
            429,
            headers(&[
                ("x-contentful-ratelimit-hour-limit", "36000"),
                ("x-contentful-ratelimit-hour-remaining", "35000"),
                ("x-contentful-ratelimit-second-limit", "10"),
                ("x-contentful-ratelimit-second-remaining", "0"),
                ("x-contentful-ratelimit-reset", "2"),
            ]),
            Vec::new(),
        );

        assert_eq!(response.rate_limit.hour_limit, Some(36000));
        assert_eq!(response.rate_limit.hour_remaining, Some(35000));
        assert_eq!(response.rate_limit.second_limit, Some(10));
        assert_eq!(response.rate_limit.second_remaining, Some(0));
        assert_eq!(response.rate_limit_reset(), Some(2));
    }

    #[test]
    fn test_non_integer_reset_is_ignored() {
        for value in ["soon", "-1", "1.5", ""] {
            let response = HttpResponse::new(
                429,
                headers(&[("x-contentful-ratelimit-reset", value)]),
                Vec::new(),
            );
            assert_eq!(response.rate_limit_reset(), None, "value {value:?}");
        }
    }

    #[test]
    fn test_request_id_extraction() {
        let response = HttpResponse::new(
            404,
            headers(&[("x-contentful-request-id", "abc-123")]),
            Vec::new(),
        );
        assert_eq!(response.request_id(), Some("abc-123"));
        assert_eq!(response.header("X-Contentful-Request-Id"), Some("abc-123"));
    }

    #[test]
    fn test_status_line() {
        let response = HttpResponse::new(404, HashMap::new(), Vec::new());
        assert_eq!(response.status_line(), "404 Not Found");
    }

    #[test]
    fn test_json_rejects_empty_body() {
        let response = HttpResponse::new(200, HashMap::new(), b"  \n".to_vec());
        assert!(matches!(
            response.json::<serde_json::Value>(),
            Err(HttpError::EmptyPayload)
        ));
    }

    #[test]
    fn test_json_decodes_body() {
        let response = HttpResponse::new(200, HashMap::new(), br#"{"total":3}"#.to_vec());
        let value: serde_json::Value = response.json().unwrap();
        assert_eq!(value["total"], 3);
    }
}
