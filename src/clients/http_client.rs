//! HTTP client for Contentful API communication.
//!
//! This module provides the [`HttpClient`] type: the request pipeline that
//! every resource service goes through. It builds the outgoing request,
//! sends it under a [`Context`], classifies failures and pauses and resends
//! on rate limits.

use std::collections::BTreeMap;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use url::Url;

use crate::clients::context::Context;
use crate::clients::errors::{
    ApiError, ErrorKind, HttpError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
};
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::HttpResponse;
use crate::clients::retry::RetryPolicy;
use crate::config::{ApiKind, BaseUrl, ContentfulConfig};

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Header carrying the entity version for optimistic locking.
pub const VERSION_HEADER: &str = "X-Contentful-Version";

/// Header carrying the content type id when creating entries.
pub const CONTENT_TYPE_ID_HEADER: &str = "X-Contentful-Content-Type";

/// Header carrying the organization id.
pub const ORGANIZATION_HEADER: &str = "X-Contentful-Organization";

/// Header identifying this library to Contentful.
pub const USER_AGENT_HEADER: &str = "X-Contentful-User-Agent";

/// The request pipeline for one Contentful API.
///
/// The client handles:
/// - URL resolution against the configured base URL
/// - Merging the client-wide default query into every request
/// - Default headers (authorization, media type, user agent, organization)
/// - Classifying failed responses into [`HttpError`] variants
/// - Pausing and resending on rate limits, per [`RetryPolicy`]
///
/// # Thread Safety
///
/// `HttpClient` is `Clone + Send + Sync`. Clones share the underlying
/// connection pool.
///
/// # Example
///
/// ```rust,ignore
/// use contentful::clients::{HttpClient, HttpMethod, HttpRequest};
/// use contentful::{AccessToken, ContentfulConfig, Context};
///
/// let config = ContentfulConfig::builder()
///     .access_token(AccessToken::new("token").unwrap())
///     .build()?;
/// let client = HttpClient::new(&config)?;
///
/// let request = HttpRequest::builder(HttpMethod::Get, "/spaces").build()?;
/// let spaces: serde_json::Value = client.request_json(&request, &Context::background()).await?;
/// ```
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    api: ApiKind,
    base_url: BaseUrl,
    default_headers: BTreeMap<String, String>,
    default_query: BTreeMap<String, String>,
    retry_policy: RetryPolicy,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new pipeline from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying `reqwest` client
    /// cannot be created (e.g. TLS initialization failure).
    pub fn new(config: &ContentfulConfig) -> Result<Self, HttpError> {
        let api = config.api();

        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!(
            "{user_agent_prefix}sdk contentful-rust/{SDK_VERSION}; platform rust/{rust_version}"
        );

        let mut default_headers = BTreeMap::new();
        default_headers.insert(
            AUTHORIZATION.as_str().to_string(),
            config.access_token().bearer(),
        );
        default_headers.insert(
            CONTENT_TYPE.as_str().to_string(),
            api.content_type().to_string(),
        );
        default_headers.insert(USER_AGENT_HEADER.to_string(), user_agent);
        if let Some(organization) = config.organization() {
            default_headers.insert(ORGANIZATION_HEADER.to_string(), organization.to_string());
        }

        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        if config.base_url().as_ref() != api.base_url() {
            tracing::debug!(
                api = %api,
                base_url = config.base_url().as_ref(),
                "using custom base URL"
            );
        }

        Ok(Self {
            client,
            api,
            base_url: config.base_url().clone(),
            default_headers,
            default_query: config.default_query().clone(),
            retry_policy: *config.retry_policy(),
        })
    }

    /// Returns the API this client talks to.
    #[must_use]
    pub const fn api(&self) -> ApiKind {
        self.api
    }

    /// Returns the base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the default headers sent with every request.
    #[must_use]
    pub const fn default_headers(&self) -> &BTreeMap<String, String> {
        &self.default_headers
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

    /// Replaces the base URL.
    pub fn set_base_url(&mut self, base_url: BaseUrl) {
        tracing::debug!(base_url = base_url.as_ref(), "overriding base URL");
        self.base_url = base_url;
    }

    /// Sets or clears the `X-Contentful-Organization` header.
    pub fn set_organization(&mut self, organization: Option<String>) {
        match organization {
            Some(organization) => {
                self.default_headers
                    .insert(ORGANIZATION_HEADER.to_string(), organization);
            }
            None => {
                self.default_headers.remove(ORGANIZATION_HEADER);
            }
        }
    }

    /// Replaces the rate-limit retry policy.
    pub fn set_retry_policy(&mut self, policy: RetryPolicy) {
        self.retry_policy = policy;
    }

    /// Builds the outgoing request for a descriptor.
    ///
    /// The client-wide default query replaces explicit parameters with the
    /// same key. Per-call headers are applied after the default headers, and
    /// an octet-stream body overrides the default `Content-Type`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if the descriptor fails
    /// validation, [`HttpError::InvalidUrl`] if the URL cannot be resolved
    /// and [`HttpError::Network`] if `reqwest` rejects the request.
    pub fn build_request(&self, request: &HttpRequest) -> Result<reqwest::Request, HttpError> {
        request.verify()?;

        let mut url = Url::parse(&format!("{}{}", self.base_url.as_ref(), request.path))?;
        let pairs = self.merged_query(&request.query);
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(&pairs);
        }

        let mut headers = HeaderMap::new();
        let content_type = request
            .body_type
            .and_then(|body_type| body_type.content_type_override())
            .map(|ct| (CONTENT_TYPE.as_str().to_string(), ct.to_string()));
        for (name, value) in self
            .default_headers
            .iter()
            .chain(content_type.as_ref().map(|(k, v)| (k, v)))
            .chain(request.extra_headers.iter())
        {
            let (header_name, header_value) = Self::header_pair(name, value)?;
            headers.insert(header_name, header_value);
        }

        let mut builder = self
            .client
            .request(request.method.as_reqwest(), url)
            .headers(headers);
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        Ok(builder.build()?)
    }

    /// Sends a request, retrying on rate limits per the retry policy.
    ///
    /// Responses with a status in `[200, 400)` are returned as-is. Other
    /// responses are classified into an [`HttpError`]. A
    /// `RateLimitExceeded` response with an integer
    /// `X-Contentful-RateLimit-Reset` header is retried after that many
    /// seconds, plus jitter.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - A transport error occurs (`Network`), which is never retried
    /// - The API rejects the request (`NotFound`, `VersionMismatch`, `Api`, ...)
    /// - Rate-limit retries are exhausted (`MaxRetries`)
    /// - The context ends (`Cancelled`, `DeadlineExceeded`)
    pub async fn execute(
        &self,
        request: &HttpRequest,
        ctx: &Context,
    ) -> Result<HttpResponse, HttpError> {
        let mut retries: u32 = 0;
        loop {
            let outgoing = self.build_request(request)?;
            tracing::debug!(
                method = %request.method,
                url = %outgoing.url(),
                "sending Contentful request"
            );

            let res = ctx.run(self.client.execute(outgoing)).await??;
            let code = res.status().as_u16();
            let headers = HttpResponse::parse_headers(res.headers());
            let body = ctx.run(res.bytes()).await??;

            let response = HttpResponse::new(code, headers, body.to_vec());
            tracing::debug!(
                method = %request.method,
                path = %request.path,
                status = code,
                request_id = response.request_id().unwrap_or_default(),
                "received Contentful response"
            );

            if response.is_ok() {
                return Ok(response);
            }

            let error = ApiError::from_response(request.clone(), response);
            if error.kind != ErrorKind::RateLimitExceeded {
                return Err(HttpError::classify(error));
            }

            let Some(reset) = error.response.rate_limit_reset() else {
                return Err(HttpError::classify(error));
            };

            if !self.retry_policy.allows_retry(retries) {
                tracing::warn!(
                    method = %request.method,
                    path = %request.path,
                    retries,
                    "rate limit retries exhausted"
                );
                return Err(HttpError::MaxRetries(MaxHttpRetriesExceededError {
                    retries,
                    last: Box::new(error),
                }));
            }

            retries += 1;
            let delay = self.retry_policy.delay_for(reset);
            tracing::warn!(
                method = %request.method,
                path = %request.path,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                attempt = retries,
                "rate limited by Contentful, retrying"
            );
            ctx.run(tokio::time::sleep(delay)).await?;
        }
    }

    /// Sends a request and decodes the response body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`execute`](Self::execute), plus
    /// [`HttpError::EmptyPayload`] or [`HttpError::Decode`] if the body
    /// cannot be decoded into `T`.
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        request: &HttpRequest,
        ctx: &Context,
    ) -> Result<T, HttpError> {
        let response = self.execute(request, ctx).await?;
        response.json()
    }

    /// Sends a request and discards the response body.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`execute`](Self::execute).
    pub async fn request_empty(
        &self,
        request: &HttpRequest,
        ctx: &Context,
    ) -> Result<(), HttpError> {
        self.execute(request, ctx).await?;
        Ok(())
    }

    /// Sends a request and decodes the body when possible.
    ///
    /// A successful response whose body cannot be decoded into `T` yields
    /// `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`execute`](Self::execute).
    pub async fn request_optional<T: DeserializeOwned>(
        &self,
        request: &HttpRequest,
        ctx: &Context,
    ) -> Result<Option<T>, HttpError> {
        let response = self.execute(request, ctx).await?;
        Ok(response.json().ok())
    }

    fn merged_query(&self, explicit: &[(String, String)]) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = explicit
            .iter()
            .filter(|(key, _)| !self.default_query.contains_key(key))
            .cloned()
            .collect();
        pairs.extend(
            self.default_query
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );
        pairs
    }

    fn header_pair(name: &str, value: &str) -> Result<(HeaderName, HeaderValue), HttpError> {
        let invalid = || InvalidHttpRequestError::InvalidHeader {
            name: name.to_string(),
        };
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
        let mut header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;
        if header_name == AUTHORIZATION {
            header_value.set_sensitive(true);
        }
        Ok((header_name, header_value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::http_request::{DataType, HttpMethod};
    use crate::config::AccessToken;

    fn config(api: ApiKind) -> ContentfulConfig {
        ContentfulConfig::builder()
            .access_token(AccessToken::new("test-token").unwrap())
            .api(api)
            .build()
            .unwrap()
    }

    fn header<'a>(request: &'a reqwest::Request, name: &str) -> Option<&'a str> {
        request.headers().get(name).and_then(|v| v.to_str().ok())
    }

    #[test]
    fn test_default_headers_for_management() {
        let client = HttpClient::new(&config(ApiKind::Management)).unwrap();
        let headers = client.default_headers();

        assert_eq!(headers["authorization"], "Bearer test-token");
        assert_eq!(
            headers["content-type"],
            "application/vnd.contentful.management.v1+json"
        );
        assert!(headers[USER_AGENT_HEADER].contains("sdk contentful-rust/"));
        assert!(!headers.contains_key(ORGANIZATION_HEADER));
    }

    #[test]
    fn test_delivery_uses_delivery_media_type() {
        let client = HttpClient::new(&config(ApiKind::Delivery)).unwrap();
        assert_eq!(
            client.default_headers()["content-type"],
            "application/vnd.contentful.delivery.v1+json"
        );
        assert_eq!(client.base_url().as_ref(), "https://cdn.contentful.com");
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let config = ContentfulConfig::builder()
            .access_token(AccessToken::new("t").unwrap())
            .user_agent_prefix("app blog/1.0;")
            .build()
            .unwrap();
        let client = HttpClient::new(&config).unwrap();

        let user_agent = &client.default_headers()[USER_AGENT_HEADER];
        assert!(user_agent.starts_with("app blog/1.0; sdk"));
    }

    #[test]
    fn test_organization_header_can_be_set_and_cleared() {
        let mut client = HttpClient::new(&config(ApiKind::Management)).unwrap();

        client.set_organization(Some("org-1".to_string()));
        assert_eq!(client.default_headers()[ORGANIZATION_HEADER], "org-1");

        client.set_organization(None);
        assert!(!client.default_headers().contains_key(ORGANIZATION_HEADER));
    }

    #[test]
    fn test_build_request_resolves_url_and_headers() {
        let client = HttpClient::new(&config(ApiKind::Management)).unwrap();
        let path = "/spaces/s1/environments/master/entries/e1";
        let request = HttpRequest::builder(HttpMethod::Put, path)
            .header(VERSION_HEADER, "3")
            .build()
            .unwrap();

        let built = client.build_request(&request).unwrap();

        assert_eq!(built.method(), reqwest::Method::PUT);
        assert_eq!(
            built.url().as_str(),
            "https://api.contentful.com/spaces/s1/environments/master/entries/e1"
        );
        assert_eq!(header(&built, "authorization"), Some("Bearer test-token"));
        assert!(built.headers()["authorization"].is_sensitive());
        assert_eq!(header(&built, "x-contentful-version"), Some("3"));
    }

    #[test]
    fn test_default_query_wins_on_collision() {
        let config = ContentfulConfig::builder()
            .access_token(AccessToken::new("t").unwrap())
            .default_query("locale", "en-US")
            .build()
            .unwrap();
        let client = HttpClient::new(&config).unwrap();
        let request = HttpRequest::builder(HttpMethod::Get, "/spaces/s1/entries")
            .query_param("locale", "de-DE")
            .query_param("limit", "5")
            .build()
            .unwrap();

        let built = client.build_request(&request).unwrap();
        let pairs: Vec<(String, String)> = built
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        assert_eq!(
            pairs,
            vec![
                ("limit".to_string(), "5".to_string()),
                ("locale".to_string(), "en-US".to_string()),
            ]
        );
    }

    #[test]
    fn test_no_query_leaves_url_clean() {
        let client = HttpClient::new(&config(ApiKind::Management)).unwrap();
        let request = HttpRequest::builder(HttpMethod::Get, "/spaces")
            .build()
            .unwrap();

        let built = client.build_request(&request).unwrap();
        assert_eq!(built.url().query(), None);
    }

    #[test]
    fn test_octet_stream_overrides_content_type() {
        let client = HttpClient::new(&config(ApiKind::Upload)).unwrap();
        let request = HttpRequest::builder(HttpMethod::Post, "/spaces/s1/uploads")
            .body(b"binary".to_vec())
            .body_type(DataType::OctetStream)
            .build()
            .unwrap();

        let built = client.build_request(&request).unwrap();
        assert_eq!(header(&built, "content-type"), Some("application/octet-stream"));
        assert_eq!(built.headers().get_all("content-type").iter().count(), 1);
    }

    #[test]
    fn test_invalid_header_value_is_rejected() {
        let client = HttpClient::new(&config(ApiKind::Management)).unwrap();
        let request = HttpRequest::builder(HttpMethod::Get, "/spaces")
            .header("X-Bad", "line\nbreak")
            .build()
            .unwrap();

        assert!(matches!(
            client.build_request(&request),
            Err(HttpError::InvalidRequest(InvalidHttpRequestError::InvalidHeader { .. }))
        ));
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpClient>();
    }
}
