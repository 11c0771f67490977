//! Request signature verification for Contentful webhooks.
//!
//! # Overview
//!
//! When a webhook definition has a signing secret, Contentful adds three
//! headers to every call:
//!
//! - [`SIGNATURE_HEADER`]: hex-encoded HMAC-SHA256 of the canonical request
//! - [`SIGNED_HEADERS_HEADER`]: comma-separated, lowercase names of the
//!   headers covered by the signature
//! - [`TIMESTAMP_HEADER`]: signing time in Unix milliseconds
//!
//! The canonical request is
//!
//! ```text
//! METHOD\nPATH\nname1:value1;name2:value2\nBODY
//! ```
//!
//! with headers in the order listed in the signed-headers header.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use contentful::webhooks::{sign_request, verify_request, WebhookRequest};
//!
//! let request = WebhookRequest::new("POST", "/hooks/contentful", br#"{"sys":{}}"#.to_vec())
//!     .with_header("Content-Type", "application/json");
//!
//! let signed = sign_request("secret", &request, chrono::Utc::now()).unwrap();
//! assert!(verify_request("secret", &signed, Duration::from_secs(30)).is_ok());
//! assert!(verify_request("other", &signed, Duration::from_secs(30)).is_err());
//! ```
//!
//! # Security
//!
//! Signatures are compared in constant time. A request older than the
//! time-to-live is rejected even when its signature is valid.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::webhooks::WebhookError;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the hex-encoded signature.
pub const SIGNATURE_HEADER: &str = "x-contentful-signature";

/// Header listing the signed header names.
pub const SIGNED_HEADERS_HEADER: &str = "x-contentful-signed-headers";

/// Header carrying the signing time in Unix milliseconds.
pub const TIMESTAMP_HEADER: &str = "x-contentful-timestamp";

/// Time-to-live applied by Contentful's own request verification helpers.
pub const DEFAULT_TTL: Duration = Duration::from_secs(30);

/// An incoming webhook request, as seen by the receiving server.
///
/// Header names are stored lowercase. The body is kept as raw bytes so the
/// signature covers exactly what was sent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WebhookRequest {
    method: String,
    path: String,
    headers: BTreeMap<String, String>,
    body: Vec<u8>,
}

impl WebhookRequest {
    /// Creates a request with no headers.
    #[must_use]
    pub fn new(method: impl Into<String>, path: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            method: method.into().to_uppercase(),
            path: path.into(),
            headers: BTreeMap::new(),
            body,
        }
    }

    /// Adds a header, replacing any previous value with the same name.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_lowercase(), value.into());
        self
    }

    /// Returns the uppercase HTTP method.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Returns the request path, including any query string.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns a header value by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }

    /// Returns the headers, keyed by lowercase name.
    #[must_use]
    pub const fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Returns the raw body.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

fn required_header<'a>(
    request: &'a WebhookRequest,
    name: &'static str,
) -> Result<&'a str, WebhookError> {
    request
        .header(name)
        .ok_or(WebhookError::MissingHeader { name })
}

fn compute_signature(
    secret: &str,
    request: &WebhookRequest,
    signed_headers: &[String],
) -> Result<String, WebhookError> {
    let mut pairs = Vec::with_capacity(signed_headers.len());
    for name in signed_headers {
        let value = request
            .header(name)
            .ok_or_else(|| WebhookError::MissingSignedHeader { name: name.clone() })?;
        pairs.push(format!("{name}:{value}"));
    }
    let prefix = format!("{}\n{}\n{}\n", request.method, request.path, pairs.join(";"));

    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| WebhookError::InvalidSecret)?;
    mac.update(prefix.as_bytes());
    mac.update(&request.body);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Signs `request` the way Contentful does and returns the signed copy.
///
/// Every header already on the request is covered, together with the
/// timestamp header.
///
/// # Errors
///
/// Returns [`WebhookError::InvalidSecret`] if the secret is rejected.
pub fn sign_request(
    secret: &str,
    request: &WebhookRequest,
    timestamp: DateTime<Utc>,
) -> Result<WebhookRequest, WebhookError> {
    let mut signed = request.clone();
    signed.headers.remove(SIGNATURE_HEADER);
    signed.headers.remove(SIGNED_HEADERS_HEADER);
    signed.headers.insert(
        TIMESTAMP_HEADER.to_string(),
        timestamp.timestamp_millis().to_string(),
    );

    let names: Vec<String> = signed.headers.keys().cloned().collect();
    let signature = compute_signature(secret, &signed, &names)?;

    signed
        .headers
        .insert(SIGNED_HEADERS_HEADER.to_string(), names.join(","));
    signed
        .headers
        .insert(SIGNATURE_HEADER.to_string(), signature);
    Ok(signed)
}

/// Verifies the signature and age of an incoming webhook request.
///
/// A zero `ttl` disables the age check.
///
/// # Errors
///
/// Returns [`WebhookError::InvalidSignature`] if the signature does not
/// match, [`WebhookError::StaleRequest`] if the request is older than
/// `ttl`, and the other [`WebhookError`] variants for malformed requests.
pub fn verify_request(
    secret: &str,
    request: &WebhookRequest,
    ttl: Duration,
) -> Result<(), WebhookError> {
    verify_request_at(secret, request, ttl, Utc::now())
}

/// [`verify_request`] against an explicit clock.
///
/// # Errors
///
/// See [`verify_request`].
pub fn verify_request_at(
    secret: &str,
    request: &WebhookRequest,
    ttl: Duration,
    now: DateTime<Utc>,
) -> Result<(), WebhookError> {
    let signature = required_header(request, SIGNATURE_HEADER)?;
    let signed_headers: Vec<String> = required_header(request, SIGNED_HEADERS_HEADER)?
        .split(',')
        .map(|name| name.trim().to_lowercase())
        .filter(|name| !name.is_empty())
        .collect();
    let raw_timestamp = required_header(request, TIMESTAMP_HEADER)?;
    let timestamp: i64 =
        raw_timestamp
            .trim()
            .parse()
            .map_err(|_| WebhookError::InvalidTimestamp {
                value: raw_timestamp.to_string(),
            })?;

    if !ttl.is_zero() {
        let age_ms = now.timestamp_millis() - timestamp;
        let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        if age_ms > ttl_ms {
            tracing::debug!(age_ms, ttl_ms, "rejecting stale webhook request");
            return Err(WebhookError::StaleRequest { age_ms });
        }
    }

    let expected = compute_signature(secret, request, &signed_headers)?;
    if expected.as_bytes().ct_eq(signature.trim().as_bytes()).into() {
        Ok(())
    } else {
        Err(WebhookError::InvalidSignature)
    }
}
