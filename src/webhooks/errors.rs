//! Webhook verification errors.

use thiserror::Error;

/// Error returned when an incoming webhook request fails verification.
///
/// Messages never include the secret or the expected signature.
///
/// # Example
///
/// ```rust
/// use contentful::webhooks::WebhookError;
///
/// let error = WebhookError::MissingHeader { name: "x-contentful-signature" };
/// assert_eq!(error.to_string(), "Missing webhook header 'x-contentful-signature'");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WebhookError {
    /// A header required for verification is absent.
    #[error("Missing webhook header '{name}'")]
    MissingHeader {
        /// Lowercase header name.
        name: &'static str,
    },

    /// A header listed in `x-contentful-signed-headers` is absent.
    #[error("Signed header '{name}' is missing from the request")]
    MissingSignedHeader {
        /// Lowercase header name.
        name: String,
    },

    /// The timestamp header is not a millisecond Unix timestamp.
    #[error("Invalid webhook timestamp '{value}'")]
    InvalidTimestamp {
        /// The raw header value.
        value: String,
    },

    /// The request is older than the accepted time-to-live.
    #[error("Webhook request is stale ({age_ms} ms old)")]
    StaleRequest {
        /// Age of the request in milliseconds.
        age_ms: i64,
    },

    /// The signing secret was rejected by the MAC implementation.
    #[error("Invalid webhook signing secret")]
    InvalidSecret,

    /// The signature does not match the request.
    #[error("Webhook signature verification failed")]
    InvalidSignature,
}

// Verify WebhookError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<WebhookError>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_signature_message_is_generic() {
        let message = WebhookError::InvalidSignature.to_string();
        assert_eq!(message, "Webhook signature verification failed");
    }

    #[test]
    fn test_stale_request_reports_age() {
        let error = WebhookError::StaleRequest { age_ms: 45_000 };
        assert!(error.to_string().contains("45000 ms"));
    }

    #[test]
    fn test_missing_signed_header_names_header() {
        let error = WebhookError::MissingSignedHeader {
            name: "x-custom".to_string(),
        };
        assert!(error.to_string().contains("x-custom"));
    }
}
