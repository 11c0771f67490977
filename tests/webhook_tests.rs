//! Integration tests for webhook request verification.

use std::time::Duration;

use chrono::Utc;
use contentful::webhooks::{
    sign_request, verify_request, WebhookError, WebhookRequest, DEFAULT_TTL, SIGNATURE_HEADER,
    TIMESTAMP_HEADER,
};
use tokio_test::{assert_err, assert_ok};

const SECRET: &str = "d7b9f1c2e0a84f3b9a6c5e4d3b2a1f0e";

fn incoming() -> WebhookRequest {
    WebhookRequest::new(
        "post",
        "/hooks/contentful",
        br#"{"sys":{"id":"nyancat","type":"Entry"}}"#.to_vec(),
    )
    .with_header("Content-Type", "application/vnd.contentful.management.v1+json")
    .with_header("X-Contentful-Topic", "ContentManagement.Entry.publish")
}

#[test]
fn test_freshly_signed_request_verifies() {
    let signed = sign_request(SECRET, &incoming(), Utc::now()).unwrap();

    assert!(signed.header(SIGNATURE_HEADER).is_some());
    assert_ok!(verify_request(SECRET, &signed, DEFAULT_TTL));
}

#[test]
fn test_relayed_request_rebuilt_from_headers_verifies() {
    let signed = sign_request(SECRET, &incoming(), Utc::now()).unwrap();

    let mut relayed = WebhookRequest::new(signed.method(), signed.path(), signed.body().to_vec());
    for (name, value) in signed.headers() {
        relayed = relayed.with_header(&name.to_uppercase(), value.clone());
    }

    assert_ok!(verify_request(SECRET, &relayed, DEFAULT_TTL));
}

#[test]
fn test_wrong_secret_is_rejected() {
    let signed = sign_request(SECRET, &incoming(), Utc::now()).unwrap();

    let err = verify_request("another-secret", &signed, DEFAULT_TTL).unwrap_err();
    assert!(matches!(err, WebhookError::InvalidSignature));
}

#[test]
fn test_old_request_is_stale_unless_ttl_disabled() {
    let signed_at = Utc::now() - chrono::Duration::minutes(5);
    let signed = sign_request(SECRET, &incoming(), signed_at).unwrap();

    let err = verify_request(SECRET, &signed, DEFAULT_TTL).unwrap_err();
    assert!(matches!(err, WebhookError::StaleRequest { .. }));

    assert_ok!(verify_request(SECRET, &signed, Duration::ZERO));
}

#[test]
fn test_unsigned_request_is_rejected() {
    let err = assert_err!(verify_request(SECRET, &incoming(), DEFAULT_TTL));
    assert!(matches!(err, WebhookError::MissingHeader { .. }));
}

#[test]
fn test_forged_timestamp_is_rejected() {
    let signed = sign_request(SECRET, &incoming(), Utc::now()).unwrap();
    let forged = signed.with_header(
        TIMESTAMP_HEADER,
        (Utc::now().timestamp_millis() + 1).to_string(),
    );

    let err = verify_request(SECRET, &forged, Duration::ZERO).unwrap_err();
    assert!(matches!(err, WebhookError::InvalidSignature));
}
