//! Verification of incoming Contentful webhook calls.
//!
//! Webhook definitions themselves are managed through
//! [`Client::webhooks`](crate::Client::webhooks); this module is for the
//! receiving side.
//!
//! - [`WebhookRequest`]: method, path, headers and raw body of a call
//! - [`verify_request`]: checks signature and age
//! - [`sign_request`]: produces the same signature, for tests and relays
//! - [`WebhookError`]: why a request was rejected

mod errors;
mod verification;

pub use errors::WebhookError;
pub use verification::{
    sign_request, verify_request, verify_request_at, WebhookRequest, DEFAULT_TTL,
    SIGNATURE_HEADER, SIGNED_HEADERS_HEADER, TIMESTAMP_HEADER,
};
