//! OAuth `Authorization` header signing for the CM Payments gateway.
//!
//! The gateway speaks a one-legged OAuth 1.0 variant signed with HMAC-SHA256:
//!
//! ```
//! use cmpaysign::build_authorization_header;
//! use serde_json::json;
//!
//! let header = build_authorization_header(
//!     "POST",
//!     "https://api.cmpayments.com/charges/v1",
//!     Some(&json!({"amount": 10})),
//!     "CK",
//!     "CK&SK",
//! )
//! .unwrap();
//! assert!(header.starts_with("OAuth oauth_consumer_key=\"CK\", "));
//! ```

pub mod builder;
#[cfg(feature = "reqwest")]
pub mod client;
pub mod config;
pub mod credential;
pub mod encoding;
mod error;
pub mod parameters;
pub mod payment;
pub mod signer;
mod util;
pub mod values;

pub use builder::{AuthHeaderBuilder, SignedContent};
#[cfg(feature = "reqwest")]
pub use client::{ClientError, ClientResult, CmPayClient};
pub use credential::Credential;
pub use encoding::percent_encode;
pub use error::{SignError, SignResult};
pub use parameters::AuthParameterSet;
pub use signer::SignatureComposer;

use serde_json::Value;

/// Build the value of the `Authorization` header for one request.
///
/// A fresh nonce and timestamp are used on every call. Send the header together
/// with `Content-type: application/json`.
pub fn build_authorization_header(
    http_method: &str,
    full_url: &str,
    body: Option<&Value>,
    consumer_key: &str,
    signing_key: &str,
) -> SignResult<String> {
    AuthHeaderBuilder::new(consumer_key).build(http_method, full_url, body, signing_key)
}
