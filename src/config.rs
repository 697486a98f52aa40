//! Gateway client options.
//!
//! Options are read the way the gateway's own client takes them: a JSON object with
//! camelCase keys.
//!
//! ```
//! use cmpaysign::config::Options;
//!
//! let options = Options::from_json_str(r#"{
//!     "consumerKey": "CK",
//!     "secretKey": "SK",
//!     "country": "NL",
//!     "language": "nl",
//!     "currency": "EUR",
//!     "company": "ACME",
//!     "referencePrefix": "ACME-",
//!     "returnUrls": {
//!         "success": "https://shop.example/ok",
//!         "fail": "https://shop.example/fail",
//!         "cancel": "https://shop.example/cancel",
//!         "error": "https://shop.example/error"
//!     }
//! }"#).unwrap();
//! assert_eq!(options.api_url, "https://api.cmpayments.com");
//! assert!(!options.debug);
//! ```

use crate::credential::Credential;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "https://api.cmpayments.com";

/// Result type for option loading
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Options.{0} is required")]
    MissingField(&'static str),

    #[error("Failed to parse options: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Return URLs handed to the issuer for each payment outcome.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnUrls {
    pub success: String,
    pub fail: String,
    pub cancel: String,
    pub error: String,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Options {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Verbose transport logging. Passed to the HTTP client when it is built.
    #[serde(default)]
    pub debug: bool,
    pub consumer_key: String,
    pub secret_key: String,
    pub country: String,
    pub language: String,
    pub currency: String,
    pub company: String,
    pub reference_prefix: String,
    pub return_urls: ReturnUrls,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

// keep the secret key out of logs
impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("api_url", &self.api_url)
            .field("debug", &self.debug)
            .field("consumer_key", &self.consumer_key)
            .field("secret_key", &"<redacted>")
            .field("country", &self.country)
            .field("language", &self.language)
            .field("currency", &self.currency)
            .field("company", &self.company)
            .field("reference_prefix", &self.reference_prefix)
            .field("return_urls", &self.return_urls)
            .finish()
    }
}

impl Options {
    /// Parse and validate options from JSON.
    pub fn from_json_str(s: &str) -> ConfigResult<Self> {
        let options: Options = serde_json::from_str(s)?;
        options.validate()?;
        Ok(options)
    }

    /// Reject empty required fields.
    pub fn validate(&self) -> ConfigResult<()> {
        let required = [
            ("apiUrl", &self.api_url),
            ("consumerKey", &self.consumer_key),
            ("secretKey", &self.secret_key),
            ("country", &self.country),
            ("language", &self.language),
            ("currency", &self.currency),
            ("company", &self.company),
            ("referencePrefix", &self.reference_prefix),
            ("returnUrls.success", &self.return_urls.success),
            ("returnUrls.fail", &self.return_urls.fail),
            ("returnUrls.cancel", &self.return_urls.cancel),
            ("returnUrls.error", &self.return_urls.error),
        ];
        match required.iter().find(|(_, value)| value.is_empty()) {
            Some((name, _)) => Err(ConfigError::MissingField(*name)),
            None => Ok(()),
        }
    }

    pub fn credential(&self) -> Credential {
        Credential::new(self.consumer_key.as_str(), &self.secret_key)
    }
}
