use crate::builder::AuthHeaderBuilder;
use crate::encoding::percent_encode;
use crate::error::SignResult;
use serde_json::Value;
use std::fmt;

/// Consumer key plus the key used for HMAC signing.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    consumer_key: String,
    signing_key: String,
}

impl Credential {
    /// Derive the signing key the gateway expects: `encoded(consumer key)&encoded(secret key)`.
    pub fn new<K, S>(consumer_key: K, secret_key: S) -> Self
    where
        K: Into<String>,
        S: AsRef<str>,
    {
        let consumer_key = consumer_key.into();
        let signing_key = format!(
            "{}&{}",
            percent_encode(&consumer_key),
            percent_encode(secret_key.as_ref())
        );
        Credential {
            consumer_key,
            signing_key,
        }
    }

    /// Use a signing key that was derived elsewhere.
    pub fn with_signing_key(consumer_key: impl Into<String>, signing_key: impl Into<String>) -> Self {
        Credential {
            consumer_key: consumer_key.into(),
            signing_key: signing_key.into(),
        }
    }

    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    pub fn signing_key(&self) -> &str {
        &self.signing_key
    }

    /// Build the `Authorization` header value for one request.
    pub fn authorize(&self, http_method: &str, url: &str, body: Option<&Value>) -> SignResult<String> {
        AuthHeaderBuilder::new(self.consumer_key.as_str()).build(http_method, url, body, &self.signing_key)
    }
}

// keep the signing key out of logs
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("consumer_key", &self.consumer_key)
            .field("signing_key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SignError;

    #[test]
    fn test_signing_key_derivation() {
        let credential = Credential::new("CK", "S K/1");
        assert_eq!(credential.consumer_key(), "CK");
        assert_eq!(credential.signing_key(), "CK&S%20K%2F1");
    }

    #[test]
    fn test_debug_redacts_signing_key() {
        let credential = Credential::new("CK", "secret");
        let printed = format!("{:?}", credential);
        assert!(printed.contains("CK"));
        assert!(!printed.contains("secret"));
    }

    #[test]
    fn test_authorize() {
        let header = Credential::new("CK", "S K/1")
            .authorize("POST", "https://api.cmpayments.com/charges/v1", Some(&serde_json::json!({"amount": 10})))
            .unwrap();
        assert!(header.starts_with("OAuth oauth_consumer_key=\"CK\", oauth_nonce=\""));
    }

    #[test]
    fn test_authorize_rejects_empty_signing_key() {
        let credential = Credential::with_signing_key("CK", "");
        assert_eq!(
            credential.authorize("GET", "https://api.cmpayments.com/issuers/v1/ideal", None),
            Err(SignError::InvalidCredential("signing key is required"))
        );
    }
}
