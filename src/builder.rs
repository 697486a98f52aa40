use crate::error::{SignError, SignResult};
use crate::parameters::AuthParameterSet;
use crate::signer::SignatureComposer;
use crate::values::*;
use chrono::Utc;
use serde_json::Value;
use std::borrow::Cow;
use tracing::debug;
use uuid::Uuid;

/// Contents signed for one request.
#[derive(Clone, Debug)]
pub struct SignedContent {
    pub signature: String,
    pub nonce: String,
    pub timestamp: i64,
    /// All six parameters, `oauth_signature` included.
    pub parameters: AuthParameterSet<'static>,
}

impl SignedContent {
    /// The `Authorization` header value.
    pub fn to_header(&self) -> String {
        self.parameters.to_header()
    }
}

/// OAuth Authorization Header Builder
///
/// A fresh nonce and timestamp are drawn for every call unless pinned with
/// [`AuthHeaderBuilder::oauth_nonce`] / [`AuthHeaderBuilder::oauth_timestamp`].
#[derive(Clone, Debug)]
pub struct AuthHeaderBuilder<'a> {
    oauth_consumer_key: Cow<'a, str>,
    oauth_nonce: Option<Cow<'a, str>>,
    oauth_signature_method: SignatureMethod,
    oauth_timestamp: Option<i64>,
}

impl<'a> AuthHeaderBuilder<'a> {
    /// Constructor of AuthHeaderBuilder with OAuth consumer_key.
    pub fn new<K: Into<Cow<'a, str>>>(consumer_key: K) -> Self {
        AuthHeaderBuilder {
            oauth_consumer_key: consumer_key.into(),
            oauth_nonce: None,
            oauth_signature_method: SignatureMethod::default(),
            oauth_timestamp: None,
        }
    }

    pub fn oauth_nonce(&mut self, nonce: impl Into<Cow<'a, str>>) -> &mut Self {
        self.oauth_nonce = Some(nonce.into());
        self
    }

    pub fn oauth_timestamp(&mut self, timestamp: i64) -> &mut Self {
        self.oauth_timestamp = Some(timestamp);
        self
    }

    /// Build the `Authorization` header value for a request.
    pub fn build(
        &self,
        http_method: &str,
        url: &str,
        body: Option<&Value>,
        signing_key: &str,
    ) -> SignResult<String> {
        self.sign(http_method, url, body, signing_key)
            .map(|signed| signed.to_header())
    }

    /// Sign a request (core method).
    ///
    /// # Parameters
    /// - http_method: HTTP method, ex)"GET", "POST", ...
    /// - url: full request URL; its query string is not signed.
    /// - body: JSON body, if the request has one.
    /// - signing_key: `encoded(consumer key)&encoded(secret key)`.
    pub fn sign(
        &self,
        http_method: &str,
        url: &str,
        body: Option<&Value>,
        signing_key: &str,
    ) -> SignResult<SignedContent> {
        if self.oauth_consumer_key.is_empty() {
            return Err(SignError::InvalidCredential("consumer key is required"));
        }
        if signing_key.is_empty() {
            return Err(SignError::InvalidCredential("signing key is required"));
        }
        if http_method.trim().is_empty() {
            return Err(SignError::InvalidRequestTarget("http method is required"));
        }
        if url.is_empty() {
            return Err(SignError::InvalidRequestTarget("url is required"));
        }

        // generate nonce and timestamp when they are not specified
        let nonce = self
            .oauth_nonce
            .as_ref()
            .map(|n| n.to_string())
            .unwrap_or_else(|| format!("{}", Uuid::new_v4()));
        let timestamp = self.oauth_timestamp.unwrap_or_else(|| Utc::now().timestamp());

        // build authorization basic parameters
        let mut parameters = AuthParameterSet::new();
        parameters
            .insert(OAUTH_PARAM_KEY_CONSUMER_KEY, self.oauth_consumer_key.to_string())
            .insert(OAUTH_PARAM_KEY_NONCE, nonce.clone())
            .insert(OAUTH_PARAM_KEY_SIGNATURE_METHOD, self.oauth_signature_method.as_str())
            .insert(OAUTH_PARAM_KEY_TIMESTAMP, timestamp.to_string())
            .insert(OAUTH_PARAM_KEY_VERSION, OAUTH_VALUE_VERSION);

        let signature = SignatureComposer::new(http_method, url)
            .body(body)
            .compose(&parameters, signing_key)?;
        parameters.insert(OAUTH_PARAM_KEY_SIGNATURE, signature.clone());
        debug!(
            consumer_key = %self.oauth_consumer_key,
            nonce = %nonce,
            timestamp,
            "Signed request"
        );

        Ok(SignedContent {
            signature,
            nonce,
            timestamp,
            parameters,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;
    use serde_json::json;

    const HEADER_SHAPE: &str = r#"^OAuth ([a-zA-Z0-9%_.~-]+="[^"]*", )*[a-zA-Z0-9%_.~-]+="[^"]*"$"#;

    #[test]
    fn test_fixed_header() {
        let header = AuthHeaderBuilder::new("CK")
            .oauth_nonce("n1")
            .oauth_timestamp(1000)
            .build("GET", "https://api.cmpayments.com/issuers/v1/ideal", None, "SK")
            .unwrap();
        assert_eq!(
            header,
            "OAuth oauth_consumer_key=\"CK\", oauth_nonce=\"n1\", \
             oauth_signature=\"ZTUwMGY5OWM3MTZhOGU1N2QwZWNiM2I5N2I2MGUwNWZmMTlhYzBiYjM1ZWU3Mjc3OGMyMTcxMGI0Zjk2ODg4ZA%3D%3D\", \
             oauth_signature_method=\"HMAC-SHA256\", oauth_timestamp=\"1000\", oauth_version=\"1.0\""
        );
    }

    #[test]
    fn test_fixed_header_with_body() {
        let body = json!({"amount": 10});
        let signed = AuthHeaderBuilder::new("CK")
            .oauth_nonce("n1")
            .oauth_timestamp(1000)
            .sign("POST", "https://api.cmpayments.com/charges/v1", Some(&body), "CK&S%20K%2F1")
            .unwrap();
        assert_eq!(
            signed.signature,
            "MmI1Y2ZmYjA1NmU3NjY1OTNjNDVhYWI5YjZmNjE1MGEyMzk1NmFiOGQzOWYyZDJlMTBlNmY2OTNkNzcxOTI2NA=="
        );
    }

    #[test]
    fn test_header_structure() {
        let body = json!({"amount": 10});
        let header = AuthHeaderBuilder::new("CK123")
            .build("POST", "https://api.example.com/charges/v1", Some(&body), "signingkey")
            .unwrap();
        assert!(Regex::new(HEADER_SHAPE).unwrap().is_match(&header), "{}", header);
        assert!(!header.ends_with(", "));

        let keys = header
            .trim_start_matches("OAuth ")
            .split(", ")
            .map(|entry| entry.split('=').next().unwrap_or(""))
            .collect::<Vec<_>>();
        assert_eq!(
            keys,
            vec![
                "oauth_consumer_key",
                "oauth_nonce",
                "oauth_signature",
                "oauth_signature_method",
                "oauth_timestamp",
                "oauth_version",
            ]
        );
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn test_signed_content() {
        let signed = AuthHeaderBuilder::new("CK")
            .oauth_nonce("n1")
            .oauth_timestamp(1000)
            .sign("get", "https://api.cmpayments.com/issuers/v1/ideal", None, "SK")
            .unwrap();
        assert_eq!(signed.nonce, "n1");
        assert_eq!(signed.timestamp, 1000);
        assert_eq!(signed.parameters.len(), 6);
        assert_eq!(signed.parameters.get(OAUTH_PARAM_KEY_SIGNATURE), Some(signed.signature.as_str()));
        assert_eq!(signed.parameters.get(OAUTH_PARAM_KEY_SIGNATURE_METHOD), Some("HMAC-SHA256"));
        assert_eq!(signed.parameters.get(OAUTH_PARAM_KEY_VERSION), Some("1.0"));
    }

    #[test]
    fn test_fresh_nonce_per_call() {
        let builder = AuthHeaderBuilder::new("CK");
        let url = "https://api.cmpayments.com/issuers/v1/ideal";
        let a = builder.sign("GET", url, None, "SK").unwrap();
        let b = builder.sign("GET", url, None, "SK").unwrap();
        assert_ne!(a.nonce, b.nonce);
        assert_ne!(a.signature, b.signature);
        assert!((a.timestamp - Utc::now().timestamp()).abs() < 60);
    }

    #[test]
    fn test_preconditions() {
        let url = "https://api.cmpayments.com/issuers/v1/ideal";
        assert_eq!(
            AuthHeaderBuilder::new("CK").build("GET", url, None, ""),
            Err(SignError::InvalidCredential("signing key is required"))
        );
        assert_eq!(
            AuthHeaderBuilder::new("").build("GET", url, None, "SK"),
            Err(SignError::InvalidCredential("consumer key is required"))
        );
        assert_eq!(
            AuthHeaderBuilder::new("CK").build("GET", "", None, "SK"),
            Err(SignError::InvalidRequestTarget("url is required"))
        );
        assert_eq!(
            AuthHeaderBuilder::new("CK").build(" ", url, None, "SK"),
            Err(SignError::InvalidRequestTarget("http method is required"))
        );
    }
}
