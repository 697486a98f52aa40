use crate::encoding::percent_encode;
use crate::error::{SignError, SignResult};
use crate::parameters::AuthParameterSet;
use crate::util;
use crate::values::OAUTH_PARAM_KEY_SIGNATURE;
use base64::{engine::general_purpose, Engine as _};
use hmac::{Hmac, Mac};
use serde_json::Value;
use sha2::Sha256;
use std::borrow::Cow;
use tracing::{debug, warn};

type HmacSha256 = Hmac<Sha256>;

// encoded form of the '&' closing every canonical segment
const ENCODED_SEPARATOR: &str = "%26";

/// Signature base string composer.
///
/// ```
/// use cmpaysign::{AuthParameterSet, SignatureComposer};
///
/// let params: AuthParameterSet = vec![("a", "b")].into_iter().collect();
/// let base = SignatureComposer::new("get", "https://x/y?q=1")
///     .signature_base_string(&params)
///     .unwrap();
/// assert_eq!(base, "GET&https%3A%2F%2Fx%2Fy&a%3Db");
/// ```
#[derive(Clone, Debug)]
pub struct SignatureComposer<'a> {
    http_method: Cow<'a, str>,
    endpoint: Cow<'a, str>,
    body: Option<&'a Value>,
}

impl<'a> SignatureComposer<'a> {
    pub fn new<TMethod, TEndpoint>(http_method: TMethod, endpoint: TEndpoint) -> Self
    where
        TMethod: Into<Cow<'a, str>>,
        TEndpoint: Into<Cow<'a, str>>,
    {
        SignatureComposer {
            http_method: http_method.into(),
            endpoint: endpoint.into(),
            body: None,
        }
    }

    /// JSON body sent with the request. A JSON `null` counts as no body.
    pub fn body(mut self, body: Option<&'a Value>) -> Self {
        self.body = body.filter(|b| !b.is_null());
        self
    }

    /// Concatenated, per-segment percent-encoded parameters with the final
    /// separator removed.
    ///
    /// The body (if any) comes first as an unnamed segment, followed by every
    /// parameter except `oauth_signature` in ascending key order.
    pub fn canonical_parameters(&self, params: &AuthParameterSet) -> String {
        let mut canonical = match self.body {
            Some(body) => percent_encode(&format!("{}&", body)),
            None => String::new(),
        };
        for (k, v) in params.sorted() {
            if k == OAUTH_PARAM_KEY_SIGNATURE {
                warn!("Ignoring oauth_signature found in the parameters to sign");
                continue;
            }
            canonical.push_str(&percent_encode(&format!("{}={}&", k, v)));
        }
        if canonical.ends_with(ENCODED_SEPARATOR) {
            canonical.truncate(canonical.len() - ENCODED_SEPARATOR.len());
        }
        canonical
    }

    /// `METHOD&encoded(base url)&canonical parameters`
    pub fn signature_base_string(&self, params: &AuthParameterSet) -> SignResult<String> {
        if self.http_method.trim().is_empty() {
            return Err(SignError::InvalidRequestTarget("http method is required"));
        }
        let endpoint = util::url_to_endpoint(&self.endpoint)?;
        let http_method = self.http_method.to_ascii_uppercase();
        debug!(method = %http_method, endpoint, "Composing signature base string");

        Ok(format!(
            "{}&{}&{}",
            http_method,
            percent_encode(endpoint),
            self.canonical_parameters(params)
        ))
    }

    /// Sign `params` with `signing_key`.
    ///
    /// `params` should not carry `oauth_signature` yet. If it does, the stale value
    /// is left out of the signature (and a warning is logged), so re-signing a set
    /// gives the same result as signing it the first time.
    ///
    /// # Returns
    /// base64 of the lowercase hex HMAC-SHA256 digest (not of the raw digest bytes).
    pub fn compose(&self, params: &AuthParameterSet, signing_key: &str) -> SignResult<String> {
        if signing_key.is_empty() {
            return Err(SignError::InvalidCredential("signing key is required"));
        }
        let base_str = self.signature_base_string(params)?;
        debug!(base_str = %base_str, "Built signature base string");
        Ok(hmac_sha256_hex_base64(signing_key, &base_str))
    }
}

/// Compute the `oauth_signature` value for one request.
pub fn compose(
    http_method: &str,
    url: &str,
    body: Option<&Value>,
    params: &AuthParameterSet,
    signing_key: &str,
) -> SignResult<String> {
    SignatureComposer::new(http_method, url)
        .body(body)
        .compose(params, signing_key)
}

fn hmac_sha256_hex_base64(key: &str, message: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(key.as_bytes())
        .expect("this message is dummy; HMAC-SHA256 accepts any size of keys.");
    mac.update(message.as_bytes());
    let hash = hex::encode(mac.finalize().into_bytes());
    general_purpose::STANDARD.encode(hash)
}
