pub const OAUTH_HEADER: &str = "OAuth";
pub const OAUTH_VALUE_VERSION: &str = "1.0";

pub const OAUTH_VALUE_SIGMETHOD_HMACSHA256: &str = "HMAC-SHA256";

pub const OAUTH_PARAM_KEY_CONSUMER_KEY: &str = "oauth_consumer_key";
pub const OAUTH_PARAM_KEY_NONCE: &str = "oauth_nonce";
pub const OAUTH_PARAM_KEY_SIGNATURE: &str = "oauth_signature";
pub const OAUTH_PARAM_KEY_SIGNATURE_METHOD: &str = "oauth_signature_method";
pub const OAUTH_PARAM_KEY_TIMESTAMP: &str = "oauth_timestamp";
pub const OAUTH_PARAM_KEY_VERSION: &str = "oauth_version";

/// Signature methods the gateway accepts. It only speaks one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SignatureMethod {
    #[default]
    HmacSha256,
}

impl From<SignatureMethod> for &'static str {
    fn from(method: SignatureMethod) -> Self {
        match method {
            SignatureMethod::HmacSha256 => OAUTH_VALUE_SIGMETHOD_HMACSHA256,
        }
    }
}

impl SignatureMethod {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}
