use thiserror::Error;

/// Result type for header signing
pub type SignResult<T> = std::result::Result<T, SignError>;

/// Error type for header signing.
///
/// Both variants are precondition failures, raised before anything is hashed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignError {
    /// Consumer key or signing key is missing.
    #[error("Invalid credential: {0}")]
    InvalidCredential(&'static str),

    /// HTTP method or URL is missing or unusable.
    #[error("Invalid request target: {0}")]
    InvalidRequestTarget(&'static str),
}
