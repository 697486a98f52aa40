use crate::error::{SignError, SignResult};

/// Split the request target into the base URL used for signing.
///
/// The URL has to be absolute, but the returned slice is the caller's own text up
/// to the first `?`; it is never the normalized form `url` would produce, since the
/// server signs what was sent.
pub fn url_to_endpoint(url: &str) -> SignResult<&str> {
    if url.is_empty() {
        return Err(SignError::InvalidRequestTarget("url is required"));
    }
    url::Url::parse(url).map_err(|_| SignError::InvalidRequestTarget("url must be absolute"))?;
    let body = url.split('?').next();
    Ok(body.unwrap_or(url))
}
