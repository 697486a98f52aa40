use percent_encoding::{utf8_percent_encode, AsciiSet, PercentEncode};
use std::borrow::Cow;

// https://tools.ietf.org/html/rfc3986#section-2.3
// * ALPHA, DIGIT, '-', '.', '_', '~' MUST NOT be encoded.
// * All other characters MUST be encoded, space included (never '+').
// * The two hexadecimal characters used to represent encoded
//   characters MUST be uppercase.
const TARGETS_FOR_PARAMS: &AsciiSet = &percent_encoding::NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode `input` with the RFC 3986 unreserved set.
pub fn percent_encode(input: &str) -> String {
    encode(input).to_string()
}

/// Same as [`percent_encode`], but keeps borrowed input borrowed when nothing needs escaping.
pub fn percent_encode_cow<'a, T: Into<Cow<'a, str>>>(input: T) -> Cow<'a, str> {
    match input.into() {
        Cow::Borrowed(r) => Cow::from(encode(r)),
        Cow::Owned(v) => Cow::from(encode(&v).to_string()),
    }
}

fn encode(input: &str) -> PercentEncode<'_> {
    utf8_percent_encode(input, TARGETS_FOR_PARAMS)
}
