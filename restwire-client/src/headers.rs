//! Default-header normalization.

use http::header::{ACCEPT, USER_AGENT};
use http::{HeaderMap, HeaderValue};

/// Product token identifying this layer in the `User-Agent` header.
pub const USER_AGENT_TOKEN: &str = concat!("restwire/", env!("CARGO_PKG_VERSION"));

/// Ensure the `User-Agent` header carries [`USER_AGENT_TOKEN`] exactly once.
///
/// The header is treated as a list of whitespace-separated product tokens.
/// Tokens already set by the caller are kept byte for byte, including ones
/// that are not valid UTF-8, and repeated `User-Agent` entries are folded
/// into a single value.
pub fn ensure_user_agent(headers: &mut HeaderMap) {
    let token = USER_AGENT_TOKEN.as_bytes();

    let mut values = headers.get_all(USER_AGENT).iter();
    if let (Some(only), None) = (values.next(), values.next())
        && products(only.as_bytes()).filter(|p| *p == token).count() == 1
    {
        return;
    }

    let mut joined: Vec<u8> = Vec::new();
    for value in headers.get_all(USER_AGENT) {
        for product in products(value.as_bytes()).filter(|p| *p != token) {
            joined.extend_from_slice(product);
            joined.push(b' ');
        }
    }
    joined.extend_from_slice(token);

    let value = HeaderValue::from_bytes(&joined)
        .unwrap_or_else(|_| HeaderValue::from_static(USER_AGENT_TOKEN));
    headers.insert(USER_AGENT, value);
}

fn products(value: &[u8]) -> impl Iterator<Item = &[u8]> {
    value
        .split(u8::is_ascii_whitespace)
        .filter(|product| !product.is_empty())
}

/// Replace the `Accept` header with a single media type.
pub fn set_accept(headers: &mut HeaderMap, media_type: &'static str) {
    headers.insert(ACCEPT, HeaderValue::from_static(media_type));
}
