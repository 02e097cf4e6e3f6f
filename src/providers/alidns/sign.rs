//! Classic AliCloud RPC signature (HMAC-SHA1 over the query string).
//!
//! Reference: <https://www.alibabacloud.com/help/en/sdk/product-overview/rpc-mechanism>
//!
//! The scheme, in order:
//! 1. sort all parameters (everything except `Signature`) lexicographically;
//! 2. RFC 3986 percent-encode each key and value and join as `k=v` with `&`;
//! 3. build `StringToSign = GET&%2F&<encode(canonical query)>` — a second
//!    encoding pass over the already-encoded string;
//! 4. HMAC-SHA1 with the key `<access_key_secret>&` (trailing ampersand
//!    included), base64-encoded.

use std::collections::BTreeMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::providers::common::hmac_sha1;

/// RFC 3986 percent-encoding: everything except `A-Za-z0-9-_.~` is encoded.
/// Space becomes `%20`, never `+`.
pub(crate) fn percent_encode(s: &str) -> String {
    urlencoding::encode(s).into_owned()
}

/// Joins sorted parameters into the canonical query string.
/// `BTreeMap` ordering gives the required lexicographic sort for free.
pub(crate) fn canonical_query_string(params: &BTreeMap<String, String>) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Computes the base64 signature for a request.
///
/// `params` holds every request parameter except `Signature` itself; the
/// caller appends the returned value as the `Signature` parameter.
pub(crate) fn sign_request(
    access_key_secret: &str,
    http_method: &str,
    params: &BTreeMap<String, String>,
) -> String {
    let canonical = canonical_query_string(params);
    let string_to_sign = format!("{http_method}&%2F&{}", percent_encode(&canonical));

    log::debug!("StringToSign: {string_to_sign}");

    let key = format!("{access_key_secret}&");
    let digest = hmac_sha1(key.as_bytes(), string_to_sign.as_bytes());
    BASE64.encode(digest)
}
