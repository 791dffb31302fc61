//! SigV4 canonical request construction.
//!
//! ```text
//! HTTPRequestMethod\n
//! CanonicalURI\n
//! CanonicalQueryString\n
//! CanonicalHeaders\n\n
//! SignedHeaders\n
//! HashedPayload
//! ```
//!
//! The signer and the verifier both go through these functions, so a URL
//! produced by [`presign_url`](crate::presign_url) always canonicalizes to the
//! same string on the way back in.

use std::collections::BTreeMap;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

/// Everything except RFC 3986 unreserved characters is encoded.
const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Assemble the canonical request.
///
/// `uri` may be raw or already percent-encoded; see [`build_canonical_uri`].
#[must_use]
pub fn build_canonical_request(
    method: &str,
    uri: &str,
    query: &str,
    headers: &[(&str, &str)],
    signed_headers: &[&str],
    payload_hash: &str,
) -> String {
    format!(
        "{method}\n{}\n{}\n{}\n\n{}\n{payload_hash}",
        build_canonical_uri(uri),
        build_canonical_query_string(query),
        build_canonical_headers(headers, signed_headers),
        build_signed_headers_string(signed_headers),
    )
}

/// Canonical URI: every path segment percent-encoded, `/` kept.
///
/// Segments are decoded before encoding, so raw and encoded forms of the same
/// path canonicalize identically.
///
/// # Examples
///
/// ```
/// use bucketgate_auth::canonical::build_canonical_uri;
///
/// assert_eq!(build_canonical_uri(""), "/");
/// assert_eq!(build_canonical_uri("/b1/a b.txt"), "/b1/a%20b.txt");
/// assert_eq!(build_canonical_uri("/b1/a%20b.txt"), "/b1/a%20b.txt");
/// ```
#[must_use]
pub fn build_canonical_uri(path: &str) -> String {
    if path.is_empty() || path == "/" {
        return "/".to_owned();
    }
    path.split('/')
        .map(|segment| encode_component(&percent_decode_str(segment).decode_utf8_lossy()))
        .collect::<Vec<_>>()
        .join("/")
}

/// Percent-encode a raw object path for use in a URL, keeping `/`.
///
/// Unlike [`build_canonical_uri`] nothing is decoded first, so a key that
/// contains a literal `%` survives.
#[must_use]
pub fn encode_path(path: &str) -> String {
    path.split('/')
        .map(encode_component)
        .collect::<Vec<_>>()
        .join("/")
}

/// Percent-encode a single query or path component.
///
/// ```
/// use bucketgate_auth::canonical::encode_component;
///
/// assert_eq!(encode_component("AKID/20130524/us-east-1/s3/aws4_request"),
///            "AKID%2F20130524%2Fus-east-1%2Fs3%2Faws4_request");
/// ```
#[must_use]
pub fn encode_component(input: &str) -> String {
    utf8_percent_encode(input, UNRESERVED).to_string()
}

/// Canonical query string: `key=value` pairs sorted by key then value.
///
/// Values are taken as they appear in the request, without re-encoding.
#[must_use]
pub fn build_canonical_query_string(query: &str) -> String {
    let mut params: Vec<(&str, &str)> = query
        .split('&')
        .filter(|s| !s.is_empty())
        .map(|param| param.split_once('=').unwrap_or((param, "")))
        .collect();
    params.sort_unstable();

    params
        .into_iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Canonical headers: the signed headers only, lowercased, sorted, values
/// trimmed with inner whitespace runs collapsed. Repeated headers are joined
/// with `,`. No trailing newline.
#[must_use]
pub fn build_canonical_headers(headers: &[(&str, &str)], signed_headers: &[&str]) -> String {
    let mut values: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let value = collapse_whitespace(value.trim());
        values
            .entry(name.to_lowercase())
            .and_modify(|existing| {
                existing.push(',');
                existing.push_str(&value);
            })
            .or_insert(value);
    }

    let mut names = signed_headers.to_vec();
    names.sort_unstable();
    names
        .into_iter()
        .filter_map(|name| values.get(name).map(|value| format!("{name}:{value}")))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `host;x-amz-date` style list of signed header names, sorted.
#[must_use]
pub fn build_signed_headers_string(signed_headers: &[&str]) -> String {
    let mut names = signed_headers.to_vec();
    names.sort_unstable();
    names.join(";")
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
