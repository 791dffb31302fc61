//! Presigned URL generation.
//!
//! A presigned URL carries its authentication in the query string:
//!
//! - `X-Amz-Algorithm` - always `AWS4-HMAC-SHA256`
//! - `X-Amz-Credential` - `AKID/date/region/s3/aws4_request`
//! - `X-Amz-Date` - signing time, `YYYYMMDDTHHMMSSZ`
//! - `X-Amz-Expires` - validity in seconds
//! - `X-Amz-SignedHeaders` - always `host`
//! - `X-Amz-Signature` - hex signature over everything above
//!
//! The payload is never signed (`UNSIGNED-PAYLOAD`).

use chrono::{DateTime, Utc};
use http::Method;
use tracing::debug;
use typed_builder::TypedBuilder;
use url::Url;

use crate::canonical::{build_canonical_request, encode_component, encode_path};
use crate::credentials::Credentials;
use crate::error::AuthError;
use crate::sigv4::{
    ALGORITHM, DATE_FORMAT, SERVICE, TIMESTAMP_FORMAT, UNSIGNED_PAYLOAD, build_string_to_sign,
    compute_signature, credential_scope, derive_signing_key, hash_payload,
};

/// Longest validity SigV4 accepts: seven days.
pub const MAX_PRESIGN_EXPIRY_SECS: i64 = 7 * 24 * 60 * 60;

/// Everything needed to presign one request.
#[derive(Debug, Clone, TypedBuilder)]
pub struct PresignRequest {
    /// HTTP method the URL is valid for.
    #[builder(default = Method::GET)]
    pub method: Method,
    /// Base endpoint, e.g. `http://127.0.0.1:9000`.
    #[builder(setter(into))]
    pub endpoint: String,
    /// Raw (unencoded) path below the endpoint, starting with `/`.
    #[builder(setter(into))]
    pub path: String,
    /// Signing region.
    #[builder(setter(into), default = "us-east-1".to_owned())]
    pub region: String,
    /// Signing key pair.
    pub credentials: Credentials,
    /// Signing time.
    pub signed_at: DateTime<Utc>,
    /// Validity in seconds after `signed_at`.
    pub expires_in: i64,
}

/// Produce a presigned URL.
///
/// # Errors
///
/// [`AuthError::InvalidExpiry`] when `expires_in` is outside
/// `1..=604800`; [`AuthError::InvalidEndpoint`] when the endpoint cannot be
/// parsed or has no host.
///
/// # Examples
///
/// ```
/// use bucketgate_auth::{Credentials, PresignRequest, presign_url};
///
/// let request = PresignRequest::builder()
///     .endpoint("http://127.0.0.1:9000")
///     .path("/photos/cat.png")
///     .credentials(Credentials::new("minioadmin", "minioadmin"))
///     .signed_at(chrono::Utc::now())
///     .expires_in(3600)
///     .build();
/// let url = presign_url(&request).unwrap();
/// assert!(url.starts_with("http://127.0.0.1:9000/photos/cat.png?X-Amz-Algorithm="));
/// assert!(url.contains("X-Amz-Expires=3600"));
/// ```
pub fn presign_url(request: &PresignRequest) -> Result<String, AuthError> {
    if !(1..=MAX_PRESIGN_EXPIRY_SECS).contains(&request.expires_in) {
        return Err(AuthError::InvalidExpiry(request.expires_in));
    }

    let endpoint = Url::parse(&request.endpoint)
        .map_err(|e| AuthError::InvalidEndpoint(format!("{}: {e}", request.endpoint)))?;
    let host = host_header(&endpoint)
        .ok_or_else(|| AuthError::InvalidEndpoint(request.endpoint.clone()))?;
    let path = format!(
        "{}{}",
        endpoint.path().trim_end_matches('/'),
        encode_path(&request.path)
    );

    let timestamp = request.signed_at.format(TIMESTAMP_FORMAT).to_string();
    let date = request.signed_at.format(DATE_FORMAT).to_string();
    let scope = credential_scope(&date, &request.region, SERVICE);
    let credential = format!("{}/{scope}", request.credentials.access_key);

    // Already in canonical (sorted) order.
    let query = [
        ("X-Amz-Algorithm", ALGORITHM.to_owned()),
        ("X-Amz-Credential", credential),
        ("X-Amz-Date", timestamp.clone()),
        ("X-Amz-Expires", request.expires_in.to_string()),
        ("X-Amz-SignedHeaders", "host".to_owned()),
    ]
    .iter()
    .map(|(k, v)| format!("{k}={}", encode_component(v)))
    .collect::<Vec<_>>()
    .join("&");

    let canonical_request = build_canonical_request(
        request.method.as_str(),
        &path,
        &query,
        &[("host", &host)],
        &["host"],
        UNSIGNED_PAYLOAD,
    );
    let string_to_sign = build_string_to_sign(
        &timestamp,
        &scope,
        &hash_payload(canonical_request.as_bytes()),
    );
    let signing_key = derive_signing_key(
        &request.credentials.secret_key,
        &date,
        &request.region,
        SERVICE,
    );
    let signature = compute_signature(&signing_key, &string_to_sign);

    debug!(
        method = %request.method,
        host = %host,
        path = %path,
        expires_in = request.expires_in,
        "presigned request"
    );

    Ok(format!(
        "{}://{host}{path}?{query}&X-Amz-Signature={signature}",
        endpoint.scheme()
    ))
}

/// The `Host` header a client sends for this endpoint: the host, plus the
/// port when it is not the scheme default.
fn host_header(endpoint: &Url) -> Option<String> {
    let host = endpoint.host_str()?;
    Some(match endpoint.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_owned(),
    })
}
