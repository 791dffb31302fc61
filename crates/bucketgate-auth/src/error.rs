//! Error types for presigning and presigned URL verification.

use bucketgate_core::{GatewayError, GatewayErrorKind};

/// Errors raised while signing or verifying a presigned URL.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// A required `X-Amz-*` query parameter is absent.
    #[error("Missing required query parameter: {0}")]
    MissingQueryParam(String),

    /// A query parameter is present but cannot be parsed.
    #[error("Invalid query parameter: {0}")]
    InvalidQueryParam(String),

    /// Only `AWS4-HMAC-SHA256` is supported.
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The credential is not `AKID/date/region/service/aws4_request`.
    #[error("Invalid credential format")]
    InvalidCredential,

    /// A header named in `X-Amz-SignedHeaders` is missing from the request.
    #[error("Missing required header: {0}")]
    MissingHeader(String),

    /// The access key is unknown to the credential provider.
    #[error("Access key not found: {0}")]
    AccessKeyNotFound(String),

    /// The recomputed signature differs from the one in the URL.
    #[error("Signature does not match")]
    SignatureDoesNotMatch,

    /// `X-Amz-Date` + `X-Amz-Expires` lies in the past.
    #[error("Request has expired")]
    RequestExpired,

    /// The validity window is outside `1..=604800` seconds.
    #[error("Expiry must be between 1 and 604800 seconds, got {0}")]
    InvalidExpiry(i64),

    /// The endpoint is not an absolute `http(s)` URL with a host.
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

impl From<AuthError> for GatewayError {
    fn from(err: AuthError) -> Self {
        let kind = match err {
            AuthError::AccessKeyNotFound(_)
            | AuthError::SignatureDoesNotMatch
            | AuthError::RequestExpired => GatewayErrorKind::AccessDenied,
            _ => GatewayErrorKind::InvalidRequest,
        };
        Self::new(kind, err.to_string())
    }
}
