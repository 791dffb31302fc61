//! Gateway error domain.
//!
//! Every storage gateway operation returns a [`GatewayResult`]. A failure is
//! a [`GatewayError`] carrying a [`GatewayErrorKind`], the HTTP status code
//! the backend answered with (or would have answered with), and a
//! human-readable message. The error travels with the call that produced it;
//! nothing is stashed on the client for a later "last error" query.
//!
//! # Usage
//!
//! ```
//! use bucketgate_core::{GatewayError, GatewayErrorKind};
//!
//! let err = GatewayError::no_such_bucket("photos");
//! assert_eq!(err.kind(), GatewayErrorKind::NoSuchBucket);
//! assert_eq!(err.status(), 404);
//! ```

use std::fmt;

/// Category of a gateway failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayErrorKind {
    /// The specified bucket does not exist.
    NoSuchBucket,
    /// The specified key does not exist.
    NoSuchKey,
    /// The bucket has no policy attached.
    NoSuchBucketPolicy,
    /// The bucket already exists and is owned by the caller.
    BucketAlreadyOwnedByYou,
    /// The bucket still holds objects.
    BucketNotEmpty,
    /// The bucket name violates the naming rules.
    InvalidBucketName,
    /// The request is malformed or missing a required value.
    InvalidRequest,
    /// The stored or submitted policy is not valid JSON.
    MalformedPolicy,
    /// The backend refused the credentials or the operation.
    AccessDenied,
    /// Any other backend failure.
    Internal,
}

impl GatewayErrorKind {
    /// The HTTP status code conventionally paired with this kind.
    #[must_use]
    pub fn default_status(self) -> u16 {
        match self {
            Self::NoSuchBucket | Self::NoSuchKey | Self::NoSuchBucketPolicy => 404,
            Self::BucketAlreadyOwnedByYou | Self::BucketNotEmpty => 409,
            Self::InvalidBucketName | Self::InvalidRequest | Self::MalformedPolicy => 400,
            Self::AccessDenied => 403,
            Self::Internal => 500,
        }
    }

    /// The S3 error code string for this kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoSuchBucket => "NoSuchBucket",
            Self::NoSuchKey => "NoSuchKey",
            Self::NoSuchBucketPolicy => "NoSuchBucketPolicy",
            Self::BucketAlreadyOwnedByYou => "BucketAlreadyOwnedByYou",
            Self::BucketNotEmpty => "BucketNotEmpty",
            Self::InvalidBucketName => "InvalidBucketName",
            Self::InvalidRequest => "InvalidRequest",
            Self::MalformedPolicy => "MalformedPolicy",
            Self::AccessDenied => "AccessDenied",
            Self::Internal => "InternalError",
        }
    }
}

impl fmt::Display for GatewayErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured failure reported by a storage gateway.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} ({status}): {message}")]
pub struct GatewayError {
    kind: GatewayErrorKind,
    status: u16,
    message: String,
}

impl GatewayError {
    /// Create an error with the kind's conventional status code.
    pub fn new(kind: GatewayErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: kind.default_status(),
            message: message.into(),
        }
    }

    /// Create an error with an explicit status code, as reported by a backend.
    pub fn with_status(kind: GatewayErrorKind, status: u16, message: impl Into<String>) -> Self {
        Self {
            kind,
            status,
            message: message.into(),
        }
    }

    /// The failure category.
    #[must_use]
    pub fn kind(&self) -> GatewayErrorKind {
        self.kind
    }

    /// The numeric status code.
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    /// The human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    // -----------------------------------------------------------------------
    // Constructors for the common cases
    // -----------------------------------------------------------------------

    /// The specified bucket does not exist.
    pub fn no_such_bucket(bucket: &str) -> Self {
        Self::new(
            GatewayErrorKind::NoSuchBucket,
            format!("The specified bucket does not exist: {bucket}"),
        )
    }

    /// The specified key does not exist.
    pub fn no_such_key(key: &str) -> Self {
        Self::new(
            GatewayErrorKind::NoSuchKey,
            format!("The specified key does not exist: {key}"),
        )
    }

    /// The bucket has no policy.
    pub fn no_such_bucket_policy(bucket: &str) -> Self {
        Self::new(
            GatewayErrorKind::NoSuchBucketPolicy,
            format!("The bucket policy does not exist: {bucket}"),
        )
    }

    /// The bucket already exists and belongs to the caller.
    pub fn bucket_already_owned(bucket: &str) -> Self {
        Self::new(
            GatewayErrorKind::BucketAlreadyOwnedByYou,
            format!(
                "Your previous request to create the named bucket succeeded and you already own it: {bucket}"
            ),
        )
    }

    /// The bucket is not empty and cannot be deleted.
    pub fn bucket_not_empty(bucket: &str) -> Self {
        Self::new(
            GatewayErrorKind::BucketNotEmpty,
            format!("The bucket you tried to delete is not empty: {bucket}"),
        )
    }

    /// No bucket was given and no default bucket is configured.
    #[must_use]
    pub fn bucket_not_set() -> Self {
        Self::new(GatewayErrorKind::InvalidRequest, "need to set bucket")
    }

    /// A request argument is invalid.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::InvalidRequest, message)
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(
            GatewayErrorKind::MalformedPolicy,
            format!("policies must be valid JSON: {err}"),
        )
    }
}

/// Convenience result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;
