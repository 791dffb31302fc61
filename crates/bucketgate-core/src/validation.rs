//! Request validation shared by gateway implementations.
//!
//! Bucket names follow the
//! [Amazon S3 naming rules](https://docs.aws.amazon.com/AmazonS3/latest/userguide/bucketnamingrules.html),
//! which MinIO enforces as well.

use std::net::Ipv4Addr;

use crate::error::{GatewayError, GatewayErrorKind};

/// Minimum bucket name length.
const MIN_BUCKET_NAME_LEN: usize = 3;

/// Maximum bucket name length.
const MAX_BUCKET_NAME_LEN: usize = 63;

/// Maximum object key length in bytes.
const MAX_KEY_BYTES: usize = 1024;

/// Validate a bucket name.
///
/// Rules:
/// - 3-63 characters long
/// - Only lowercase letters, numbers, hyphens, and dots
/// - Must start and end with a letter or number
/// - No consecutive dots (`..`)
/// - Not formatted as an IPv4 address
/// - No `xn--` / `sthree-` prefix, no `-s3alias` suffix
///
/// # Errors
///
/// Returns a [`GatewayErrorKind::InvalidBucketName`] error naming the first
/// violated rule.
///
/// # Examples
///
/// ```
/// use bucketgate_core::validation::validate_bucket_name;
///
/// assert!(validate_bucket_name("my-valid-bucket").is_ok());
/// assert!(validate_bucket_name("AB").is_err());
/// ```
pub fn validate_bucket_name(name: &str) -> Result<(), GatewayError> {
    match bucket_name_violation(name) {
        None => Ok(()),
        Some(reason) => Err(GatewayError::new(
            GatewayErrorKind::InvalidBucketName,
            format!("Invalid bucket name: {name}: {reason}"),
        )),
    }
}

fn bucket_name_violation(name: &str) -> Option<&'static str> {
    let bytes = name.as_bytes();
    let alnum = |b: u8| b.is_ascii_lowercase() || b.is_ascii_digit();

    if !(MIN_BUCKET_NAME_LEN..=MAX_BUCKET_NAME_LEN).contains(&bytes.len()) {
        return Some("Bucket name must be between 3 and 63 characters long");
    }
    if !bytes.iter().all(|&b| alnum(b) || b == b'-' || b == b'.') {
        return Some("Bucket name must only contain lowercase letters, numbers, hyphens, and dots");
    }
    if !alnum(bytes[0]) || !alnum(bytes[bytes.len() - 1]) {
        return Some("Bucket name must start and end with a letter or number");
    }
    if name.contains("..") {
        return Some("Bucket name must not contain consecutive dots");
    }
    if name.parse::<Ipv4Addr>().is_ok() {
        return Some("Bucket name must not be formatted as an IP address");
    }
    if name.starts_with("xn--") || name.starts_with("sthree-") {
        return Some("Bucket name must not start with a reserved prefix");
    }
    if name.ends_with("-s3alias") {
        return Some("Bucket name must not end with '-s3alias'");
    }
    None
}

/// Validate an object key: 1-1024 bytes.
///
/// # Errors
///
/// Returns a [`GatewayErrorKind::InvalidRequest`] error if the key is empty or
/// too long.
pub fn validate_object_key(key: &str) -> Result<(), GatewayError> {
    if key.is_empty() {
        return Err(GatewayError::invalid_request("Object key must not be empty"));
    }
    if key.len() > MAX_KEY_BYTES {
        return Err(GatewayError::invalid_request("Your key is too long"));
    }
    Ok(())
}
