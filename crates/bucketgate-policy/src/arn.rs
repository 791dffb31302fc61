//! Amazon Resource Name helpers for S3 buckets and object prefixes.

/// ARN of a bucket: `arn:aws:s3:::<bucket>`.
#[must_use]
pub fn bucket_arn(bucket: &str) -> String {
    format!("arn:aws:s3:::{bucket}")
}

/// ARN covering every object under a prefix: `arn:aws:s3:::<bucket>/<prefix>*`.
#[must_use]
pub fn object_prefix_arn(bucket: &str, prefix: &str) -> String {
    format!("arn:aws:s3:::{bucket}/{prefix}*")
}
