//! Configuration for BucketGate clients and gateways.
//!
//! Provides [`GateConfig`], describing where the object store lives, which
//! credentials sign URLs, and how long signed URLs stay valid. Values are
//! loaded from environment variables with the same names the MinIO and AWS
//! tooling use.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Default lifetime of a presigned URL: one day.
pub const DEFAULT_URL_EXPIRY_SECS: u64 = 24 * 60 * 60;

/// BucketGate configuration.
///
/// # Examples
///
/// ```
/// use bucketgate_core::GateConfig;
///
/// let config = GateConfig::default();
/// assert_eq!(config.endpoint, "http://127.0.0.1:9000");
/// assert_eq!(config.url_expiry_secs, 86_400);
/// ```
#[derive(Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct GateConfig {
    /// Base URL of the object store (path-style addressing is always used).
    #[builder(default = String::from("http://127.0.0.1:9000"))]
    pub endpoint: String,

    /// Region used in the SigV4 credential scope.
    #[builder(default = String::from("us-east-1"))]
    pub region: String,

    /// Access key ID used to sign URLs.
    #[builder(default = String::from("minioadmin"))]
    pub access_key: String,

    /// Secret access key used to sign URLs.
    #[builder(default = String::from("minioadmin"))]
    pub secret_key: String,

    /// Bucket used when an operation does not name one. Empty means unset.
    #[builder(default)]
    pub bucket: String,

    /// Lifetime of presigned URLs when the caller gives no explicit expiry.
    #[builder(default = DEFAULT_URL_EXPIRY_SECS)]
    pub url_expiry_secs: u64,

    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    pub log_level: String,
}

impl std::fmt::Debug for GateConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GateConfig")
            .field("endpoint", &self.endpoint)
            .field("region", &self.region)
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("bucket", &self.bucket)
            .field("url_expiry_secs", &self.url_expiry_secs)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl GateConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `S3_ENDPOINT_URL` | `http://127.0.0.1:9000` |
    /// | `DEFAULT_REGION` | `us-east-1` |
    /// | `ACCESS_KEY` or `AWS_ACCESS_KEY_ID` | `minioadmin` |
    /// | `SECRET_KEY` or `AWS_SECRET_ACCESS_KEY` | `minioadmin` |
    /// | `S3_BUCKET` | *(empty)* |
    /// | `URL_EXPIRE_SECONDS` | `86400` |
    /// | `LOG_LEVEL` | `info` |
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Unparseable numeric values fall back to their defaults.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(v) = lookup("S3_ENDPOINT_URL") {
            config.endpoint = v;
        }
        if let Some(v) = lookup("DEFAULT_REGION") {
            config.region = v;
        }
        if let Some(v) = lookup("ACCESS_KEY").or_else(|| lookup("AWS_ACCESS_KEY_ID")) {
            config.access_key = v;
        }
        if let Some(v) = lookup("SECRET_KEY").or_else(|| lookup("AWS_SECRET_ACCESS_KEY")) {
            config.secret_key = v;
        }
        if let Some(v) = lookup("S3_BUCKET") {
            config.bucket = v;
        }
        if let Some(v) = lookup("URL_EXPIRE_SECONDS") {
            if let Ok(n) = v.parse::<u64>() {
                config.url_expiry_secs = n;
            }
        }
        if let Some(v) = lookup("LOG_LEVEL") {
            config.log_level = v;
        }

        config
    }
}
