//! The storage gateway seam.
//!
//! [`StorageGateway`] is everything BucketGate needs from an S3-compatible
//! backend. Implementations are synchronous and thread-safe; each call either
//! succeeds or returns a [`GatewayError`](bucketgate_core::GatewayError).

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use typed_builder::TypedBuilder;

use bucketgate_core::GatewayResult;

/// Most keys a single listing page may return.
pub const MAX_LIST_KEYS: usize = 1000;

/// A bucket as reported by `list_buckets`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketSummary {
    /// Bucket name.
    pub name: String,
    /// Creation time.
    pub creation_date: DateTime<Utc>,
}

/// An object as reported by a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectSummary {
    /// Object key.
    pub key: String,
    /// Size in bytes.
    pub size: u64,
    /// Last modification time.
    pub last_modified: DateTime<Utc>,
    /// Entity tag, quoted.
    pub etag: String,
}

/// Bucket plus key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectLocation {
    /// Bucket name.
    pub bucket: String,
    /// Object key.
    pub key: String,
}

impl ObjectLocation {
    /// Create a location.
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }
}

/// The object a presigned URL grants access to.
pub type GetObjectCommand = ObjectLocation;

/// One page of a prefix listing.
#[derive(Debug, Clone, TypedBuilder)]
pub struct ListObjectsRequest {
    /// Bucket to list.
    #[builder(setter(into))]
    pub bucket: String,
    /// Only keys starting with this prefix.
    #[builder(default, setter(into))]
    pub prefix: String,
    /// Only keys strictly after this one.
    #[builder(default, setter(strip_option, into))]
    pub marker: Option<String>,
    /// Page size, capped at [`MAX_LIST_KEYS`].
    #[builder(default = MAX_LIST_KEYS)]
    pub max_keys: usize,
}

/// Result of one listing call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectPage {
    /// Objects in key order.
    pub objects: Vec<ObjectSummary>,
    /// Whether more keys follow.
    pub is_truncated: bool,
    /// Marker for the next page when truncated.
    pub next_marker: Option<String>,
}

/// An S3-compatible storage backend.
pub trait StorageGateway: Send + Sync {
    /// Create a bucket.
    fn create_bucket(&self, bucket: &str) -> GatewayResult<()>;

    /// Delete an empty bucket.
    fn delete_bucket(&self, bucket: &str) -> GatewayResult<()>;

    /// All buckets, sorted by name.
    fn list_buckets(&self) -> GatewayResult<Vec<BucketSummary>>;

    /// The raw policy JSON attached to a bucket.
    fn get_bucket_policy(&self, bucket: &str) -> GatewayResult<String>;

    /// Attach a policy, replacing any previous one.
    fn put_bucket_policy(&self, bucket: &str, policy: &str) -> GatewayResult<()>;

    /// Remove the bucket policy.
    fn delete_bucket_policy(&self, bucket: &str) -> GatewayResult<()>;

    /// Store an object and return its ETag.
    fn put_object(&self, bucket: &str, key: &str, body: Bytes) -> GatewayResult<String>;

    /// Fetch an object body.
    fn get_object(&self, bucket: &str, key: &str) -> GatewayResult<Bytes>;

    /// Delete one object. Deleting a missing key succeeds.
    fn delete_object(&self, bucket: &str, key: &str) -> GatewayResult<()>;

    /// Delete several objects in one call.
    fn delete_objects(&self, bucket: &str, keys: &[String]) -> GatewayResult<()>;

    /// Server-side copy.
    fn copy_object(&self, source: &ObjectLocation, target: &ObjectLocation) -> GatewayResult<()>;

    /// One page of keys under a prefix.
    fn list_objects(&self, request: &ListObjectsRequest) -> GatewayResult<ObjectPage>;

    /// A time-limited URL for downloading an object, signed at `signed_at`
    /// and valid until `expires_at`.
    fn presign(
        &self,
        command: &GetObjectCommand,
        signed_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> GatewayResult<String>;

    /// The unsigned URL of an object.
    fn plain_url(&self, bucket: &str, key: &str) -> String;
}
