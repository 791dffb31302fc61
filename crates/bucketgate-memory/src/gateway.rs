//! The in-memory [`StorageGateway`].

use std::fmt;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use dashmap::mapref::one::Ref;
use tracing::{debug, info};

use bucketgate_access::{
    BucketSummary, GetObjectCommand, ListObjectsRequest, ObjectLocation, ObjectPage,
    StorageGateway,
};
use bucketgate_auth::canonical::encode_path;
use bucketgate_auth::{
    Credentials, PresignRequest, PresignedIdentity, StaticCredentialProvider, presign_url,
    verify_presigned_url,
};
use bucketgate_core::validation::{validate_bucket_name, validate_object_key};
use bucketgate_core::{GateConfig, GatewayError, GatewayResult};

use crate::bucket::{MemoryBucket, StoredObject};

/// An S3-compatible gateway that keeps everything in process memory.
///
/// URLs point at the configured endpoint with path-style addressing, and
/// presigned URLs are real SigV4 URLs signed with the configured key pair,
/// so [`InMemoryGateway::verify_presigned_request`] (or any S3 server with the
/// same credentials) accepts them.
pub struct InMemoryGateway {
    config: GateConfig,
    credentials: StaticCredentialProvider,
    buckets: DashMap<String, MemoryBucket>,
}

impl fmt::Debug for InMemoryGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryGateway")
            .field("endpoint", &self.config.endpoint)
            .field("bucket_count", &self.buckets.len())
            .finish_non_exhaustive()
    }
}

impl Default for InMemoryGateway {
    fn default() -> Self {
        Self::new(GateConfig::default())
    }
}

impl InMemoryGateway {
    /// Create an empty gateway.
    #[must_use]
    pub fn new(config: GateConfig) -> Self {
        let credentials = StaticCredentialProvider::from(Credentials::new(
            config.access_key.clone(),
            config.secret_key.clone(),
        ));
        Self {
            config,
            credentials,
            buckets: DashMap::new(),
        }
    }

    /// The configuration this gateway signs and builds URLs with.
    #[must_use]
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Whether a bucket exists.
    #[must_use]
    pub fn bucket_exists(&self, bucket: &str) -> bool {
        self.buckets.contains_key(bucket)
    }

    /// Check a presigned GET URL the way an S3 server would at `now`.
    pub fn verify_presigned_request(
        &self,
        url: &str,
        now: DateTime<Utc>,
    ) -> GatewayResult<PresignedIdentity> {
        Ok(verify_presigned_url(
            &http::Method::GET,
            url,
            &self.credentials,
            now,
        )?)
    }

    /// Remove every bucket.
    pub fn reset(&self) {
        debug!("resetting in-memory gateway");
        self.buckets.clear();
    }

    fn bucket(&self, name: &str) -> GatewayResult<Ref<'_, String, MemoryBucket>> {
        self.buckets
            .get(name)
            .ok_or_else(|| GatewayError::no_such_bucket(name))
    }
}

impl StorageGateway for InMemoryGateway {
    fn create_bucket(&self, bucket: &str) -> GatewayResult<()> {
        validate_bucket_name(bucket)?;
        match self.buckets.entry(bucket.to_owned()) {
            Entry::Occupied(_) => Err(GatewayError::bucket_already_owned(bucket)),
            Entry::Vacant(entry) => {
                entry.insert(MemoryBucket::new(Utc::now()));
                info!(bucket, "bucket created");
                Ok(())
            }
        }
    }

    fn delete_bucket(&self, bucket: &str) -> GatewayResult<()> {
        if self.buckets.remove_if(bucket, |_, b| b.is_empty()).is_none() {
            return Err(if self.bucket_exists(bucket) {
                GatewayError::bucket_not_empty(bucket)
            } else {
                GatewayError::no_such_bucket(bucket)
            });
        }
        info!(bucket, "bucket deleted");
        Ok(())
    }

    fn list_buckets(&self) -> GatewayResult<Vec<BucketSummary>> {
        let mut buckets: Vec<BucketSummary> = self
            .buckets
            .iter()
            .map(|entry| BucketSummary {
                name: entry.key().clone(),
                creation_date: entry.value().creation_date,
            })
            .collect();
        buckets.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(buckets)
    }

    fn get_bucket_policy(&self, bucket: &str) -> GatewayResult<String> {
        self.bucket(bucket)?
            .policy()
            .ok_or_else(|| GatewayError::no_such_bucket_policy(bucket))
    }

    fn put_bucket_policy(&self, bucket: &str, policy: &str) -> GatewayResult<()> {
        let bucket_ref = self.bucket(bucket)?;
        serde_json::from_str::<serde_json::Value>(policy)?;
        bucket_ref.set_policy(Some(policy.to_owned()));
        debug!(bucket, "bucket policy stored");
        Ok(())
    }

    fn delete_bucket_policy(&self, bucket: &str) -> GatewayResult<()> {
        self.bucket(bucket)?.set_policy(None);
        Ok(())
    }

    fn put_object(&self, bucket: &str, key: &str, body: Bytes) -> GatewayResult<String> {
        validate_object_key(key)?;
        let size = body.len();
        let etag = self
            .bucket(bucket)?
            .put(key, StoredObject::new(body, Utc::now()));
        debug!(bucket, key, size, %etag, "object stored");
        Ok(etag)
    }

    fn get_object(&self, bucket: &str, key: &str) -> GatewayResult<Bytes> {
        self.bucket(bucket)?
            .get(key)
            .map(|object| object.body)
            .ok_or_else(|| GatewayError::no_such_key(key))
    }

    fn delete_object(&self, bucket: &str, key: &str) -> GatewayResult<()> {
        let removed = self.bucket(bucket)?.remove(key);
        debug!(bucket, key, removed, "object deleted");
        Ok(())
    }

    fn delete_objects(&self, bucket: &str, keys: &[String]) -> GatewayResult<()> {
        let removed = self.bucket(bucket)?.remove_many(keys);
        debug!(bucket, requested = keys.len(), removed, "objects deleted");
        Ok(())
    }

    fn copy_object(&self, source: &ObjectLocation, target: &ObjectLocation) -> GatewayResult<()> {
        validate_object_key(&target.key)?;
        let object = self
            .bucket(&source.bucket)?
            .get(&source.key)
            .ok_or_else(|| GatewayError::no_such_key(&source.key))?;
        self.bucket(&target.bucket)?
            .put(&target.key, StoredObject::new(object.body, Utc::now()));
        debug!(
            source_bucket = %source.bucket,
            source_key = %source.key,
            target_bucket = %target.bucket,
            target_key = %target.key,
            "object copied"
        );
        Ok(())
    }

    fn list_objects(&self, request: &ListObjectsRequest) -> GatewayResult<ObjectPage> {
        Ok(self.bucket(&request.bucket)?.list(request))
    }

    fn presign(
        &self,
        command: &GetObjectCommand,
        signed_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> GatewayResult<String> {
        let request = PresignRequest::builder()
            .endpoint(self.config.endpoint.as_str())
            .path(format!("/{}/{}", command.bucket, command.key))
            .region(self.config.region.as_str())
            .credentials(Credentials::new(
                self.config.access_key.clone(),
                self.config.secret_key.clone(),
            ))
            .signed_at(signed_at)
            .expires_in((expires_at - signed_at).num_seconds())
            .build();
        Ok(presign_url(&request)?)
    }

    fn plain_url(&self, bucket: &str, key: &str) -> String {
        format!(
            "{}{}",
            self.config.endpoint.trim_end_matches('/'),
            encode_path(&format!("/{bucket}/{key}"))
        )
    }
}
