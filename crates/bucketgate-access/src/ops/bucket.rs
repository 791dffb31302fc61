//! Bucket lifecycle and policy operations.

use tracing::{debug, info};

use bucketgate_core::{GatewayError, GatewayErrorKind, GatewayResult};
use bucketgate_policy::{AccessPolicyDocument, PermissionSpecification, compile};

use crate::client::StorageClient;
use crate::gateway::{BucketSummary, StorageGateway};

/// Outcome of [`StorageClient::set_bucket_policies`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyUpdate {
    /// The compiled document was attached to the bucket.
    Applied(AccessPolicyDocument),
    /// The permission groups form no supported combination; the bucket was
    /// left untouched.
    Unchanged,
}

impl<G: StorageGateway + ?Sized> StorageClient<G> {
    /// Create a bucket.
    pub fn create_bucket(&self, bucket: Option<&str>) -> GatewayResult<()> {
        let bucket = self.bucket(bucket)?;
        self.gateway.create_bucket(bucket)?;
        info!(bucket, "bucket created");
        Ok(())
    }

    /// Delete an empty bucket.
    pub fn delete_bucket(&self, bucket: Option<&str>) -> GatewayResult<()> {
        let bucket = self.bucket(bucket)?;
        self.gateway.delete_bucket(bucket)?;
        info!(bucket, "bucket deleted");
        Ok(())
    }

    /// All buckets visible to the configured credentials.
    pub fn list_buckets(&self) -> GatewayResult<Vec<BucketSummary>> {
        self.gateway.list_buckets()
    }

    /// The bucket's policy, parsed.
    pub fn bucket_policy(&self, bucket: Option<&str>) -> GatewayResult<serde_json::Value> {
        let bucket = self.bucket(bucket)?;
        let raw = self.gateway.get_bucket_policy(bucket)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Compile `permissions` and attach the result to the bucket.
    ///
    /// An unsupported combination of groups (including no groups at all)
    /// yields [`PolicyUpdate::Unchanged`] without calling the gateway.
    pub fn set_bucket_policies(
        &self,
        bucket: Option<&str>,
        permissions: &PermissionSpecification,
    ) -> GatewayResult<PolicyUpdate> {
        let bucket = self.bucket(bucket)?;
        let Some(document) = compile(permissions, bucket) else {
            return Ok(PolicyUpdate::Unchanged);
        };

        let json = document
            .to_json()
            .map_err(|e| GatewayError::new(GatewayErrorKind::MalformedPolicy, e.to_string()))?;
        self.gateway.put_bucket_policy(bucket, &json)?;
        debug!(bucket, statements = document.statements.len(), "bucket policy applied");
        Ok(PolicyUpdate::Applied(document))
    }

    /// Detach the bucket policy.
    pub fn delete_bucket_policies(&self, bucket: Option<&str>) -> GatewayResult<()> {
        let bucket = self.bucket(bucket)?;
        self.gateway.delete_bucket_policy(bucket)?;
        debug!(bucket, "bucket policy deleted");
        Ok(())
    }
}
