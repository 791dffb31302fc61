//! Public-path registry operations.

use tracing::debug;

use bucketgate_core::GatewayResult;

use crate::client::StorageClient;
use crate::gateway::StorageGateway;

impl<G: StorageGateway + ?Sized> StorageClient<G> {
    /// Replace the public-path patterns of a bucket.
    ///
    /// This only changes how URLs are resolved locally; no bucket policy is
    /// written.
    pub fn set_public_paths<S: Into<String>>(
        &self,
        bucket: Option<&str>,
        patterns: impl IntoIterator<Item = S>,
    ) -> GatewayResult<()> {
        let bucket = self.bucket(bucket)?;
        self.registry().set(bucket, patterns);
        debug!(bucket, "public paths replaced");
        Ok(())
    }

    /// The public-path patterns of a bucket.
    pub fn public_paths(&self, bucket: Option<&str>) -> GatewayResult<Vec<String>> {
        Ok(self.registry().get(self.bucket(bucket)?))
    }

    /// Whether `path` is covered by one of the bucket's public patterns.
    pub fn is_public(&self, bucket: Option<&str>, path: &str) -> GatewayResult<bool> {
        Ok(self.resolver.is_public(self.bucket(bucket)?, path))
    }
}
