//! End-to-end tests for BucketGate.
//!
//! Everything runs through [`StorageClient`] over an [`InMemoryGateway`], so
//! no object store is needed:
//! ```text
//! cargo test -p bucketgate-integration
//! ```

use std::sync::{Arc, Once};

use bucketgate_access::StorageClient;
use bucketgate_core::GateConfig;
use bucketgate_memory::InMemoryGateway;

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Generate a unique bucket name for a test.
#[must_use]
pub fn test_bucket_name(prefix: &str) -> String {
    let id = uuid::Uuid::new_v4().to_string()[..8].to_owned();
    format!("test-{prefix}-{id}")
}

/// Configuration pointing at a fake MinIO endpoint with `bucket` as default.
#[must_use]
pub fn test_config(bucket: &str) -> GateConfig {
    GateConfig::builder()
        .endpoint("http://minio.local:9000".to_owned())
        .access_key("integration".to_owned())
        .secret_key("integration-secret".to_owned())
        .bucket(bucket.to_owned())
        .build()
}

/// A client over a fresh in-memory gateway whose default bucket already
/// exists. Returns the bucket name too.
#[must_use]
pub fn client_with_bucket(prefix: &str) -> (StorageClient<InMemoryGateway>, String) {
    init_tracing();

    let bucket = test_bucket_name(prefix);
    let config = test_config(&bucket);
    let client = StorageClient::from_shared(Arc::new(InMemoryGateway::new(config.clone())), &config);
    client
        .create_bucket(None)
        .unwrap_or_else(|e| panic!("failed to create bucket {bucket}: {e}"));
    (client, bucket)
}

mod test_object;
mod test_policy;
mod test_url;
