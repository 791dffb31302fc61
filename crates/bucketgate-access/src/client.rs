//! The storage client facade.
//!
//! [`StorageClient`] ties a [`StorageGateway`] to a default bucket, a shared
//! [`PublicPathRegistry`], and an [`AccessResolver`]. Individual operations
//! live in the [`crate::ops`] submodules as `impl StorageClient` blocks.

use std::fmt;
use std::sync::Arc;

use bucketgate_core::{GateConfig, GatewayError, GatewayResult};

use crate::gateway::StorageGateway;
use crate::registry::PublicPathRegistry;
use crate::resolver::AccessResolver;

/// High-level access to buckets, objects, policies, and URLs.
///
/// Every operation takes `bucket: Option<&str>`; `None` (or an empty name)
/// falls back to the configured default bucket.
pub struct StorageClient<G: ?Sized> {
    pub(crate) gateway: Arc<G>,
    pub(crate) default_bucket: String,
    pub(crate) resolver: AccessResolver<G>,
}

impl<G: ?Sized> fmt::Debug for StorageClient<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageClient")
            .field("default_bucket", &self.default_bucket)
            .field("resolver", &self.resolver)
            .finish_non_exhaustive()
    }
}

impl<G: StorageGateway> StorageClient<G> {
    /// Create a client owning `gateway`.
    pub fn new(gateway: G, config: &GateConfig) -> Self {
        Self::from_shared(Arc::new(gateway), config)
    }
}

impl<G: StorageGateway + ?Sized> StorageClient<G> {
    /// Create a client over a shared gateway.
    pub fn from_shared(gateway: Arc<G>, config: &GateConfig) -> Self {
        let resolver = AccessResolver::new(Arc::new(PublicPathRegistry::new()), Arc::clone(&gateway))
            .with_default_ttl_secs(config.url_expiry_secs);
        Self {
            gateway,
            default_bucket: config.bucket.clone(),
            resolver,
        }
    }

    /// Use `registry` for public-path decisions, e.g. one shared with other
    /// clients or seeded at startup.
    #[must_use]
    pub fn with_registry(mut self, registry: Arc<PublicPathRegistry>) -> Self {
        self.resolver = AccessResolver::new(registry, Arc::clone(&self.gateway))
            .with_default_ttl(self.resolver.default_ttl());
        self
    }

    /// Change the default bucket.
    #[must_use]
    pub fn with_default_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.default_bucket = bucket.into();
        self
    }

    /// The default bucket; empty when unset.
    #[must_use]
    pub fn default_bucket(&self) -> &str {
        &self.default_bucket
    }

    /// The underlying gateway.
    #[must_use]
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// The public-path registry.
    #[must_use]
    pub fn registry(&self) -> &PublicPathRegistry {
        self.resolver.registry()
    }

    /// The URL resolver.
    #[must_use]
    pub fn resolver(&self) -> &AccessResolver<G> {
        &self.resolver
    }

    /// Pick the bucket for an operation.
    pub(crate) fn bucket<'a>(&'a self, bucket: Option<&'a str>) -> GatewayResult<&'a str> {
        match bucket.filter(|b| !b.is_empty()) {
            Some(bucket) => Ok(bucket),
            None if !self.default_bucket.is_empty() => Ok(&self.default_bucket),
            None => Err(GatewayError::bucket_not_set()),
        }
    }
}
