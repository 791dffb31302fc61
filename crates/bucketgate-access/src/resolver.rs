//! Public vs presigned URL resolution.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use bucketgate_core::{DEFAULT_URL_EXPIRY_SECS, GatewayError, GatewayResult};

use crate::gateway::{GetObjectCommand, StorageGateway};
use crate::registry::PublicPathRegistry;

/// How a resolved URL grants access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlAccess {
    /// The object is public; the URL never expires.
    Public,
    /// A presigned URL, valid until `expires_at`.
    Signed {
        /// End of validity.
        expires_at: DateTime<Utc>,
    },
}

/// A URL handed to a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUrl {
    /// The URL itself.
    pub url: String,
    /// Which branch produced it.
    pub access: UrlAccess,
}

impl ResolvedUrl {
    /// Whether this is a plain public URL.
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.access == UrlAccess::Public
    }

    /// Expiry of a signed URL.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        match self.access {
            UrlAccess::Public => None,
            UrlAccess::Signed { expires_at } => Some(expires_at),
        }
    }
}

impl fmt::Display for ResolvedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Decides per object whether to hand out a plain or a presigned URL.
///
/// Objects matched by a public-path pattern get the gateway's plain URL;
/// everything else is presigned, by default for 24 hours.
pub struct AccessResolver<G: ?Sized> {
    registry: Arc<PublicPathRegistry>,
    gateway: Arc<G>,
    default_ttl: Duration,
}

impl<G: ?Sized> fmt::Debug for AccessResolver<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessResolver")
            .field("registry", &self.registry)
            .field("default_ttl", &self.default_ttl)
            .finish_non_exhaustive()
    }
}

impl<G: ?Sized> Clone for AccessResolver<G> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            gateway: Arc::clone(&self.gateway),
            default_ttl: self.default_ttl,
        }
    }
}

impl<G: StorageGateway + ?Sized> AccessResolver<G> {
    /// Create a resolver with the default 24 hour TTL.
    pub fn new(registry: Arc<PublicPathRegistry>, gateway: Arc<G>) -> Self {
        Self {
            registry,
            gateway,
            default_ttl: ttl_from_secs(DEFAULT_URL_EXPIRY_SECS),
        }
    }

    /// Override how long presigned URLs stay valid when no expiry is given.
    #[must_use]
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// [`with_default_ttl`](Self::with_default_ttl) in whole seconds.
    #[must_use]
    pub fn with_default_ttl_secs(self, secs: u64) -> Self {
        self.with_default_ttl(ttl_from_secs(secs))
    }

    /// The TTL applied when no expiry is given.
    #[must_use]
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// The registry consulted for public paths.
    #[must_use]
    pub fn registry(&self) -> &Arc<PublicPathRegistry> {
        &self.registry
    }

    /// Whether `path` in `bucket` is covered by a public pattern.
    #[must_use]
    pub fn is_public(&self, bucket: &str, path: &str) -> bool {
        self.registry.is_public(bucket, path)
    }

    /// Resolve a URL for `path`, using the current time.
    pub fn resolve_url(
        &self,
        bucket: &str,
        path: &str,
        expires_at: Option<DateTime<Utc>>,
    ) -> GatewayResult<ResolvedUrl> {
        self.resolve_url_at(bucket, path, expires_at, Utc::now())
    }

    /// Resolve a URL for `path` as of `now`.
    ///
    /// Public objects get the plain URL and `expires_at` is ignored. Private
    /// objects get a URL presigned at `now`, valid until `expires_at` or
    /// `now + default_ttl`.
    pub fn resolve_url_at(
        &self,
        bucket: &str,
        path: &str,
        expires_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> GatewayResult<ResolvedUrl> {
        if self.is_public(bucket, path) {
            debug!(bucket, path, "resolved public url");
            return Ok(ResolvedUrl {
                url: self.gateway.plain_url(bucket, path),
                access: UrlAccess::Public,
            });
        }

        let expires_at = self.effective_expiry(expires_at, now)?;
        let command = GetObjectCommand::new(bucket, path);
        let url = self.gateway.presign(&command, now, expires_at)?;
        debug!(bucket, path, %expires_at, "resolved presigned url");
        Ok(ResolvedUrl {
            url,
            access: UrlAccess::Signed { expires_at },
        })
    }

    /// Always presign, ignoring public patterns.
    pub fn presigned_url_at(
        &self,
        bucket: &str,
        path: &str,
        expires_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> GatewayResult<ResolvedUrl> {
        let expires_at = self.effective_expiry(expires_at, now)?;
        let url = self
            .gateway
            .presign(&GetObjectCommand::new(bucket, path), now, expires_at)?;
        Ok(ResolvedUrl {
            url,
            access: UrlAccess::Signed { expires_at },
        })
    }

    fn effective_expiry(
        &self,
        expires_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> GatewayResult<DateTime<Utc>> {
        match expires_at {
            Some(at) => Ok(at),
            None => now.checked_add_signed(self.default_ttl).ok_or_else(|| {
                GatewayError::invalid_request(format!(
                    "default url ttl {} overflows the clock",
                    self.default_ttl
                ))
            }),
        }
    }
}

/// Seconds to a [`Duration`], saturating at [`Duration::MAX`].
fn ttl_from_secs(secs: u64) -> Duration {
    i64::try_from(secs)
        .ok()
        .and_then(Duration::try_seconds)
        .unwrap_or(Duration::MAX)
}
