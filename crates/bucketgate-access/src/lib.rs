//! Public-path registry, URL access resolution, and the storage client
//! facade for BucketGate.
//!
//! - [`StorageGateway`]: the seam every object-storage backend implements
//! - [`PublicPathRegistry`]: per-bucket public path patterns
//! - [`AccessResolver`]: picks a plain URL for public paths and a presigned
//!   one for everything else
//! - [`StorageClient`]: default-bucket handling plus bucket, policy, object,
//!   and URL operations (see [`ops`])
//!
//! # Usage
//!
//! ```
//! use bucketgate_access::PublicPathRegistry;
//!
//! let registry = PublicPathRegistry::new();
//! registry.set("assets", ["images/", "favicon.ico"]);
//! assert!(registry.is_public("assets", "images/logo.png"));
//! assert!(!registry.is_public("assets", "private/report.pdf"));
//! ```

mod client;
mod gateway;
mod matcher;
pub mod ops;
mod registry;
mod resolver;
#[cfg(test)]
mod testing;

pub use client::StorageClient;
pub use gateway::{
    BucketSummary, GetObjectCommand, ListObjectsRequest, MAX_LIST_KEYS, ObjectLocation,
    ObjectPage, ObjectSummary, StorageGateway,
};
pub use matcher::{WILDCARD, pattern_matches};
pub use ops::bucket::PolicyUpdate;
pub use registry::PublicPathRegistry;
pub use resolver::{AccessResolver, ResolvedUrl, UrlAccess};
