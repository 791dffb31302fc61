//! In-memory storage gateway for BucketGate.
//!
//! [`InMemoryGateway`] implements
//! [`StorageGateway`](bucketgate_access::StorageGateway) over process memory:
//! buckets live in a `DashMap`, objects in a per-bucket `BTreeMap` so listings
//! come back in key order. It is useful for tests and for the CLI when no
//! object store is reachable. Presigned URLs are signed for real.
//!
//! ```
//! use bucketgate_access::StorageClient;
//! use bucketgate_core::GateConfig;
//! use bucketgate_memory::InMemoryGateway;
//!
//! let config = GateConfig::builder().bucket("photos".to_owned()).build();
//! let client = StorageClient::new(InMemoryGateway::new(config.clone()), &config);
//! client.create_bucket(None).unwrap();
//! client.put_object_by_content(None, "cat.png", "meow").unwrap();
//! assert_eq!(client.get_object(None, "cat.png").unwrap(), "meow");
//! ```

mod bucket;
mod gateway;

pub use gateway::InMemoryGateway;
