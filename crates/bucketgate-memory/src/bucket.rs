//! Per-bucket state.
//!
//! A [`MemoryBucket`] owns its objects and its policy. Both sit behind a
//! `parking_lot::RwLock`, so the gateway only ever needs a shared reference
//! into its bucket map.

use std::collections::BTreeMap;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use md5::{Digest, Md5};
use parking_lot::RwLock;

use bucketgate_access::{ListObjectsRequest, MAX_LIST_KEYS, ObjectPage, ObjectSummary};

/// A stored object body with its metadata.
#[derive(Debug, Clone)]
pub(crate) struct StoredObject {
    pub(crate) body: Bytes,
    pub(crate) etag: String,
    pub(crate) last_modified: DateTime<Utc>,
}

impl StoredObject {
    /// Wrap `body`, computing its quoted MD5 ETag.
    pub(crate) fn new(body: Bytes, now: DateTime<Utc>) -> Self {
        let etag = format!("\"{}\"", hex::encode(Md5::digest(&body)));
        Self {
            body,
            etag,
            last_modified: now,
        }
    }

    fn summary(&self, key: &str) -> ObjectSummary {
        ObjectSummary {
            key: key.to_owned(),
            size: self.body.len() as u64,
            last_modified: self.last_modified,
            etag: self.etag.clone(),
        }
    }
}

/// One bucket: objects in key order plus an optional policy document.
#[derive(Debug)]
pub(crate) struct MemoryBucket {
    pub(crate) creation_date: DateTime<Utc>,
    policy: RwLock<Option<String>>,
    objects: RwLock<BTreeMap<String, StoredObject>>,
}

impl MemoryBucket {
    pub(crate) fn new(creation_date: DateTime<Utc>) -> Self {
        Self {
            creation_date,
            policy: RwLock::new(None),
            objects: RwLock::new(BTreeMap::new()),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.objects.read().is_empty()
    }

    pub(crate) fn policy(&self) -> Option<String> {
        self.policy.read().clone()
    }

    pub(crate) fn set_policy(&self, policy: Option<String>) {
        *self.policy.write() = policy;
    }

    pub(crate) fn get(&self, key: &str) -> Option<StoredObject> {
        self.objects.read().get(key).cloned()
    }

    /// Store an object and return its ETag.
    pub(crate) fn put(&self, key: &str, object: StoredObject) -> String {
        let etag = object.etag.clone();
        self.objects.write().insert(key.to_owned(), object);
        etag
    }

    pub(crate) fn remove(&self, key: &str) -> bool {
        self.objects.write().remove(key).is_some()
    }

    /// Remove several keys under one lock; missing keys are ignored.
    pub(crate) fn remove_many(&self, keys: &[String]) -> usize {
        let mut objects = self.objects.write();
        keys.iter().filter(|k| objects.remove(k.as_str()).is_some()).count()
    }

    /// One page of keys that start with the request prefix and sort after
    /// its marker.
    pub(crate) fn list(&self, request: &ListObjectsRequest) -> ObjectPage {
        let limit = request.max_keys.min(MAX_LIST_KEYS);
        let objects = self.objects.read();
        let mut matching = objects
            .iter()
            .filter(|(key, _)| key.starts_with(&request.prefix))
            .filter(|(key, _)| request.marker.as_ref().is_none_or(|m| *key > m));

        let page: Vec<ObjectSummary> = matching
            .by_ref()
            .take(limit)
            .map(|(key, object)| object.summary(key))
            .collect();
        let is_truncated = matching.next().is_some();
        let next_marker = if is_truncated {
            page.last().map(|o| o.key.clone())
        } else {
            None
        };

        ObjectPage {
            objects: page,
            is_truncated,
            next_marker,
        }
    }
}
