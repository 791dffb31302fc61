//! A gateway double that records calls.

use std::collections::BTreeMap;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use bucketgate_core::{GatewayError, GatewayResult};

use crate::gateway::{
    BucketSummary, GetObjectCommand, ListObjectsRequest, ObjectLocation, ObjectPage,
    ObjectSummary, StorageGateway,
};

type Presigned = (GetObjectCommand, DateTime<Utc>, DateTime<Utc>);

#[derive(Debug, Default)]
pub(crate) struct RecordingGateway {
    objects: Mutex<BTreeMap<(String, String), Bytes>>,
    policies: Mutex<BTreeMap<String, String>>,
    presigned: Mutex<Vec<Presigned>>,
    calls: Mutex<Vec<String>>,
}

impl RecordingGateway {
    pub(crate) fn presigned(&self) -> Vec<Presigned> {
        self.presigned.lock().clone()
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub(crate) fn policy(&self, bucket: &str) -> Option<String> {
        self.policies.lock().get(bucket).cloned()
    }

    pub(crate) fn keys(&self, bucket: &str) -> Vec<String> {
        self.objects
            .lock()
            .keys()
            .filter(|(b, _)| b == bucket)
            .map(|(_, k)| k.clone())
            .collect()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().push(call.into());
    }
}

impl StorageGateway for RecordingGateway {
    fn create_bucket(&self, bucket: &str) -> GatewayResult<()> {
        self.record(format!("create_bucket {bucket}"));
        Ok(())
    }

    fn delete_bucket(&self, bucket: &str) -> GatewayResult<()> {
        self.record(format!("delete_bucket {bucket}"));
        Ok(())
    }

    fn list_buckets(&self) -> GatewayResult<Vec<BucketSummary>> {
        self.record("list_buckets");
        Ok(Vec::new())
    }

    fn get_bucket_policy(&self, bucket: &str) -> GatewayResult<String> {
        self.record(format!("get_bucket_policy {bucket}"));
        self.policy(bucket)
            .ok_or_else(|| GatewayError::no_such_bucket_policy(bucket))
    }

    fn put_bucket_policy(&self, bucket: &str, policy: &str) -> GatewayResult<()> {
        self.record(format!("put_bucket_policy {bucket}"));
        self.policies
            .lock()
            .insert(bucket.to_owned(), policy.to_owned());
        Ok(())
    }

    fn delete_bucket_policy(&self, bucket: &str) -> GatewayResult<()> {
        self.record(format!("delete_bucket_policy {bucket}"));
        self.policies.lock().remove(bucket);
        Ok(())
    }

    fn put_object(&self, bucket: &str, key: &str, body: Bytes) -> GatewayResult<String> {
        self.record(format!("put_object {bucket}/{key}"));
        self.objects
            .lock()
            .insert((bucket.to_owned(), key.to_owned()), body);
        Ok("\"etag\"".to_owned())
    }

    fn get_object(&self, bucket: &str, key: &str) -> GatewayResult<Bytes> {
        self.objects
            .lock()
            .get(&(bucket.to_owned(), key.to_owned()))
            .cloned()
            .ok_or_else(|| GatewayError::no_such_key(key))
    }

    fn delete_object(&self, bucket: &str, key: &str) -> GatewayResult<()> {
        self.record(format!("delete_object {bucket}/{key}"));
        self.objects
            .lock()
            .remove(&(bucket.to_owned(), key.to_owned()));
        Ok(())
    }

    fn delete_objects(&self, bucket: &str, keys: &[String]) -> GatewayResult<()> {
        self.record(format!("delete_objects {bucket} {}", keys.join(",")));
        let mut objects = self.objects.lock();
        for key in keys {
            objects.remove(&(bucket.to_owned(), key.clone()));
        }
        Ok(())
    }

    fn copy_object(&self, source: &ObjectLocation, target: &ObjectLocation) -> GatewayResult<()> {
        self.record(format!(
            "copy_object {}/{} {}/{}",
            source.bucket, source.key, target.bucket, target.key
        ));
        let body = self.get_object(&source.bucket, &source.key)?;
        self.objects
            .lock()
            .insert((target.bucket.clone(), target.key.clone()), body);
        Ok(())
    }

    fn list_objects(&self, request: &ListObjectsRequest) -> GatewayResult<ObjectPage> {
        let objects = self.objects.lock();
        let mut matching = objects
            .iter()
            .filter(|((b, k), _)| {
                *b == request.bucket
                    && k.starts_with(&request.prefix)
                    && request.marker.as_ref().is_none_or(|m| k > m)
            })
            .map(|((_, key), body)| ObjectSummary {
                key: key.clone(),
                size: body.len() as u64,
                last_modified: DateTime::UNIX_EPOCH,
                etag: "\"etag\"".to_owned(),
            });
        let page: Vec<ObjectSummary> = matching.by_ref().take(request.max_keys).collect();
        let is_truncated = matching.next().is_some();
        Ok(ObjectPage {
            next_marker: is_truncated
                .then(|| page.last().map(|o| o.key.clone()))
                .flatten(),
            objects: page,
            is_truncated,
        })
    }

    fn presign(
        &self,
        command: &GetObjectCommand,
        signed_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> GatewayResult<String> {
        self.presigned
            .lock()
            .push((command.clone(), signed_at, expires_at));
        Ok(format!(
            "http://gw/{}/{}?X-Amz-Expires={}&X-Amz-Signature=sig",
            command.bucket,
            command.key,
            (expires_at - signed_at).num_seconds()
        ))
    }

    fn plain_url(&self, bucket: &str, key: &str) -> String {
        format!("http://gw/{bucket}/{key}")
    }
}
