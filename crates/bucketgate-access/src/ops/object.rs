//! Object operations: store, fetch, list, copy, delete, and URL resolution.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use tracing::debug;

use bucketgate_core::GatewayResult;
use bucketgate_core::path::{default_copy_target, generate_object_name, normalize_storage_path};
use bucketgate_core::validation::validate_object_key;

use crate::client::StorageClient;
use crate::gateway::{ListObjectsRequest, ObjectLocation, ObjectSummary, StorageGateway};
use crate::resolver::ResolvedUrl;

impl<G: StorageGateway + ?Sized> StorageClient<G> {
    /// Store `content` at `path` and return the key actually used.
    ///
    /// Leading and trailing `/` are trimmed from `path` first.
    pub fn put_object_by_content(
        &self,
        bucket: Option<&str>,
        path: &str,
        content: impl Into<Bytes>,
    ) -> GatewayResult<String> {
        let bucket = self.bucket(bucket)?;
        let key = normalize_storage_path(path);
        validate_object_key(key)?;
        let etag = self.gateway.put_object(bucket, key, content.into())?;
        debug!(bucket, key, %etag, "object stored");
        Ok(key.to_owned())
    }

    /// Store `content` under a generated `YYYY/MM/DD/<uuid>.<ext>` key derived
    /// from `file_name`, and return that key.
    pub fn put_object_with_generated_name(
        &self,
        bucket: Option<&str>,
        file_name: &str,
        content: impl Into<Bytes>,
    ) -> GatewayResult<String> {
        let key = generate_object_name(file_name, Utc::now());
        self.put_object_by_content(bucket, &key, content)
    }

    /// Fetch an object body.
    pub fn get_object(&self, bucket: Option<&str>, path: &str) -> GatewayResult<Bytes> {
        self.gateway.get_object(self.bucket(bucket)?, path)
    }

    /// A plain URL for public paths, otherwise a presigned one valid until
    /// `expires_at` (default: now plus the configured TTL).
    pub fn object_url(
        &self,
        bucket: Option<&str>,
        path: &str,
        expires_at: Option<DateTime<Utc>>,
    ) -> GatewayResult<ResolvedUrl> {
        self.resolver.resolve_url(self.bucket(bucket)?, path, expires_at)
    }

    /// The unsigned URL of an object, whether or not it is public.
    pub fn plain_object_url(&self, bucket: Option<&str>, path: &str) -> GatewayResult<String> {
        Ok(self.gateway.plain_url(self.bucket(bucket)?, path))
    }

    /// A presigned URL, even for public paths.
    pub fn presigned_object_url(
        &self,
        bucket: Option<&str>,
        path: &str,
        expires_at: Option<DateTime<Utc>>,
    ) -> GatewayResult<ResolvedUrl> {
        self.resolver
            .presigned_url_at(self.bucket(bucket)?, path, expires_at, Utc::now())
    }

    /// Delete one object.
    pub fn remove_object(&self, bucket: Option<&str>, path: &str) -> GatewayResult<()> {
        let bucket = self.bucket(bucket)?;
        self.gateway.delete_object(bucket, path)?;
        debug!(bucket, path, "object removed");
        Ok(())
    }

    /// Delete several objects in one gateway call.
    pub fn remove_objects<S: Into<String>>(
        &self,
        bucket: Option<&str>,
        paths: impl IntoIterator<Item = S>,
    ) -> GatewayResult<()> {
        let bucket = self.bucket(bucket)?;
        let keys: Vec<String> = paths.into_iter().map(Into::into).collect();
        if keys.is_empty() {
            return Ok(());
        }
        self.gateway.delete_objects(bucket, &keys)?;
        debug!(bucket, count = keys.len(), "objects removed");
        Ok(())
    }

    /// The first page (up to 1000 keys) under `prefix`.
    pub fn list_objects(
        &self,
        bucket: Option<&str>,
        prefix: &str,
    ) -> GatewayResult<Vec<ObjectSummary>> {
        let request = ListObjectsRequest::builder()
            .bucket(self.bucket(bucket)?)
            .prefix(prefix)
            .build();
        Ok(self.gateway.list_objects(&request)?.objects)
    }

    /// Every key under `prefix`, following pagination to the end.
    pub fn list_all_objects(
        &self,
        bucket: Option<&str>,
        prefix: &str,
    ) -> GatewayResult<Vec<ObjectSummary>> {
        let mut request = ListObjectsRequest::builder()
            .bucket(self.bucket(bucket)?)
            .prefix(prefix)
            .build();
        let mut objects = Vec::new();
        loop {
            let page = self.gateway.list_objects(&request)?;
            let next = page
                .next_marker
                .or_else(|| page.objects.last().map(|o| o.key.clone()));
            objects.extend(page.objects);
            match next {
                Some(marker) if page.is_truncated => request.marker = Some(marker),
                _ => break,
            }
        }
        debug!(bucket = %request.bucket, prefix, count = objects.len(), "listed all objects");
        Ok(objects)
    }

    /// Copy an object and return the target key.
    ///
    /// The target bucket defaults to the source bucket and the target key to
    /// `copy_<unix-seconds>_<source_path>`.
    pub fn copy_object(
        &self,
        source_bucket: Option<&str>,
        source_path: &str,
        target_bucket: Option<&str>,
        target_path: Option<&str>,
    ) -> GatewayResult<String> {
        let source_bucket = self.bucket(source_bucket)?;
        let target_bucket = target_bucket
            .filter(|b| !b.is_empty())
            .unwrap_or(source_bucket);
        let target_key = target_path.map_or_else(
            || default_copy_target(source_path, Utc::now()),
            ToOwned::to_owned,
        );

        self.gateway.copy_object(
            &ObjectLocation::new(source_bucket, source_path),
            &ObjectLocation::new(target_bucket, target_key.as_str()),
        )?;
        debug!(
            source_bucket,
            source_path,
            target_bucket,
            target_key = %target_key,
            "object copied"
        );
        Ok(target_key)
    }
}
