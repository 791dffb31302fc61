//! Storage path helpers.
//!
//! Object keys never start or end with `/`; callers frequently pass
//! filesystem-looking paths such as `/avatars/1.png`, so every write path goes
//! through [`normalize_storage_path`] first.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Trim leading and trailing `/` from a storage path.
///
/// # Examples
///
/// ```
/// use bucketgate_core::path::normalize_storage_path;
///
/// assert_eq!(normalize_storage_path("/a/b.txt/"), "a/b.txt");
/// assert_eq!(normalize_storage_path("a/b.txt"), "a/b.txt");
/// ```
#[must_use]
pub fn normalize_storage_path(path: &str) -> &str {
    path.trim_matches('/')
}

/// Generate a unique object key for an uploaded file, bucketed by day.
///
/// The key has the shape `YYYY/MM/DD/<uuid>.<ext>`, keeping the extension of
/// `file_name`. A name without an extension produces a key without one.
///
/// # Examples
///
/// ```
/// use bucketgate_core::path::generate_object_name;
///
/// let now = chrono::DateTime::parse_from_rfc3339("2024-03-09T10:00:00Z")
///     .unwrap()
///     .to_utc();
/// let key = generate_object_name("report.pdf", now);
/// assert!(key.starts_with("2024/03/09/"));
/// assert!(key.ends_with(".pdf"));
/// ```
#[must_use]
pub fn generate_object_name(file_name: &str, now: DateTime<Utc>) -> String {
    let day = now.format("%Y/%m/%d");
    let id = Uuid::new_v4().simple();
    match extension(file_name) {
        Some(ext) => format!("{day}/{id}.{ext}"),
        None => format!("{day}/{id}"),
    }
}

/// Default destination key for a copy that names no target:
/// `copy_<unix-seconds>_<source>`.
#[must_use]
pub fn default_copy_target(source: &str, now: DateTime<Utc>) -> String {
    format!("copy_{}_{source}", now.timestamp())
}

fn extension(file_name: &str) -> Option<&str> {
    let base = file_name.rsplit('/').next().unwrap_or(file_name);
    match base.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => Some(ext),
        _ => None,
    }
}
