//! Per-bucket public path patterns.

use dashmap::DashMap;

use crate::matcher::pattern_matches;

/// Thread-safe map from bucket name to its public-path patterns.
///
/// Setting a bucket replaces its whole list; concurrent writers to the same
/// bucket resolve last-write-wins. Readers never block each other.
///
/// # Examples
///
/// ```
/// use bucketgate_access::PublicPathRegistry;
///
/// let registry = PublicPathRegistry::new();
/// registry.set("photos", ["public/", "logo.png"]);
/// assert_eq!(registry.get("photos"), ["public/", "logo.png"]);
/// assert!(registry.get("other").is_empty());
///
/// registry.set("photos", ["*"]);
/// assert_eq!(registry.get("photos"), ["*"]);
/// ```
#[derive(Debug, Default)]
pub struct PublicPathRegistry {
    patterns: DashMap<String, Vec<String>>,
}

impl PublicPathRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry seeded with `(bucket, patterns)` pairs.
    pub fn with_patterns<B, P, S>(entries: impl IntoIterator<Item = (B, P)>) -> Self
    where
        B: Into<String>,
        P: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let registry = Self::new();
        for (bucket, patterns) in entries {
            registry.set(bucket, patterns);
        }
        registry
    }

    /// Replace the patterns of a bucket.
    pub fn set<S: Into<String>>(
        &self,
        bucket: impl Into<String>,
        patterns: impl IntoIterator<Item = S>,
    ) {
        self.patterns
            .insert(bucket.into(), patterns.into_iter().map(Into::into).collect());
    }

    /// The patterns of a bucket; empty when never set.
    #[must_use]
    pub fn get(&self, bucket: &str) -> Vec<String> {
        self.patterns
            .get(bucket)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    /// Forget a bucket, returning its previous patterns.
    pub fn remove(&self, bucket: &str) -> Option<Vec<String>> {
        self.patterns.remove(bucket).map(|(_, patterns)| patterns)
    }

    /// Whether any pattern of `bucket` matches `path`.
    #[must_use]
    pub fn is_public(&self, bucket: &str, path: &str) -> bool {
        self.patterns.get(bucket).is_some_and(|entry| {
            entry
                .value()
                .iter()
                .any(|pattern| pattern_matches(pattern, path))
        })
    }

    /// Buckets with registered patterns, sorted.
    #[must_use]
    pub fn buckets(&self) -> Vec<String> {
        let mut names: Vec<String> = self.patterns.iter().map(|e| e.key().clone()).collect();
        names.sort_unstable();
        names
    }

    /// Number of buckets with registered patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether no bucket has patterns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
