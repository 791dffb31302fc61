//! Public-path pattern matching.

/// Wildcard pattern: every path in the bucket is public.
pub const WILDCARD: &str = "*";

/// Whether a single public-path pattern covers `path`.
///
/// A pattern matches when it is `*`, equals the path, or occurs anywhere
/// inside it. The last rule is an unanchored substring test: `"a"` matches
/// `"banana/secret.txt"`, and an empty pattern matches everything.
///
/// # Examples
///
/// ```
/// use bucketgate_access::pattern_matches;
///
/// assert!(pattern_matches("*", "anything"));
/// assert!(pattern_matches("public/", "public/logo.png"));
/// assert!(pattern_matches("img", "user/img/1.png"));
/// assert!(!pattern_matches("public/", "private/logo.png"));
/// ```
#[must_use]
pub fn pattern_matches(pattern: &str, path: &str) -> bool {
    pattern == WILDCARD || pattern == path || path.contains(pattern)
}
