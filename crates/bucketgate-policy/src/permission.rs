//! Permission groups and the grouped path specification.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::combination::Combination;
use crate::error::{PolicyError, PolicyResult};

/// Access level granted over a set of path prefixes.
///
/// Variants are declared in the lexicographic order of their wire names
/// (`read` < `read+write` < `write`), so the derived [`Ord`] sorts groups the
/// same way the combination keys do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PermissionGroup {
    /// Objects can be listed and downloaded.
    #[serde(rename = "read")]
    Read,
    /// Objects can be listed, downloaded, uploaded, and deleted.
    #[serde(rename = "read+write")]
    ReadWrite,
    /// Objects can be uploaded and deleted, but not listed or downloaded.
    #[serde(rename = "write")]
    Write,
}

impl PermissionGroup {
    /// All groups in wire-name order.
    pub const ALL: [Self; 3] = [Self::Read, Self::ReadWrite, Self::Write];

    /// The wire name of the group.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::ReadWrite => "read+write",
            Self::Write => "write",
        }
    }

    pub(crate) fn bit(self) -> u8 {
        match self {
            Self::Read => 0b001,
            Self::ReadWrite => 0b010,
            Self::Write => 0b100,
        }
    }
}

impl fmt::Display for PermissionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PermissionGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| s.to_owned())
    }
}

/// Path prefixes grouped by access level.
///
/// Which groups are *present* decides the policy shape, even when a group's
/// list is empty. Paths are kept in insertion order and are never
/// deduplicated, within or across groups.
///
/// The JSON form is an object keyed by group wire name:
///
/// ```
/// use bucketgate_policy::{PermissionGroup, PermissionSpecification};
///
/// let spec = PermissionSpecification::from_json(
///     r#"{"read": ["read1", "read2"], "read+write": ["rw"]}"#,
/// ).unwrap();
/// assert_eq!(spec.paths(PermissionGroup::Read), ["read1", "read2"]);
/// assert!(!spec.contains(PermissionGroup::Write));
/// ```
///
/// Keys that are not a known group are kept aside; a specification holding
/// any of them never compiles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, Vec<String>>",
    into = "BTreeMap<String, Vec<String>>"
)]
pub struct PermissionSpecification {
    groups: BTreeMap<PermissionGroup, Vec<String>>,
    unrecognized: BTreeMap<String, Vec<String>>,
}

impl PermissionSpecification {
    /// Create an empty specification.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a specification from its JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::InvalidSpecification`] unless the input is a
    /// JSON object whose values are arrays of strings.
    pub fn from_json(input: &str) -> PolicyResult<Self> {
        serde_json::from_str(input).map_err(PolicyError::InvalidSpecification)
    }

    /// Add (or replace) a group, builder style.
    #[must_use]
    pub fn with_group<I, S>(mut self, group: PermissionGroup, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(group, paths);
        self
    }

    /// Set the paths of a group, replacing any previous list.
    pub fn insert<I, S>(&mut self, group: PermissionGroup, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups
            .insert(group, paths.into_iter().map(Into::into).collect());
    }

    /// Whether the group is present (possibly with no paths).
    #[must_use]
    pub fn contains(&self, group: PermissionGroup) -> bool {
        self.groups.contains_key(&group)
    }

    /// The paths of a group; empty when the group is absent.
    #[must_use]
    pub fn paths(&self, group: PermissionGroup) -> &[String] {
        self.groups.get(&group).map(Vec::as_slice).unwrap_or_default()
    }

    /// The groups present, in wire-name order.
    pub fn groups(&self) -> impl Iterator<Item = PermissionGroup> + '_ {
        self.groups.keys().copied()
    }

    /// Keys that did not name a known group.
    pub fn unrecognized_groups(&self) -> impl Iterator<Item = &str> + '_ {
        self.unrecognized.keys().map(String::as_str)
    }

    /// Whether no group key at all is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty() && self.unrecognized.is_empty()
    }

    /// The supported combination formed by the groups present, if any.
    #[must_use]
    pub fn combination(&self) -> Option<Combination> {
        if !self.unrecognized.is_empty() {
            return None;
        }
        Combination::from_groups(self.groups())
    }

    /// The combination key: every key present, sorted and joined by `&`.
    ///
    /// Unrecognized keys are included, so the key of an unsupported
    /// specification shows what made it unsupported.
    #[must_use]
    pub fn combination_key(&self) -> String {
        let mut keys: Vec<&str> = self.groups().map(|g| -> &str { g.as_str() }).collect();
        keys.extend(self.unrecognized_groups());
        keys.sort_unstable();
        keys.join("&")
    }
}

impl From<BTreeMap<String, Vec<String>>> for PermissionSpecification {
    fn from(raw: BTreeMap<String, Vec<String>>) -> Self {
        let mut spec = Self::new();
        for (key, paths) in raw {
            match key.parse::<PermissionGroup>() {
                Ok(group) => {
                    spec.groups.insert(group, paths);
                }
                Err(key) => {
                    spec.unrecognized.insert(key, paths);
                }
            }
        }
        spec
    }
}

impl From<PermissionSpecification> for BTreeMap<String, Vec<String>> {
    fn from(spec: PermissionSpecification) -> Self {
        spec.groups
            .into_iter()
            .map(|(group, paths)| (group.as_str().to_owned(), paths))
            .chain(spec.unrecognized)
            .collect()
    }
}
