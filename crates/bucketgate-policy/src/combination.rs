//! The seven supported permission-group combinations.

use std::fmt;

use crate::permission::PermissionGroup;

/// A non-empty set of permission groups.
///
/// Every policy shape the compiler can emit corresponds to exactly one
/// variant; the compiler's rule table is keyed on this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combination {
    /// `read`
    Read,
    /// `write`
    Write,
    /// `read+write`
    ReadWrite,
    /// `read&read+write`
    ReadAndReadWrite,
    /// `read+write&write`
    ReadWriteAndWrite,
    /// `read&write`
    ReadAndWrite,
    /// `read&read+write&write`
    All,
}

impl Combination {
    /// Every supported combination.
    pub const ALL: [Self; 7] = [
        Self::Read,
        Self::Write,
        Self::ReadWrite,
        Self::ReadAndReadWrite,
        Self::ReadWriteAndWrite,
        Self::ReadAndWrite,
        Self::All,
    ];

    /// Classify a set of groups. Returns `None` for the empty set.
    ///
    /// # Examples
    ///
    /// ```
    /// use bucketgate_policy::{Combination, PermissionGroup};
    ///
    /// let c = Combination::from_groups([PermissionGroup::Write, PermissionGroup::Read]);
    /// assert_eq!(c, Some(Combination::ReadAndWrite));
    /// assert_eq!(Combination::from_groups(Vec::new()), None);
    /// ```
    pub fn from_groups(groups: impl IntoIterator<Item = PermissionGroup>) -> Option<Self> {
        let mask = groups.into_iter().fold(0u8, |mask, g| mask | g.bit());
        Self::ALL.into_iter().find(|c| c.mask() == mask)
    }

    /// Whether the combination includes the group.
    #[must_use]
    pub fn contains(self, group: PermissionGroup) -> bool {
        self.mask() & group.bit() != 0
    }

    /// The combination key: group wire names, sorted and joined by `&`.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::ReadWrite => "read+write",
            Self::ReadAndReadWrite => "read&read+write",
            Self::ReadWriteAndWrite => "read+write&write",
            Self::ReadAndWrite => "read&write",
            Self::All => "read&read+write&write",
        }
    }

    fn mask(self) -> u8 {
        let (read, read_write, write) = (
            PermissionGroup::Read.bit(),
            PermissionGroup::ReadWrite.bit(),
            PermissionGroup::Write.bit(),
        );
        match self {
            Self::Read => read,
            Self::Write => write,
            Self::ReadWrite => read_write,
            Self::ReadAndReadWrite => read | read_write,
            Self::ReadWriteAndWrite => read_write | write,
            Self::ReadAndWrite => read | write,
            Self::All => read | read_write | write,
        }
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
