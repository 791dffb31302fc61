//! Rule-table policy compiler.
//!
//! Each [`Combination`] maps to an ordered list of [`StatementRule`]s. A rule
//! names the action set and how to pick resources and the optional prefix
//! condition from the specification; the compiler only walks the table.

use tracing::{debug, warn};

use crate::arn::{bucket_arn, object_prefix_arn};
use crate::combination::Combination;
use crate::document::{AccessPolicyDocument, Action, Condition, Statement};
use crate::error::{PolicyError, PolicyResult};
use crate::permission::{PermissionGroup, PermissionSpecification};

/// One statement of a compiled policy.
#[derive(Debug, Clone, Copy)]
enum StatementRule {
    /// Bucket-level grant on the bucket ARN.
    Bucket(&'static [Action]),
    /// `ListBucket` on the bucket ARN, restricted to the prefixes of the
    /// listable groups.
    Listing,
    /// Object access on the prefixes of one group.
    Objects(PermissionGroup),
}

use StatementRule::{Bucket, Listing, Objects};

const LOCATION: &[Action] = &[Action::GetBucketLocation];

const LOCATION_UPLOADS: &[Action] = &[
    Action::GetBucketLocation,
    Action::ListBucketMultipartUploads,
];

const LOCATION_LIST_UPLOADS: &[Action] = &[
    Action::GetBucketLocation,
    Action::ListBucket,
    Action::ListBucketMultipartUploads,
];

/// Groups whose prefixes may be listed, in condition order. Write access does
/// not imply listability.
const LISTABLE_GROUPS: [PermissionGroup; 2] = [PermissionGroup::Read, PermissionGroup::ReadWrite];

/// The statement layout of every supported combination.
///
/// Object statements always follow the order read+write, read, write.
fn rules(combination: Combination) -> &'static [StatementRule] {
    use PermissionGroup::{Read, ReadWrite, Write};

    match combination {
        Combination::Read => &[Bucket(LOCATION), Listing, Objects(Read)],
        Combination::Write => &[Bucket(LOCATION_UPLOADS), Objects(Write)],
        Combination::ReadWrite => &[Bucket(LOCATION_UPLOADS), Listing, Objects(ReadWrite)],
        Combination::ReadAndReadWrite => &[
            Bucket(LOCATION_UPLOADS),
            Listing,
            Objects(ReadWrite),
            Objects(Read),
        ],
        Combination::ReadWriteAndWrite => &[
            Bucket(LOCATION_LIST_UPLOADS),
            Listing,
            Objects(ReadWrite),
            Objects(Write),
        ],
        Combination::ReadAndWrite => &[
            Bucket(LOCATION_LIST_UPLOADS),
            Listing,
            Objects(Read),
            Objects(Write),
        ],
        Combination::All => &[
            Bucket(LOCATION_LIST_UPLOADS),
            Listing,
            Objects(ReadWrite),
            Objects(Read),
            Objects(Write),
        ],
    }
}

/// Object actions granted to a group.
fn object_actions(group: PermissionGroup) -> &'static [Action] {
    match group {
        PermissionGroup::Read => &[Action::GetObject],
        PermissionGroup::Write => &[
            Action::PutObject,
            Action::AbortMultipartUpload,
            Action::DeleteObject,
            Action::ListMultipartUploadParts,
        ],
        PermissionGroup::ReadWrite => &[
            Action::GetObject,
            Action::PutObject,
            Action::AbortMultipartUpload,
            Action::DeleteObject,
            Action::ListMultipartUploadParts,
        ],
    }
}

impl StatementRule {
    fn build(self, permissions: &PermissionSpecification, bucket: &str) -> Statement {
        match self {
            Bucket(actions) => Statement::allow_anyone(actions.to_vec(), vec![bucket_arn(bucket)]),
            Listing => {
                let prefixes = LISTABLE_GROUPS
                    .iter()
                    .flat_map(|g| permissions.paths(*g))
                    .cloned()
                    .collect();
                Statement::allow_anyone(vec![Action::ListBucket], vec![bucket_arn(bucket)])
                    .with_condition(Condition::prefix_equals(prefixes))
            }
            Objects(group) => {
                let resources = permissions
                    .paths(group)
                    .iter()
                    .map(|path| object_prefix_arn(bucket, path))
                    .collect();
                Statement::allow_anyone(object_actions(group).to_vec(), resources)
            }
        }
    }
}

/// Compile a permission specification into a bucket policy.
///
/// Returns `None` when the groups present are not one of the seven supported
/// combinations (including the empty specification). `None` means "no policy
/// to apply" and is not a failure.
///
/// The output depends only on the inputs: compiling the same specification
/// twice yields byte-identical JSON.
///
/// # Examples
///
/// ```
/// use bucketgate_policy::{PermissionGroup, PermissionSpecification, compile};
///
/// let spec = PermissionSpecification::new().with_group(PermissionGroup::Write, ["w1"]);
/// let doc = compile(&spec, "b1").unwrap();
/// assert_eq!(doc.statements.len(), 2);
///
/// assert!(compile(&PermissionSpecification::new(), "b1").is_none());
/// ```
#[must_use]
pub fn compile(permissions: &PermissionSpecification, bucket: &str) -> Option<AccessPolicyDocument> {
    let Some(combination) = permissions.combination() else {
        warn!(
            bucket,
            key = %permissions.combination_key(),
            "unsupported permission combination, no policy produced"
        );
        return None;
    };

    let statements: Vec<Statement> = rules(combination)
        .iter()
        .map(|rule| rule.build(permissions, bucket))
        .collect();

    debug!(
        bucket,
        combination = %combination,
        statements = statements.len(),
        "compiled bucket policy"
    );

    Some(AccessPolicyDocument::new(statements))
}

/// Like [`compile`], but reports an unsupported combination as an error.
///
/// # Errors
///
/// Returns [`PolicyError::UnsupportedCombination`] carrying the sorted
/// combination key.
pub fn compile_strict(
    permissions: &PermissionSpecification,
    bucket: &str,
) -> PolicyResult<AccessPolicyDocument> {
    compile(permissions, bucket).ok_or_else(|| PolicyError::UnsupportedCombination {
        key: permissions.combination_key(),
    })
}
