//! Bucket access-policy compiler for BucketGate.
//!
//! Turns a [`PermissionSpecification`] (path prefixes grouped by access level
//! `read`, `write` or `read+write`) into a canonical S3 bucket policy
//! ([`AccessPolicyDocument`]) granting anonymous principals exactly that access.
//!
//! ```text
//! {"read": ["docs/"], "write": ["inbox/"]}
//!        |
//!        v   classify -> Combination::ReadAndWrite
//!        v   rule table -> [bucket-level, listing, read-object, write-object]
//!        v
//! {"Version":"2012-10-17","Statement":[...]}
//! ```
//!
//! Seven group combinations are supported. Anything else, including an empty
//! specification, compiles to `None`, meaning "no policy to apply".
//!
//! # Usage
//!
//! ```
//! use bucketgate_policy::{PermissionGroup, PermissionSpecification, compile};
//!
//! let spec = PermissionSpecification::new()
//!     .with_group(PermissionGroup::Read, ["a", "b"]);
//! let document = compile(&spec, "b1").expect("read is a supported combination");
//! assert_eq!(document.statements.len(), 3);
//! ```

pub mod arn;
mod combination;
mod compiler;
mod document;
mod error;
mod permission;

pub use combination::Combination;
pub use compiler::{compile, compile_strict};
pub use document::{
    AccessPolicyDocument, Action, Condition, Effect, POLICY_VERSION, PrefixEquals, Principal,
    Statement,
};
pub use error::{PolicyError, PolicyResult};
pub use permission::{PermissionGroup, PermissionSpecification};
