//! The bucket policy document and its wire format.
//!
//! Field order and names mirror what S3-compatible backends expect:
//!
//! ```text
//! {"Version":"2012-10-17","Statement":[{"Effect":"Allow","Principal":{"AWS":["*"]},
//!   "Action":[...],"Resource":[...],"Condition":{"StringEquals":{"s3:prefix":[...]}}}]}
//! ```
//!
//! Every collection is a `Vec`, so serialization order is fully determined by
//! construction order.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PolicyError, PolicyResult};

/// Policy language version written into every document.
pub const POLICY_VERSION: &str = "2012-10-17";

/// A bucket policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessPolicyDocument {
    /// Policy language version; always [`POLICY_VERSION`] for compiled documents.
    #[serde(rename = "Version")]
    pub version: String,
    /// Statements in evaluation-independent but contractually fixed order.
    #[serde(rename = "Statement")]
    pub statements: Vec<Statement>,
}

impl AccessPolicyDocument {
    /// Create a document with the current policy version.
    #[must_use]
    pub fn new(statements: Vec<Statement>) -> Self {
        Self {
            version: POLICY_VERSION.to_owned(),
            statements,
        }
    }

    /// Render the compact wire JSON.
    pub fn to_json(&self) -> PolicyResult<String> {
        serde_json::to_string(self).map_err(PolicyError::Serialize)
    }

    /// Render indented JSON for humans.
    pub fn to_json_pretty(&self) -> PolicyResult<String> {
        serde_json::to_string_pretty(self).map_err(PolicyError::Serialize)
    }
}

/// A single `Allow` grant to every principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    /// Always [`Effect::Allow`].
    #[serde(rename = "Effect")]
    pub effect: Effect,
    /// Who the statement applies to.
    #[serde(rename = "Principal")]
    pub principal: Principal,
    /// Operations granted.
    #[serde(rename = "Action")]
    pub actions: Vec<Action>,
    /// Bucket or object-prefix ARNs the actions apply to.
    #[serde(rename = "Resource")]
    pub resources: Vec<String>,
    /// Optional restriction on the request.
    #[serde(rename = "Condition", default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
}

impl Statement {
    /// An `Allow` statement for anonymous principals.
    #[must_use]
    pub fn allow_anyone(actions: Vec<Action>, resources: Vec<String>) -> Self {
        Self {
            effect: Effect::Allow,
            principal: Principal::anyone(),
            actions,
            resources,
            condition: None,
        }
    }

    /// Attach a condition.
    #[must_use]
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }
}

/// Statement effect. Compiled policies only ever allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Grant the listed actions.
    Allow,
}

/// Principal block: `{"AWS": ["*"]}` for anonymous access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// AWS principal identifiers.
    #[serde(rename = "AWS")]
    pub aws: Vec<String>,
}

impl Principal {
    /// The wildcard principal.
    #[must_use]
    pub fn anyone() -> Self {
        Self {
            aws: vec!["*".to_owned()],
        }
    }
}

/// Condition block restricting `ListBucket` to specific prefixes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    /// The `StringEquals` operator.
    #[serde(rename = "StringEquals")]
    pub string_equals: PrefixEquals,
}

impl Condition {
    /// `{"StringEquals": {"s3:prefix": [..]}}`.
    #[must_use]
    pub fn prefix_equals(prefixes: Vec<String>) -> Self {
        Self {
            string_equals: PrefixEquals { prefixes },
        }
    }
}

/// Operand of the `StringEquals` operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixEquals {
    /// Allowed values of the `prefix` request parameter.
    #[serde(rename = "s3:prefix")]
    pub prefixes: Vec<String>,
}

/// S3 operations a statement can grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// `s3:GetBucketLocation`
    #[serde(rename = "s3:GetBucketLocation")]
    GetBucketLocation,
    /// `s3:ListBucket`
    #[serde(rename = "s3:ListBucket")]
    ListBucket,
    /// `s3:ListBucketMultipartUploads`
    #[serde(rename = "s3:ListBucketMultipartUploads")]
    ListBucketMultipartUploads,
    /// `s3:GetObject`
    #[serde(rename = "s3:GetObject")]
    GetObject,
    /// `s3:PutObject`
    #[serde(rename = "s3:PutObject")]
    PutObject,
    /// `s3:AbortMultipartUpload`
    #[serde(rename = "s3:AbortMultipartUpload")]
    AbortMultipartUpload,
    /// `s3:DeleteObject`
    #[serde(rename = "s3:DeleteObject")]
    DeleteObject,
    /// `s3:ListMultipartUploadParts`
    #[serde(rename = "s3:ListMultipartUploadParts")]
    ListMultipartUploadParts,
}

impl Action {
    /// The wire name, including the `s3:` service prefix.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GetBucketLocation => "s3:GetBucketLocation",
            Self::ListBucket => "s3:ListBucket",
            Self::ListBucketMultipartUploads => "s3:ListBucketMultipartUploads",
            Self::GetObject => "s3:GetObject",
            Self::PutObject => "s3:PutObject",
            Self::AbortMultipartUpload => "s3:AbortMultipartUpload",
            Self::DeleteObject => "s3:DeleteObject",
            Self::ListMultipartUploadParts => "s3:ListMultipartUploadParts",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
