//! Error types for the policy compiler.

/// Errors produced while reading permissions or rendering a policy.
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    /// The permission groups present do not form one of the seven supported
    /// combinations.
    #[error("unsupported permission combination: '{key}'")]
    UnsupportedCombination {
        /// The sorted, `&`-joined group key (e.g. `admin&read`).
        key: String,
    },

    /// The permission specification is not a JSON object of string lists.
    #[error("invalid permission specification: {0}")]
    InvalidSpecification(#[source] serde_json::Error),

    /// The policy document could not be rendered as JSON.
    #[error("failed to serialize policy document: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Convenience result type for policy operations.
pub type PolicyResult<T> = Result<T, PolicyError>;
