//! Signing credentials and secret lookup.

use std::collections::HashMap;
use std::fmt;

use crate::error::AuthError;

/// An access key pair used to sign URLs.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// The public access key ID.
    pub access_key: String,
    /// The secret key. Never printed.
    pub secret_key: String,
}

impl Credentials {
    /// Create a key pair.
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// Resolves the secret key for an access key ID during verification.
pub trait CredentialProvider: Send + Sync {
    /// Look up the secret key.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::AccessKeyNotFound`] for unknown keys.
    fn get_secret_key(&self, access_key_id: &str) -> Result<String, AuthError>;
}

/// A fixed set of key pairs held in memory.
///
/// # Examples
///
/// ```
/// use bucketgate_auth::{CredentialProvider, Credentials, StaticCredentialProvider};
///
/// let provider = StaticCredentialProvider::from(Credentials::new("minioadmin", "secret"));
/// assert_eq!(provider.get_secret_key("minioadmin").unwrap(), "secret");
/// assert!(provider.get_secret_key("other").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticCredentialProvider {
    secrets: HashMap<String, String>,
}

impl StaticCredentialProvider {
    /// Build a provider from `(access_key, secret_key)` pairs.
    pub fn new(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            secrets: pairs.into_iter().collect(),
        }
    }
}

impl From<Credentials> for StaticCredentialProvider {
    fn from(credentials: Credentials) -> Self {
        Self::new([(credentials.access_key, credentials.secret_key)])
    }
}

impl CredentialProvider for StaticCredentialProvider {
    fn get_secret_key(&self, access_key_id: &str) -> Result<String, AuthError> {
        self.secrets
            .get(access_key_id)
            .cloned()
            .ok_or_else(|| AuthError::AccessKeyNotFound(access_key_id.to_owned()))
    }
}
