//! AWS Signature Version 4 query-string authentication for BucketGate.
//!
//! Private objects are handed out as presigned URLs. This crate produces them
//! ([`presign_url`]) and checks them ([`verify_presigned`]), sharing one
//! canonicalization path so both sides always agree.
//!
//! ```rust
//! use bucketgate_auth::{
//!     Credentials, PresignRequest, StaticCredentialProvider, presign_url, verify_presigned_url,
//! };
//!
//! let credentials = Credentials::new("minioadmin", "minioadmin");
//! let now = chrono::Utc::now();
//! let url = presign_url(
//!     &PresignRequest::builder()
//!         .endpoint("http://127.0.0.1:9000")
//!         .path("/photos/cat.png")
//!         .credentials(credentials.clone())
//!         .signed_at(now)
//!         .expires_in(60)
//!         .build(),
//! )
//! .unwrap();
//!
//! let provider = StaticCredentialProvider::from(credentials);
//! assert!(verify_presigned_url(&http::Method::GET, &url, &provider, now).is_ok());
//! ```

pub mod canonical;
mod credentials;
mod error;
mod presign;
pub mod sigv4;
mod verify;

pub use credentials::{CredentialProvider, Credentials, StaticCredentialProvider};
pub use error::AuthError;
pub use presign::{MAX_PRESIGN_EXPIRY_SECS, PresignRequest, presign_url};
pub use verify::{PresignedIdentity, PresignedParams, verify_presigned, verify_presigned_url};
