//! Core types, configuration, and error handling for BucketGate.
//!
//! This crate provides the foundational building blocks shared by the policy
//! compiler, the access resolver, and every storage gateway implementation:
//!
//! - [`GateConfig`]: endpoint, credentials, and URL expiry settings loaded
//!   from the environment
//! - [`GatewayError`] / [`GatewayResult`]: the structured failure value every
//!   gateway operation returns
//! - [`validation`]: bucket-name rules enforced before talking to a backend
//! - [`path`]: storage-path normalization and generated object names

mod config;
mod error;
pub mod path;
pub mod validation;

pub use config::{DEFAULT_URL_EXPIRY_SECS, GateConfig};
pub use error::{GatewayError, GatewayErrorKind, GatewayResult};
