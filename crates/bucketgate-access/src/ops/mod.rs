//! Storage client operations.
//!
//! Each submodule adds an `impl StorageClient` block for one area:
//!
//! - [`bucket`] - bucket lifecycle and policy compilation
//! - [`public`] - public-path registry access
//! - [`object`] - object storage, listing, copying, and URLs

pub mod bucket;
pub mod object;
pub mod public;
