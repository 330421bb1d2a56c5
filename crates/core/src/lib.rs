//! Core types and error handling for covup.
//!
//! This crate holds the pieces every service provider shares:
//!
//! - [`UploaderInputs`] - user overrides plus a snapshot of the environment
//! - [`ServiceParams`] - the commit identity a provider resolves
//! - [`Error`] - the diagnostic error type surfaced to the CLI

pub mod error;
pub mod inputs;
pub mod params;

pub use error::Error;
pub use inputs::{UploaderArgs, UploaderInputs};
pub use params::ServiceParams;

/// Result alias used across the covup crates.
pub type Result<T> = std::result::Result<T, Error>;
