//! Service providers for covup.
//!
//! A provider decides whether it applies to the current execution environment
//! and, if so, resolves the [`ServiceParams`](covup_core::ServiceParams) that
//! identify the commit being uploaded. The [`LocalProvider`] is the fallback
//! used outside hosted CI and derives everything from a local git checkout.

pub mod git;
pub mod provider;
pub mod slug;

#[cfg(test)]
pub(crate) mod testing;

pub use git::{GitError, GitRunner, MAX_OUTPUT_BYTES, SystemGit};
pub use provider::local::LocalProvider;
pub use provider::{ServiceProvider, default_providers, detect_provider};
pub use slug::parse_slug;
