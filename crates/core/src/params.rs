//! Commit identity produced by a service provider.

use serde::{Deserialize, Serialize};

/// Parameters identifying the commit a coverage report belongs to.
///
/// Field names on the wire match what the upload endpoint expects, including
/// the upper-case `buildURL`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceParams {
    /// Branch the commit was built from.
    pub branch: String,
    /// CI build number. Empty outside hosted CI.
    pub build: String,
    /// Link to the CI build. Empty outside hosted CI.
    #[serde(rename = "buildURL")]
    pub build_url: String,
    /// Full commit SHA.
    pub commit: String,
    /// CI job identifier. Empty outside hosted CI.
    pub job: String,
    /// Pull request number, or empty.
    pub pr: String,
    /// CI service name. Empty outside hosted CI.
    pub service: String,
    /// Repository in `owner/repo` form.
    pub slug: String,
}
