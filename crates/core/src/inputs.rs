//! Inputs handed to a service provider for one resolution.

use std::collections::HashMap;

/// Explicit overrides supplied on the command line.
///
/// Values are trimmed before use. A field that is `None`, empty, or only
/// whitespace counts as not supplied, so `--branch " "` falls through to the
/// environment and git rather than producing a blank branch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploaderArgs {
    /// Branch name override.
    pub branch: Option<String>,
    /// Pull request number override.
    pub pr: Option<String>,
    /// Commit SHA override.
    pub sha: Option<String>,
    /// Repository slug (`owner/repo`) override.
    pub slug: Option<String>,
}

impl UploaderArgs {
    /// The branch override, if one was given.
    #[must_use]
    pub fn branch(&self) -> Option<&str> {
        non_blank(self.branch.as_deref())
    }

    /// The pull request override, if one was given.
    #[must_use]
    pub fn pr(&self) -> Option<&str> {
        non_blank(self.pr.as_deref())
    }

    /// The commit SHA override, if one was given.
    #[must_use]
    pub fn sha(&self) -> Option<&str> {
        non_blank(self.sha.as_deref())
    }

    /// The slug override, if one was given.
    #[must_use]
    pub fn slug(&self) -> Option<&str> {
        non_blank(self.slug.as_deref())
    }
}

/// Overrides plus the environment captured for a single upload run.
#[derive(Debug, Clone, Default)]
pub struct UploaderInputs {
    /// Command line overrides.
    pub args: UploaderArgs,
    /// Environment variables, by name.
    pub environment: HashMap<String, String>,
}

impl UploaderInputs {
    /// Build inputs from explicit parts.
    #[must_use]
    pub fn new(args: UploaderArgs, environment: HashMap<String, String>) -> Self {
        Self { args, environment }
    }

    /// Build inputs from `args` and a snapshot of the process environment.
    ///
    /// Variables whose name or value is not valid unicode are skipped.
    #[must_use]
    pub fn from_env(args: UploaderArgs) -> Self {
        let environment = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        Self { args, environment }
    }

    /// Look up an environment variable, trimmed, treating blank values as unset.
    #[must_use]
    pub fn env_var(&self, name: &str) -> Option<&str> {
        non_blank(self.environment.get(name).map(String::as_str))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
