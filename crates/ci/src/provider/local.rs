//! Local git fallback provider.

use super::ServiceProvider;
use crate::git::{GitRunner, SystemGit};
use crate::slug::parse_slug;
use async_trait::async_trait;
use covup_core::{Error, Result, ServiceParams, UploaderInputs};
use tracing::{debug, info};

const BRANCH_ARGS: &[&str] = &["rev-parse", "--abbrev-ref", "HEAD"];
const COMMIT_ARGS: &[&str] = &["rev-parse", "HEAD"];
const REMOTE_URL_ARGS: &[&str] = &["config", "--get", "remote.origin.url"];

const ENV_VAR_NAMES: &[&str] = &["GIT_BRANCH", "GIT_COMMIT"];

/// Where a field's value may come from, tried in list order.
#[derive(Debug, Clone, Copy)]
enum Source<'a> {
    /// Explicit value from the command line
    Override(Option<&'a str>),
    /// Named environment variable
    Environment(&'static str),
}

/// Git lookup that ends a required field's chain.
#[derive(Debug, Clone, Copy)]
enum GitSource {
    /// Trimmed stdout of a git subcommand
    Query(&'static [&'static str]),
    /// `origin` remote URL, reduced to `owner/repo`
    RemoteSlug,
}

/// Fallback provider for runs outside hosted CI.
///
/// Every field is taken from an explicit override when given, then from
/// `GIT_BRANCH`/`GIT_COMMIT`, and finally from the local git checkout.
pub struct LocalProvider<G = SystemGit> {
    git: G,
}

impl LocalProvider {
    /// Create a `LocalProvider` that runs git in the current directory.
    #[must_use]
    pub fn new() -> Self {
        Self::with_git(SystemGit::new())
    }
}

impl Default for LocalProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: GitRunner> LocalProvider<G> {
    /// Create a `LocalProvider` that runs git through `git`.
    #[must_use]
    pub const fn with_git(git: G) -> Self {
        Self { git }
    }

    /// The runner used for git invocations.
    pub const fn git(&self) -> &G {
        &self.git
    }

    /// First value supplied by `sources`, if any.
    fn lookup(
        field: &'static str,
        inputs: &UploaderInputs,
        sources: &[Source<'_>],
    ) -> Option<String> {
        sources
            .iter()
            .find_map(|source| match *source {
                Source::Override(value) => {
                    value.inspect(|_| debug!(field, "Using argument override"))
                }
                Source::Environment(name) => inputs
                    .env_var(name)
                    .inspect(|_| debug!(field, var = name, "Using environment variable")),
            })
            .map(str::to_string)
    }

    /// Walk `sources`, then fall back to git. A failing git call fails the field.
    fn require(
        &self,
        field: &'static str,
        inputs: &UploaderInputs,
        sources: &[Source<'_>],
        fallback: GitSource,
    ) -> Result<String> {
        if let Some(value) = Self::lookup(field, inputs, sources) {
            return Ok(value);
        }

        match fallback {
            GitSource::Query(args) => {
                let value = self
                    .git
                    .query(args)
                    .map_err(|e| Error::git_command_failed(field, args, e))?;
                debug!(field, value = %value, "Resolved from git");
                Ok(value)
            }
            GitSource::RemoteSlug => {
                let url = self
                    .git
                    .query(REMOTE_URL_ARGS)
                    .map_err(|e| Error::git_command_failed(field, REMOTE_URL_ARGS, e))?;
                let slug = parse_slug(&url)?;
                debug!(field, url = %url, slug = %slug, "Resolved from origin remote");
                Ok(slug)
            }
        }
    }
}

#[async_trait]
impl<G: GitRunner> ServiceProvider for LocalProvider<G> {
    fn name(&self) -> &'static str {
        "Local"
    }

    fn detect(&self, _inputs: &UploaderInputs) -> bool {
        self.git.probe()
    }

    fn env_var_names(&self) -> &'static [&'static str] {
        ENV_VAR_NAMES
    }

    async fn service_params(&self, inputs: &UploaderInputs) -> Result<ServiceParams> {
        let args = &inputs.args;

        // Order matters: a branch or commit failure must surface before any slug lookup.
        let branch = self.require(
            "branch",
            inputs,
            &[
                Source::Override(args.branch()),
                Source::Environment("GIT_BRANCH"),
            ],
            GitSource::Query(BRANCH_ARGS),
        )?;
        let commit = self.require(
            "commit",
            inputs,
            &[
                Source::Override(args.sha()),
                Source::Environment("GIT_COMMIT"),
            ],
            GitSource::Query(COMMIT_ARGS),
        )?;
        let pr = Self::lookup("pr", inputs, &[Source::Override(args.pr())]).unwrap_or_default();
        let slug = self.require(
            "slug",
            inputs,
            &[Source::Override(args.slug())],
            GitSource::RemoteSlug,
        )?;

        info!(
            "Resolved local service params: branch={}, commit={}, slug={}, pr={:?}",
            branch, commit, slug, pr
        );

        Ok(ServiceParams {
            branch,
            commit,
            pr,
            slug,
            ..ServiceParams::default()
        })
    }
}
