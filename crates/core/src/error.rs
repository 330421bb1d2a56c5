//! Error types for service parameter resolution

use miette::Diagnostic;
use thiserror::Error;

/// Boxed cause attached to errors raised by an underlying subprocess.
pub type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while detecting a provider or resolving its parameters
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    /// A git subcommand needed for a field failed or produced no usable output
    #[error("Failed to resolve {field} using `git {command}`: {source}")]
    #[diagnostic(
        code(covup::git::command_failed),
        help(
            "Run inside a git checkout, or pass the value explicitly (--branch, --sha, --slug)"
        )
    )]
    GitCommandFailed {
        /// Name of the field being resolved
        field: &'static str,
        /// Arguments passed to git, space separated
        command: String,
        /// Underlying subprocess failure
        #[source]
        source: BoxedCause,
    },

    /// The remote URL could not be converted into `owner/repo`
    #[error("Unable to parse a repository slug from remote URL '{url}'")]
    #[diagnostic(
        code(covup::slug::parse),
        help(
            "Expected a remote such as git@host:owner/repo.git or https://host/owner/repo.git; pass --slug owner/repo to override"
        )
    )]
    SlugParseFailed {
        /// The remote URL as reported by git
        url: String,
    },

    /// None of the registered providers matched this environment
    #[error("No service provider detected")]
    #[diagnostic(
        code(covup::provider::none),
        help("Install git, or run inside a supported CI environment")
    )]
    NoProviderDetected,

    /// I/O failure outside of git invocation
    #[error("I/O operation failed: {operation}")]
    #[diagnostic(code(covup::io))]
    Io {
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
        /// What was being attempted
        operation: String,
    },
}

impl Error {
    /// Create a git command failure for `field`
    #[must_use]
    pub fn git_command_failed(
        field: &'static str,
        args: &[&str],
        source: impl Into<BoxedCause>,
    ) -> Self {
        Self::GitCommandFailed {
            field,
            command: args.join(" "),
            source: source.into(),
        }
    }

    /// Create a slug parse failure
    #[must_use]
    pub fn slug_parse(url: impl Into<String>) -> Self {
        Self::SlugParseFailed { url: url.into() }
    }

    /// Create an I/O error with context
    #[must_use]
    pub fn io(source: std::io::Error, operation: impl Into<String>) -> Self {
        Self::Io {
            source,
            operation: operation.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::io(source, "unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use miette::Diagnostic;

    #[test]
    fn git_command_failed_names_field_and_command() {
        let error = Error::git_command_failed(
            "branch",
            &["rev-parse", "--abbrev-ref", "HEAD"],
            "fatal: not a git repository",
        );
        assert_eq!(
            error.to_string(),
            "Failed to resolve branch using `git rev-parse --abbrev-ref HEAD`: fatal: not a git repository"
        );
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn diagnostic_codes() {
        let code = |e: &Error| e.code().map(|c| c.to_string());
        assert_eq!(
            code(&Error::slug_parse("notaurl")).as_deref(),
            Some("covup::slug::parse")
        );
        assert_eq!(
            code(&Error::NoProviderDetected).as_deref(),
            Some("covup::provider::none")
        );
    }
}
