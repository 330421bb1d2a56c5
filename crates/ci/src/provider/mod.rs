//! Service provider abstraction and selection.

use async_trait::async_trait;
use covup_core::{Error, Result, ServiceParams, UploaderInputs};
use tracing::{debug, info};

/// Resolves commit identity for one kind of execution environment.
#[async_trait]
pub trait ServiceProvider: Send + Sync {
    /// Human readable provider name
    fn name(&self) -> &'static str;

    /// Whether this provider applies to the current environment
    fn detect(&self, inputs: &UploaderInputs) -> bool;

    /// Environment variables this provider reads
    fn env_var_names(&self) -> &'static [&'static str];

    /// Resolve the parameters identifying the commit being uploaded
    async fn service_params(&self, inputs: &UploaderInputs) -> Result<ServiceParams>;
}

/// Providers in the order they are tried.
#[must_use]
pub fn default_providers() -> Vec<Box<dyn ServiceProvider>> {
    vec![Box::new(local::LocalProvider::new())]
}

/// Resolve parameters with the first provider that detects its environment.
///
/// A provider that is detected but fails to resolve ends the search; its
/// error is returned as-is.
///
/// # Errors
/// Returns [`Error::NoProviderDetected`] if no provider applies, or the
/// resolution error of the provider that was selected.
pub async fn detect_provider(
    inputs: &UploaderInputs,
    providers: &[Box<dyn ServiceProvider>],
) -> Result<ServiceParams> {
    for provider in providers {
        if !provider.detect(inputs) {
            debug!(provider = provider.name(), "Provider not detected");
            continue;
        }

        info!(provider = provider.name(), "Detected service provider");
        return provider.service_params(inputs).await;
    }

    Err(Error::NoProviderDetected)
}

pub mod local;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedGit;
    use covup_core::UploaderArgs;
    use local::LocalProvider;

    fn overrides() -> UploaderInputs {
        UploaderInputs {
            args: UploaderArgs {
                branch: Some("main".to_string()),
                pr: Some("7".to_string()),
                sha: Some("abc123".to_string()),
                slug: Some("owner/repo".to_string()),
            },
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn no_providers_detected() {
        let providers: Vec<Box<dyn ServiceProvider>> = vec![Box::new(LocalProvider::with_git(
            ScriptedGit::unavailable(),
        ))];
        let err = detect_provider(&overrides(), &providers)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NoProviderDetected));
    }

    #[tokio::test]
    async fn empty_provider_list() {
        let err = detect_provider(&overrides(), &[]).await.unwrap_err();
        assert!(matches!(err, Error::NoProviderDetected));
    }

    #[tokio::test]
    async fn first_detected_provider_wins() {
        let providers: Vec<Box<dyn ServiceProvider>> = vec![
            Box::new(LocalProvider::with_git(ScriptedGit::unavailable())),
            Box::new(LocalProvider::with_git(ScriptedGit::new())),
        ];
        let params = detect_provider(&overrides(), &providers).await.unwrap();
        assert_eq!(params.commit, "abc123");
        assert_eq!(params.pr, "7");
    }

    #[tokio::test]
    async fn resolution_failure_is_returned() {
        let providers: Vec<Box<dyn ServiceProvider>> =
            vec![Box::new(LocalProvider::with_git(ScriptedGit::new()))];
        let err = detect_provider(&UploaderInputs::default(), &providers)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::GitCommandFailed {
                field: "branch",
                ..
            }
        ));
    }

    #[test]
    fn default_providers_include_local() {
        let names: Vec<_> = default_providers().iter().map(|p| p.name()).collect();
        assert_eq!(names, ["Local"]);
    }
}
