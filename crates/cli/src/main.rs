//! covup: resolve commit identity for a coverage upload.

mod cli;
mod logging;

use clap::Parser;
use covup_ci::{LocalProvider, ServiceProvider, SystemGit, default_providers, detect_provider};
use covup_core::UploaderInputs;
use miette::IntoDiagnostic;
use std::io::Write;

use crate::cli::Cli;
use crate::logging::TracingConfig;

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    logging::init_tracing(TracingConfig {
        format: cli.log_format,
        level: cli.level.into(),
        filter: cli.log_filter.clone(),
    })?;

    let inputs = UploaderInputs::from_env(cli.uploader_args());

    let providers: Vec<Box<dyn ServiceProvider>> = match &cli.dir {
        Some(dir) => vec![Box::new(LocalProvider::with_git(SystemGit::in_dir(dir)))],
        None => default_providers(),
    };

    let params = detect_provider(&inputs, &providers).await?;

    let json = serde_json::to_string_pretty(&params).into_diagnostic()?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}")
        .map_err(|e| covup_core::Error::io(e, "write service params to stdout"))?;

    Ok(())
}
