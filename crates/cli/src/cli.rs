use crate::logging::{LogLevel, TracingFormat};
use clap::Parser;
use covup_core::UploaderArgs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "covup")]
#[command(about = "Resolve the branch, commit and repository slug for a coverage upload")]
#[command(long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(short = 'B', long, help = "Specify the branch manually")]
    pub branch: Option<String>,

    #[arg(short = 'C', long, help = "Specify the commit SHA manually")]
    pub sha: Option<String>,

    #[arg(short = 'P', long, help = "Specify the pull request number manually")]
    pub pr: Option<String>,

    #[arg(short = 'r', long, help = "Specify the repository slug (owner/repo) manually")]
    pub slug: Option<String>,

    #[arg(
        long,
        value_name = "PATH",
        help = "Run git in this directory instead of the current one"
    )]
    pub dir: Option<PathBuf>,

    #[arg(
        short = 'l',
        long,
        help = "Set logging level",
        default_value = "warn",
        value_enum
    )]
    pub level: LogLevel,

    #[arg(long, help = "Log output format", default_value = "compact", value_enum)]
    pub log_format: TracingFormat,

    #[arg(
        long,
        value_name = "DIRECTIVES",
        help = "Tracing filter directives (e.g. covup_ci=trace); overrides --level and RUST_LOG"
    )]
    pub log_filter: Option<String>,
}

impl Cli {
    /// Overrides to hand to the service providers.
    pub fn uploader_args(&self) -> UploaderArgs {
        UploaderArgs {
            branch: self.branch.clone(),
            pr: self.pr.clone(),
            sha: self.sha.clone(),
            slug: self.slug.clone(),
        }
    }
}
