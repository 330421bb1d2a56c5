//! Git subprocess invocation.
//!
//! Providers never spawn git directly; they go through a [`GitRunner`] so the
//! subprocess can be replaced in tests. [`SystemGit`] is the production runner
//! and caps how much output it will buffer from a single invocation.

use miette::Diagnostic;
use std::ffi::OsString;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use thiserror::Error;
use tracing::debug;

/// Maximum bytes of stdout buffered from one git invocation (100 MiB).
pub const MAX_OUTPUT_BYTES: usize = 100 * 1024 * 1024;

/// Stderr is only kept for error messages.
const MAX_STDERR_BYTES: usize = 64 * 1024;

/// Errors from a single git invocation
#[derive(Debug, Error, Diagnostic)]
pub enum GitError {
    /// The executable could not be found or started
    #[error("failed to launch `{program}`: {source}")]
    #[diagnostic(
        code(covup::git::spawn),
        help("Ensure git is installed and available on PATH")
    )]
    Spawn {
        /// Program that was launched
        program: String,
        /// Underlying spawn error
        #[source]
        source: io::Error,
    },

    /// Git ran but reported a failure
    #[error("git failed ({status}): {stderr}")]
    #[diagnostic(code(covup::git::failed))]
    Failed {
        /// Exit status of the process
        status: ExitStatus,
        /// Trimmed stderr output
        stderr: String,
    },

    /// Stdout grew past the configured limit
    #[error("git output exceeded {limit} bytes")]
    #[diagnostic(code(covup::git::output_too_large))]
    OutputTooLarge {
        /// Limit that was exceeded
        limit: usize,
    },

    /// Git succeeded but printed nothing usable
    #[error("git produced no output")]
    #[diagnostic(code(covup::git::empty_output))]
    EmptyOutput,

    /// Reading from the child process failed
    #[error("failed to read git output: {0}")]
    #[diagnostic(code(covup::git::io))]
    Io(#[from] io::Error),
}

/// Runs git subcommands on behalf of a provider.
pub trait GitRunner: Send + Sync {
    /// Whether the git executable can be launched at all.
    fn probe(&self) -> bool;

    /// Run git with `args` and return its raw stdout.
    ///
    /// # Errors
    /// Returns an error if git cannot be launched, exits unsuccessfully, or
    /// produces more output than the runner allows.
    fn run(&self, args: &[&str]) -> Result<String, GitError>;

    /// Run git with `args` and return its trimmed, non-empty stdout.
    ///
    /// # Errors
    /// Everything [`GitRunner::run`] can return, plus
    /// [`GitError::EmptyOutput`] when stdout is blank.
    fn query(&self, args: &[&str]) -> Result<String, GitError> {
        let output = self.run(args)?;
        let trimmed = output.trim();
        if trimmed.is_empty() {
            return Err(GitError::EmptyOutput);
        }
        Ok(trimmed.to_string())
    }
}

/// Runs the git executable found on `PATH`.
#[derive(Debug, Clone)]
pub struct SystemGit {
    program: OsString,
    dir: Option<PathBuf>,
    max_output: usize,
}

impl Default for SystemGit {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemGit {
    /// Run `git` in the current working directory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            program: OsString::from("git"),
            dir: None,
            max_output: MAX_OUTPUT_BYTES,
        }
    }

    /// Run `git` inside `dir` instead of the current working directory.
    ///
    /// The availability probe ignores the directory.
    #[must_use]
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
            ..Self::new()
        }
    }

    /// Use a different executable in place of `git`.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<OsString>) -> Self {
        self.program = program.into();
        self
    }

    /// Change the stdout limit.
    #[must_use]
    pub const fn with_max_output(mut self, limit: usize) -> Self {
        self.max_output = limit;
        self
    }

    fn program_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }
}

impl GitRunner for SystemGit {
    fn probe(&self) -> bool {
        // Bare `git` prints usage and exits non-zero; only a launch failure counts.
        match Command::new(&self.program)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
        {
            Ok(_) => true,
            Err(e) => {
                debug!(program = %self.program_name(), error = %e, "git is not available");
                false
            }
        }
    }

    fn run(&self, args: &[&str]) -> Result<String, GitError> {
        debug!(?args, dir = ?self.dir, "Running git");

        let mut command = Command::new(&self.program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.dir {
            command.current_dir(dir);
        }

        let mut child = command.spawn().map_err(|source| GitError::Spawn {
            program: self.program_name(),
            source,
        })?;

        let stderr_reader = child
            .stderr
            .take()
            .map(|pipe| thread::spawn(move || drain_bounded(pipe, MAX_STDERR_BYTES)));

        let stdout = match child.stdout.take() {
            Some(pipe) => read_bounded(pipe, self.max_output),
            None => Ok(Vec::new()),
        };
        let stdout = match stdout {
            Ok(bytes) if bytes.len() <= self.max_output => bytes,
            result => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(match result {
                    Err(e) => GitError::Io(e),
                    Ok(_) => GitError::OutputTooLarge {
                        limit: self.max_output,
                    },
                });
            }
        };

        let status = child.wait()?;
        let stderr = stderr_reader
            .and_then(|handle| handle.join().ok())
            .and_then(Result::ok)
            .unwrap_or_default();

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr).trim().to_string();
            debug!(?args, %status, %stderr, "git exited unsuccessfully");
            return Err(GitError::Failed { status, stderr });
        }

        Ok(String::from_utf8_lossy(&stdout).into_owned())
    }
}

/// Read at most `limit + 1` bytes so the caller can tell whether the limit was crossed.
fn read_bounded(pipe: impl Read, limit: usize) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let cap = u64::try_from(limit).unwrap_or(u64::MAX).saturating_add(1);
    pipe.take(cap).read_to_end(&mut buf)?;
    Ok(buf)
}

/// Keep the first `limit` bytes and discard the rest so the child never blocks on a full pipe.
fn drain_bounded(mut pipe: impl Read, limit: usize) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let cap = u64::try_from(limit).unwrap_or(u64::MAX);
    (&mut pipe).take(cap).read_to_end(&mut buf)?;
    io::copy(&mut pipe, &mut io::sink())?;
    Ok(buf)
}
