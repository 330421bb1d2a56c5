//! Scripted git double for provider tests.

use crate::git::{GitError, GitRunner};
use std::collections::HashMap;
use std::sync::Mutex;

/// Answers git invocations from a fixed script and records every call.
///
/// Unscripted invocations fail the way a broken git would.
#[derive(Debug, Default)]
pub struct ScriptedGit {
    available: bool,
    responses: HashMap<Vec<String>, String>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl ScriptedGit {
    pub fn new() -> Self {
        Self {
            available: true,
            ..Default::default()
        }
    }

    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn respond(mut self, args: &[&str], stdout: &str) -> Self {
        self.responses.insert(to_key(args), stdout.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl GitRunner for ScriptedGit {
    fn probe(&self) -> bool {
        self.available
    }

    fn run(&self, args: &[&str]) -> Result<String, GitError> {
        let key = to_key(args);
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(key.clone());
        }
        self.responses.get(&key).cloned().ok_or_else(|| {
            GitError::Io(std::io::Error::other(format!(
                "no scripted response for git {}",
                args.join(" ")
            )))
        })
    }
}

fn to_key(args: &[&str]) -> Vec<String> {
    args.iter().map(|a| (*a).to_string()).collect()
}
