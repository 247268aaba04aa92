//! Common test utilities for Deckhand integration tests.
//!
//! Provides `ScriptedRunner`, a recording stand-in for the ssh-backed
//! runner: it captures every command, upload, fetch and download in order,
//! returns programmed exit codes for commands matching a pattern, and
//! serves staged file contents for fetches.
#![allow(dead_code)]

pub mod fixtures;

use std::collections::HashMap;
use std::path::Path;

use deckhand::error::{DeckhandError, DeckhandResult};
use deckhand::runner::{RemoteCommand, Runner};

/// One recorded interaction with the runner
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Run(RemoteCommand),
    Upload { path: String, contents: Vec<u8> },
    Fetch { path: String },
    Download { remote: String, local: String },
}

pub struct ScriptedRunner {
    pub calls: Vec<Call>,
    username: String,
    failures: Vec<(String, i32)>,
    staged: HashMap<String, Vec<u8>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::with_username("deployer")
    }

    pub fn with_username(username: &str) -> Self {
        Self {
            calls: Vec::new(),
            username: username.to_string(),
            failures: Vec::new(),
            staged: HashMap::new(),
        }
    }

    /// Program commands containing `pattern` to exit with `code`
    pub fn fail_matching(&mut self, pattern: &str, code: i32) {
        self.failures.push((pattern.to_string(), code));
    }

    /// Serve `contents` for fetches of `remote_path`
    pub fn stage_file(&mut self, remote_path: &str, contents: &[u8]) {
        self.staged.insert(remote_path.to_string(), contents.to_vec());
    }

    /// Executed command strings, in order
    pub fn commands(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Run(cmd) => Some(cmd.command().to_string()),
                _ => None,
            })
            .collect()
    }

    /// Executed commands, in order, with their full context
    pub fn run_calls(&self) -> Vec<&RemoteCommand> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Run(cmd) => Some(cmd),
                _ => None,
            })
            .collect()
    }

    /// Position in `calls` of the first executed command containing `pattern`
    pub fn position_of_command(&self, pattern: &str) -> Option<usize> {
        self.calls.iter().position(|call| match call {
            Call::Run(cmd) => cmd.command().contains(pattern),
            _ => false,
        })
    }

    /// Position in `calls` of the first upload to `path`
    pub fn position_of_upload(&self, path: &str) -> Option<usize> {
        self.calls.iter().position(|call| match call {
            Call::Upload { path: p, .. } => p == path,
            _ => false,
        })
    }

    /// Contents of the first upload to `path`
    pub fn uploaded_contents(&self, path: &str) -> Option<&[u8]> {
        self.calls.iter().find_map(|call| match call {
            Call::Upload { path: p, contents } if p == path => Some(contents.as_slice()),
            _ => None,
        })
    }

    pub fn downloads(&self) -> Vec<(String, String)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Download { remote, local } => Some((remote.clone(), local.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn ran(&self, pattern: &str) -> bool {
        self.position_of_command(pattern).is_some()
    }
}

impl Default for ScriptedRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl Runner for ScriptedRunner {
    fn username(&self) -> &str {
        &self.username
    }

    fn execute(&mut self, command: &RemoteCommand) -> DeckhandResult<i32> {
        self.calls.push(Call::Run(command.clone()));
        for (pattern, code) in &self.failures {
            if command.command().contains(pattern.as_str()) {
                return Ok(*code);
            }
        }
        Ok(0)
    }

    fn upload(&mut self, contents: &[u8], remote_path: &str) -> DeckhandResult<()> {
        self.calls.push(Call::Upload {
            path: remote_path.to_string(),
            contents: contents.to_vec(),
        });
        Ok(())
    }

    fn fetch(&mut self, remote_path: &str) -> DeckhandResult<Vec<u8>> {
        self.calls.push(Call::Fetch {
            path: remote_path.to_string(),
        });
        self.staged
            .get(remote_path)
            .cloned()
            .ok_or_else(|| DeckhandError::DownloadFailed {
                path: remote_path.to_string(),
                message: "no such staged file".to_string(),
            })
    }

    // Record instead of writing to the invoking machine's filesystem
    fn download(&mut self, remote_path: &str, local_path: &Path) -> DeckhandResult<()> {
        self.calls.push(Call::Download {
            remote: remote_path.to_string(),
            local: local_path.display().to_string(),
        });
        Ok(())
    }
}
