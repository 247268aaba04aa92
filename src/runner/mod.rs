//! Remote command runner
//!
//! Defines the seam between the provisioning procedures and the machinery
//! that actually executes commands on the target host. Procedures only ever
//! talk to a [`Runner`]; the shipped implementation ([`SshRunner`]) shells
//! out to the system `ssh`, and tests substitute a scripted recorder.

mod ssh;

pub use ssh::SshRunner;

use std::io::Write;
use std::path::Path;

use crate::error::{DeckhandError, DeckhandResult};

/// One elevated command to run on the target host.
///
/// Carries the command string plus the execution context the original
/// session settings expressed: an optional remote user to run as, an
/// optional remote working directory, whether a non-zero exit is tolerated,
/// and whether the command needs the operator's terminal (password entry,
/// certificate prompts).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteCommand {
    command: String,
    user: Option<String>,
    dir: Option<String>,
    warn_only: bool,
    interactive: bool,
}

impl RemoteCommand {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            user: None,
            dir: None,
            warn_only: false,
            interactive: false,
        }
    }

    /// Run as a specific remote user instead of root
    pub fn as_user(mut self, user: &str) -> Self {
        self.user = Some(user.to_string());
        self
    }

    /// Run inside a specific remote working directory
    pub fn in_dir(mut self, dir: &str) -> Self {
        self.dir = Some(dir.to_string());
        self
    }

    /// Tolerate a non-zero exit: log it and continue
    pub fn warn_only(mut self) -> Self {
        self.warn_only = true;
        self
    }

    /// Attach the operator's terminal regardless of quiet mode
    pub fn interactive(mut self) -> Self {
        self.interactive = true;
        self
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn dir(&self) -> Option<&str> {
        self.dir.as_deref()
    }

    pub fn is_warn_only(&self) -> bool {
        self.warn_only
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }
}

/// Executes commands on, and transfers files to and from, one target host
/// over an authenticated session.
pub trait Runner {
    /// Username of the invoking session (used for sudoers templating)
    fn username(&self) -> &str;

    /// Execute one elevated command and return its exit status.
    ///
    /// Implementations report *transport* failures as errors; a non-zero
    /// exit of the command itself is a status, not an error. The fatal /
    /// tolerated distinction is applied uniformly by [`Runner::run`].
    fn execute(&mut self, command: &RemoteCommand) -> DeckhandResult<i32>;

    /// Upload file contents to a (possibly root-owned) remote path
    fn upload(&mut self, contents: &[u8], remote_path: &str) -> DeckhandResult<()>;

    /// Fetch the contents of a (possibly root-owned) remote file
    fn fetch(&mut self, remote_path: &str) -> DeckhandResult<Vec<u8>>;

    /// Execute one elevated command, mapping a non-zero exit to an error
    /// unless the command opted into warn-only mode.
    fn run(&mut self, command: &RemoteCommand) -> DeckhandResult<()> {
        let code = self.execute(command)?;
        if code == 0 {
            return Ok(());
        }
        if command.is_warn_only() {
            eprintln!(
                "warning: continuing past exit status {} of: {}",
                code,
                command.command()
            );
            return Ok(());
        }
        Err(DeckhandError::CommandFailed {
            command: command.command().to_string(),
            code,
        })
    }

    /// Download a remote file to a path on the invoking machine
    fn download(&mut self, remote_path: &str, local_path: &Path) -> DeckhandResult<()> {
        let contents = self.fetch(remote_path)?;
        let mut file = std::fs::File::create(local_path)?;
        file.write_all(&contents)?;
        Ok(())
    }
}
