//! SSH runner
//!
//! Runs commands on the target host by spawning the system `ssh` binary.
//! Elevation, user switching and working directories are expressed in the
//! remote shell line; file transfers stream through the elevated session
//! (`cat` on the remote side) so root-owned paths work without staging.

use std::io::Write;
use std::process::{Command, Stdio};

use super::{RemoteCommand, Runner};
use crate::error::{DeckhandError, DeckhandResult};

/// Runner backed by the system `ssh` binary
///
/// SSH authentication (keys, agent forwarding) is whatever the operator's
/// ssh configuration provides; Deckhand passes nothing of its own.
pub struct SshRunner {
    host: String,
    login: String,
    quiet: bool,
}

impl SshRunner {
    pub fn new(host: &str, login: &str, quiet: bool) -> Self {
        Self {
            host: host.to_string(),
            login: login.to_string(),
            quiet,
        }
    }

    /// Check if ssh is installed and available
    pub fn check_available() -> bool {
        // ssh without args returns non-zero, but if we can spawn it, it's available
        Command::new("ssh")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok()
    }

    fn target(&self) -> String {
        format!("{}@{}", self.login, self.host)
    }
}

impl Runner for SshRunner {
    fn username(&self) -> &str {
        &self.login
    }

    fn execute(&mut self, command: &RemoteCommand) -> DeckhandResult<i32> {
        let mut cmd = Command::new("ssh");
        if command.is_interactive() {
            // Force a tty so password and certificate prompts reach the operator
            cmd.arg("-t");
        }
        cmd.arg(self.target());
        cmd.arg(remote_line(command));
        cmd.stdin(Stdio::inherit());

        if self.quiet && !command.is_interactive() {
            cmd.stdout(Stdio::null()).stderr(Stdio::null());
        } else {
            cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        }

        let status = cmd.status().map_err(|e| DeckhandError::Connection {
            message: e.to_string(),
        })?;

        Ok(status.code().unwrap_or(-1))
    }

    fn upload(&mut self, contents: &[u8], remote_path: &str) -> DeckhandResult<()> {
        let line = format!(
            "sudo sh -c {}",
            shell_quote(&format!("cat > {}", shell_quote(remote_path)))
        );

        let mut child = Command::new("ssh")
            .arg(self.target())
            .arg(line)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| DeckhandError::Connection {
                message: e.to_string(),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(contents)
                .map_err(|e| DeckhandError::UploadFailed {
                    path: remote_path.to_string(),
                    message: e.to_string(),
                })?;
        }

        let status = child.wait().map_err(|e| DeckhandError::Connection {
            message: e.to_string(),
        })?;

        if !status.success() {
            return Err(DeckhandError::UploadFailed {
                path: remote_path.to_string(),
                message: format!("remote write exited with status {:?}", status.code()),
            });
        }

        Ok(())
    }

    fn fetch(&mut self, remote_path: &str) -> DeckhandResult<Vec<u8>> {
        let output = Command::new("ssh")
            .arg(self.target())
            .arg(format!("sudo cat {}", shell_quote(remote_path)))
            .stdin(Stdio::null())
            .output()
            .map_err(|e| DeckhandError::Connection {
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(DeckhandError::DownloadFailed {
                path: remote_path.to_string(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(output.stdout)
    }
}

/// Compose the remote shell line for one command: sudo (optionally to a
/// specific user), then the command inside `sh -c`, prefixed with a `cd`
/// when a working directory was requested.
fn remote_line(command: &RemoteCommand) -> String {
    let body = match command.dir() {
        Some(dir) => format!("cd {} && {}", shell_quote(dir), command.command()),
        None => command.command().to_string(),
    };

    match command.user() {
        Some(user) => format!("sudo -u {} sh -c {}", user, shell_quote(&body)),
        None => format!("sudo sh -c {}", shell_quote(&body)),
    }
}

/// Quote a string for the remote shell (simple single-quote escaping)
fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}
