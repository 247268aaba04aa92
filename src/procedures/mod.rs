//! Provisioning procedures
//!
//! One module per concern. Each public function issues a fixed sequence of
//! remote commands through the [`Runner`] seam, prints one progress line
//! first, and stops at the first non-tolerated non-zero exit. There are no
//! retries, no rollback and no idempotency guards: re-running a procedure
//! against an already-configured host may error or duplicate configuration.
//!
//! Procedures assume the side effects of earlier procedures (installed
//! packages, created directories) are present; nothing verifies that.

pub mod accounts;
pub mod apache;
pub mod artifact;
pub mod certs;
pub mod host;
pub mod packages;
pub mod postgres;
pub mod sudoers;
pub mod tomcat;
pub mod webapp;

use is_terminal::IsTerminal;

use crate::config::Config;
use crate::error::DeckhandResult;
use crate::runner::Runner;

/// Print one informational progress line before a procedure starts
pub(crate) fn progress(message: &str) {
    if std::io::stderr().is_terminal() {
        eprintln!("\x1b[1m==> {message}\x1b[0m");
    } else {
        eprintln!("==> {message}");
    }
}

/// Run the full deployment: patch, packages, service account, sudoers,
/// artifact download, PostgreSQL, Apache, Tomcat, application install.
/// Fixed order, no rollback on partial failure.
pub fn deploy(runner: &mut dyn Runner, config: &Config) -> DeckhandResult<()> {
    host::patch(runner)?;
    packages::add_tool_chain(runner)?;
    accounts::add_user(runner)?;
    sudoers::add_sudoers(runner)?;
    artifact::download(runner, config)?;
    postgres::configure_postgres(runner)?;
    apache::configure_apache(runner, config)?;
    tomcat::configure_tomcat(runner)?;
    webapp::install(runner, config)?;
    Ok(())
}
