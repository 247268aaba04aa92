//! Host maintenance: OS patching and reboots
//!
//! The reboot drops the ssh session, so the reboot command itself runs in
//! warn-only mode: its non-zero exit is logged and does not abort the run.

use crate::error::DeckhandResult;
use crate::runner::{RemoteCommand, Runner};

use super::progress;

/// Apply all pending OS patches, then reboot
pub fn patch(runner: &mut dyn Runner) -> DeckhandResult<()> {
    progress("Doing Ubuntu system patch and reboot...");
    runner.run(&RemoteCommand::new("apt update --yes"))?;
    runner.run(&RemoteCommand::new("apt dist-upgrade --yes"))?;
    runner.run(&RemoteCommand::new("apt autoremove --yes"))?;
    runner.run(&RemoteCommand::new("reboot").warn_only())?;
    Ok(())
}

/// Reboot only
pub fn reboot(runner: &mut dyn Runner) -> DeckhandResult<()> {
    progress("Doing Ubuntu system reboot...");
    runner.run(&RemoteCommand::new("reboot").warn_only())?;
    Ok(())
}
