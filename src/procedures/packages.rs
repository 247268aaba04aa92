//! Package provisioning

use crate::error::DeckhandResult;
use crate::runner::{RemoteCommand, Runner};

use super::progress;

/// Fixed tool chain the member node stack is built from
pub const TOOL_CHAIN: &str = "build-essential openjdk-8-jdk tomcat7 apache2 \
libapache2-mod-jk postgresql-9.5 openssl curl";

/// Install the operating system tool chain
pub fn add_tool_chain(runner: &mut dyn Runner) -> DeckhandResult<()> {
    progress("Adding operating system tools...");
    runner.run(&RemoteCommand::new(format!("apt install --yes {TOOL_CHAIN}")))?;
    Ok(())
}
