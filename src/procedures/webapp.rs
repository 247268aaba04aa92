//! Application installation: deploy the Metacat war and restart Tomcat

use crate::config::Config;
use crate::error::DeckhandResult;
use crate::runner::{RemoteCommand, Runner};

use super::progress;

/// Create and chown the data directory, copy the war into the Tomcat
/// deployment directory, restart tomcat7.
pub fn install(runner: &mut dyn Runner, config: &Config) -> DeckhandResult<()> {
    progress(&format!("Installing {}...", config.package));
    runner.run(&RemoteCommand::new("mkdir -p /var/metacat"))?;
    runner.run(&RemoteCommand::new("chown -R tomcat7 /var/metacat"))?;
    runner.run(&RemoteCommand::new(format!(
        "cp {}/metacat.war /var/lib/tomcat7/webapps",
        config.package_dir()
    )))?;
    runner.run(&RemoteCommand::new("service tomcat7 restart"))?;
    Ok(())
}
