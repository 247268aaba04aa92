//! Account provisioning for the metacat service user

use crate::error::DeckhandResult;
use crate::runner::{RemoteCommand, Runner};

use super::progress;

/// Create the metacat service account in the tomcat7 group and add it to
/// www-data. `adduser` prompts for the account password, so both commands
/// keep the operator's terminal attached.
pub fn add_user(runner: &mut dyn Runner) -> DeckhandResult<()> {
    progress("Adding user metacat...");
    runner.run(
        &RemoteCommand::new(r#"adduser --ingroup tomcat7 --gecos "Metacat" metacat"#)
            .interactive(),
    )?;
    runner.run(&RemoteCommand::new("adduser metacat www-data").interactive())?;
    Ok(())
}
