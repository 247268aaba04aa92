//! Database configuration: PostgreSQL role, database and access rule

use crate::error::DeckhandResult;
use crate::runner::{RemoteCommand, Runner};

use super::progress;

/// Host-based authentication file of the packaged PostgreSQL
pub const PG_HBA_CONF: &str = "/etc/postgresql/9.5/main/pg_hba.conf";

/// Rule granting the metacat role password-based local access
pub const PG_HBA_RULE: &str = "host metacat metacat 127.0.0.1 255.255.255.255 password";

/// Clear the system postgres password, set a new one interactively, create
/// the metacat role and database, then back up pg_hba.conf and append the
/// local access rule for the new role.
pub fn configure_postgres(runner: &mut dyn Runner) -> DeckhandResult<()> {
    progress("Configuring Postgresql...");
    runner.run(&RemoteCommand::new("passwd -d postgres"))?;
    runner.run(&RemoteCommand::new("passwd").as_user("postgres").interactive())?;
    runner.run(&RemoteCommand::new("createuser metacat").as_user("postgres"))?;
    runner.run(&RemoteCommand::new("createdb -E UTF8 metacat").as_user("postgres"))?;
    runner.run(
        &RemoteCommand::new(format!("cp {PG_HBA_CONF} {PG_HBA_CONF}.original"))
            .as_user("postgres"),
    )?;
    runner.run(
        &RemoteCommand::new(format!(r#"echo "{PG_HBA_RULE}" >> {PG_HBA_CONF}"#))
            .as_user("postgres"),
    )?;
    Ok(())
}
