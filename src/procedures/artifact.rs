//! Artifact retrieval: download and extract the pinned Metacat release

use crate::config::Config;
use crate::error::DeckhandResult;
use crate::runner::{RemoteCommand, Runner};

use super::progress;

/// Create the versioned directory under the service account's home,
/// download and extract the release archive, then point the bundled SSL
/// site config at tomcat7 instead of tomcat6.
pub fn download(runner: &mut dyn Runner, config: &Config) -> DeckhandResult<()> {
    progress(&format!("Downloading {}...", config.package));

    let dir = config.package_dir();
    runner.run(&RemoteCommand::new(format!("mkdir -p {dir}")).as_user("metacat"))?;
    runner.run(
        &RemoteCommand::new(format!("wget {}", config.package_url()))
            .as_user("metacat")
            .in_dir(&dir),
    )?;
    runner.run(
        &RemoteCommand::new(format!("tar xfz {}.tar.gz", config.package))
            .as_user("metacat")
            .in_dir(&dir),
    )?;
    runner.run(
        &RemoteCommand::new("sed -i 's/tomcat6/tomcat7/' metacat-site-ssl.conf")
            .as_user("metacat")
            .in_dir(&format!("{dir}/debian")),
    )?;
    Ok(())
}
