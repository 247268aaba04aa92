//! Reverse-proxy configuration: Apache with mod_jk
//!
//! Assumes the extracted release (see `artifact::download`) is present; the
//! connector module config, workers file and both site configs come from
//! its debian/ directory.

use crate::config::Config;
use crate::error::DeckhandResult;
use crate::runner::{RemoteCommand, Runner};

use super::progress;

const APACHE_DIR: &str = "/etc/apache2";

/// Replace the mod_jk configuration and workers file with the bundled
/// versions, enable the required modules, swap the default site for the
/// Metacat sites, and restart apache2.
pub fn configure_apache(runner: &mut dyn Runner, config: &Config) -> DeckhandResult<()> {
    progress("Configuring Apache2...");

    let debian = format!("{}/debian", config.package_dir());
    let commands = [
        "cp ./mods-available/jk.conf ./mods-available/jk.conf.original".to_string(),
        format!("cp {debian}/jk.conf ./mods-available/jk.conf"),
        format!("cp {debian}/workers.properties ."),
        "a2enmod --quiet ssl rewrite jk".to_string(),
        "a2dissite --quiet 000-default".to_string(),
        format!("cp {debian}/metacat-site.conf ./sites-available/metacat-site.conf"),
        format!("cp {debian}/metacat-site-ssl.conf ./sites-available/metacat-site-ssl.conf"),
        "a2ensite --quiet metacat-site".to_string(),
        "service apache2 restart".to_string(),
    ];

    for command in &commands {
        runner.run(&RemoteCommand::new(command.as_str()).in_dir(APACHE_DIR))?;
    }
    Ok(())
}
