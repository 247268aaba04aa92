//! Deckhand CLI - remote provisioning tool for DataONE Metacat member nodes
//!
//! Usage: deckhand --host <HOST> <COMMAND>
//!
//! Commands:
//!   deploy              Run the full provisioning sequence
//!   patch               Apply OS patches and reboot
//!   configure-postgres  Configure the PostgreSQL role and database
//!   add-local-ca        Bootstrap the local certificate authority

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use deckhand::config::Config;
use deckhand::procedures;
use deckhand::runner::SshRunner;

/// Deckhand - provision a Metacat member node over ssh
#[derive(Parser, Debug)]
#[command(name = "deckhand")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Target host to provision
    #[arg(short = 'H', long)]
    host: String,

    /// Login user for the ssh session (defaults to $USER)
    #[arg(short, long)]
    login: Option<String>,

    /// Artifact name/version to deploy (e.g. metacat-bin-2.8.4)
    #[arg(short, long)]
    package: Option<String>,

    /// Suppress remote command output for non-interactive commands
    #[arg(short, long)]
    quiet: bool,

    /// Skip the confirmation prompt before deploy
    #[arg(short, long)]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the full provisioning sequence against the target host
    Deploy,

    /// Apply all pending OS patches and reboot
    Patch,

    /// Reboot the target host
    Reboot,

    /// Install the operating system tool chain
    Packages,

    /// Create the metacat service account
    AddUser,

    /// Install the deploying user's sudoers fragment
    AddSudoers,

    /// Download and extract the pinned release archive
    Download,

    /// Configure the PostgreSQL role, database and access rule
    ConfigurePostgres,

    /// Rewrite the Tomcat connector config and slash handling
    ConfigureTomcat,

    /// Configure Apache with mod_jk and the Metacat sites
    ConfigureApache,

    /// Install the web application and restart Tomcat
    Install,

    /// Bootstrap the local certificate authority
    AddLocalCa,

    /// Issue a client certificate signed by the local CA
    AddClientCert,

    /// Install the local CA certificate into the trust directory
    TrustLocalCa,

    /// Install the issued client certificate and key
    InstallClientCert,

    /// Install the snake-oil fallback server certificate
    InstallServerCert,

    /// Regenerate the snake-oil pair (after a hostname/IP change)
    MakeSslCert,

    /// Bootstrap certificates per the use_local_ca setting
    Certificates,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_or_default(None);
    config.apply_env_overrides();
    if let Some(package) = cli.package {
        config.package = package;
    }
    if cli.quiet {
        config.quiet = true;
    }

    if !SshRunner::check_available() {
        bail!("ssh not found; install an OpenSSH client first");
    }

    let login = match cli.login {
        Some(login) => login,
        None => std::env::var("USER").context("cannot determine login user; pass --login")?,
    };

    let mut runner = SshRunner::new(&cli.host, &login, config.quiet);

    match cli.command {
        Commands::Deploy => {
            if !cli.yes {
                let confirmed = dialoguer::Confirm::new()
                    .with_prompt(format!(
                        "This will patch, reboot and reconfigure {}. Continue?",
                        cli.host
                    ))
                    .default(false)
                    .interact()?;
                if !confirmed {
                    println!("Aborted.");
                    return Ok(());
                }
            }
            procedures::deploy(&mut runner, &config)?;
        }
        Commands::Patch => procedures::host::patch(&mut runner)?,
        Commands::Reboot => procedures::host::reboot(&mut runner)?,
        Commands::Packages => procedures::packages::add_tool_chain(&mut runner)?,
        Commands::AddUser => procedures::accounts::add_user(&mut runner)?,
        Commands::AddSudoers => procedures::sudoers::add_sudoers(&mut runner)?,
        Commands::Download => procedures::artifact::download(&mut runner, &config)?,
        Commands::ConfigurePostgres => procedures::postgres::configure_postgres(&mut runner)?,
        Commands::ConfigureTomcat => procedures::tomcat::configure_tomcat(&mut runner)?,
        Commands::ConfigureApache => procedures::apache::configure_apache(&mut runner, &config)?,
        Commands::Install => procedures::webapp::install(&mut runner, &config)?,
        Commands::AddLocalCa => procedures::certs::add_local_ca(&mut runner)?,
        Commands::AddClientCert => procedures::certs::add_client_cert(&mut runner)?,
        Commands::TrustLocalCa => procedures::certs::trust_local_ca(&mut runner)?,
        Commands::InstallClientCert => procedures::certs::install_client_cert(&mut runner)?,
        Commands::InstallServerCert => procedures::certs::install_server_cert(&mut runner)?,
        Commands::MakeSslCert => procedures::certs::make_ssl_cert(&mut runner)?,
        Commands::Certificates => procedures::certs::certificates(&mut runner, &config)?,
    }

    Ok(())
}
