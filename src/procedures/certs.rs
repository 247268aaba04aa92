//! Certificate authority bootstrap, client certificate issuance, trust
//! installation and the snake-oil fallback pair
//!
//! The openssl key and signing steps prompt the operator (passphrases,
//! subject fields, sign/commit confirmations), so they keep the terminal
//! attached.

use std::path::Path;

use crate::config::Config;
use crate::error::DeckhandResult;
use crate::runner::{RemoteCommand, Runner};

use super::progress;

/// Local CA directory on the target host
pub const LOCAL_CA_DIR: &str = "/var/local/dataone/certs/local_ca";

/// OpenSSL config template deployed with the GMN virtualenv
const OPENSSL_CNF_SOURCE: &str =
    "/var/local/dataone/gmn_venv/lib/python2.7/site-packages/d1_gmn/deployment/openssl.cnf";

/// Create the three-level CA directory layout, seed the OpenSSL config and
/// index file, then generate a self-signed CA key/certificate pair.
pub fn add_local_ca(runner: &mut dyn Runner) -> DeckhandResult<()> {
    progress("Making local CA...");
    runner.run(&RemoteCommand::new(format!("mkdir -p {LOCAL_CA_DIR}/certs")))?;
    runner.run(&RemoteCommand::new(format!("mkdir -p {LOCAL_CA_DIR}/newcerts")))?;
    runner.run(&RemoteCommand::new(format!("mkdir -p {LOCAL_CA_DIR}/private")))?;
    runner.run(&RemoteCommand::new(format!("cp {OPENSSL_CNF_SOURCE} .")).in_dir(LOCAL_CA_DIR))?;
    runner.run(&RemoteCommand::new("touch index.txt").in_dir(LOCAL_CA_DIR))?;
    runner.run(
        &RemoteCommand::new(
            "openssl req -config ./openssl.cnf -new -newkey rsa:2048 \
             -keyout private/ca_key.pem -out ca_csr.pem",
        )
        .in_dir(LOCAL_CA_DIR)
        .interactive(),
    )?;
    runner.run(
        &RemoteCommand::new(
            "openssl ca -config ./openssl.cnf -create_serial -keyfile private/ca_key.pem \
             -selfsign -extensions v3_ca_has_san -out ca_cert.pem -infiles ca_csr.pem",
        )
        .in_dir(LOCAL_CA_DIR)
        .interactive(),
    )?;
    runner.run(&RemoteCommand::new("rm ca_csr.pem").in_dir(LOCAL_CA_DIR))?;
    Ok(())
}

/// Generate a client key and signing request, strip the key's passphrase,
/// derive the public key, sign the request with the local CA, then retrieve
/// the passphrase-free key and the certificate to the invoking machine.
pub fn add_client_cert(runner: &mut dyn Runner) -> DeckhandResult<()> {
    progress("Making self-signed client certificate...");
    runner.run(
        &RemoteCommand::new(
            "openssl req -config ./openssl.cnf -new -newkey rsa:2048 -nodes \
             -keyout private/client_key.pem -out client_csr.pem",
        )
        .in_dir(LOCAL_CA_DIR)
        .interactive(),
    )?;
    runner.run(
        &RemoteCommand::new(
            "openssl rsa -in private/client_key.pem -out private/client_key_nopassword.pem",
        )
        .in_dir(LOCAL_CA_DIR)
        .interactive(),
    )?;
    runner.run(
        &RemoteCommand::new(
            "openssl rsa -in private/client_key_nopassword.pem -pubout \
             -out client_public_key.pem",
        )
        .in_dir(LOCAL_CA_DIR)
        .interactive(),
    )?;
    runner.run(
        &RemoteCommand::new(
            "openssl ca -config ./openssl.cnf -in client_csr.pem -out client_cert.pem",
        )
        .in_dir(LOCAL_CA_DIR)
        .interactive(),
    )?;
    runner.download(
        &format!("{LOCAL_CA_DIR}/private/client_key_nopassword.pem"),
        Path::new("client_key_nopassword.pem"),
    )?;
    runner.download(
        &format!("{LOCAL_CA_DIR}/client_cert.pem"),
        Path::new("client_cert.pem"),
    )?;
    runner.run(&RemoteCommand::new("rm client_csr.pem").in_dir(LOCAL_CA_DIR))?;
    Ok(())
}

/// Copy the CA certificate into the trust directory and rehash it so the
/// proxy recognizes certificates it issued.
pub fn trust_local_ca(runner: &mut dyn Runner) -> DeckhandResult<()> {
    progress("Installing local CA trust...");
    runner.run(&RemoteCommand::new("mkdir -p ../ca").in_dir(LOCAL_CA_DIR))?;
    runner.run(&RemoteCommand::new("cp ca_cert.pem ../ca/local_ca.pem").in_dir(LOCAL_CA_DIR))?;
    runner.run(&RemoteCommand::new("c_rehash ../ca").in_dir(LOCAL_CA_DIR))?;
    Ok(())
}

/// Install the locally issued client certificate and passphrase-free key
/// into the client certificate directory.
pub fn install_client_cert(runner: &mut dyn Runner) -> DeckhandResult<()> {
    progress("Installing self-signed client certificate...");
    runner.run(&RemoteCommand::new("mkdir -p ../client").in_dir(LOCAL_CA_DIR))?;
    runner.run(
        &RemoteCommand::new("cp client_cert.pem private/client_key_nopassword.pem ../client")
            .in_dir(LOCAL_CA_DIR),
    )?;
    Ok(())
}

/// Install the distribution snake-oil certificate/key pair as the stand-in
/// server certificate.
pub fn install_server_cert(runner: &mut dyn Runner) -> DeckhandResult<()> {
    progress("Installing self-signed server certificate...");
    runner.run(&RemoteCommand::new("apt install --yes ssl-cert"))?;
    runner.run(&RemoteCommand::new("mkdir -p /var/local/dataone/certs/server"))?;
    runner.run(&RemoteCommand::new(
        "cp /etc/ssl/certs/ssl-cert-snakeoil.pem /var/local/dataone/certs/server/server_cert.pem",
    ))?;
    runner.run(&RemoteCommand::new(
        "cp /etc/ssl/private/ssl-cert-snakeoil.key \
         /var/local/dataone/certs/server/server_key_nopassword.pem",
    ))?;
    Ok(())
}

/// Regenerate the snake-oil pair. Only needed after the host name or IP
/// address changes; copy the new files to the standard locations afterwards
/// with `install-server-cert`.
pub fn make_ssl_cert(runner: &mut dyn Runner) -> DeckhandResult<()> {
    progress("Regenerating snake-oil server certificate...");
    runner.run(&RemoteCommand::new(
        "make-ssl-cert generate-default-snakeoil --force-overwrite",
    ))?;
    Ok(())
}

/// Certificate bootstrap convenience: the full local-CA chain when the
/// config asks for it, always followed by the snake-oil server fallback.
pub fn certificates(runner: &mut dyn Runner, config: &Config) -> DeckhandResult<()> {
    if config.use_local_ca {
        add_local_ca(runner)?;
        add_client_cert(runner)?;
        trust_local_ca(runner)?;
        install_client_cert(runner)?;
    }
    install_server_cert(runner)?;
    Ok(())
}
