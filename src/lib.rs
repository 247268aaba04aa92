//! Deckhand - remote provisioning tool for DataONE Metacat member nodes
//!
//! Deckhand takes a freshly provisioned Ubuntu host to a running Metacat
//! member node: OS patching, the package tool chain, the service account,
//! PostgreSQL, Tomcat, Apache with mod_jk, the web application itself, and
//! an optional local certificate authority. Every procedure is a fixed
//! sequence of remote commands issued through the [`runner::Runner`] seam.

pub mod config;
pub mod error;
pub mod procedures;
pub mod runner;

// Re-exports for convenience
pub use config::Config;
pub use error::{DeckhandError, DeckhandResult};
pub use runner::{RemoteCommand, Runner, SshRunner};
