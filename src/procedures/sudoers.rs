//! Privilege configuration: the deploying user's sudoers fragment

use crate::error::{DeckhandError, DeckhandResult};
use crate::runner::{RemoteCommand, Runner};

use super::progress;

/// Placeholder substituted with the session username
pub const PLACEHOLDER: &str = "USER";

/// Installed path of the rendered fragment
pub const SUDOERS_PATH: &str = "/etc/sudoers.d/01_metacat";

/// Bundled sudoers fragment template
pub const SUDOERS_TEMPLATE: &str = "\
# Installed by deckhand. Grants the deploying user the elevated rights
# the Metacat installer and service management need.
USER ALL=(ALL) NOPASSWD: ALL
";

/// Substitute the session username into the template.
///
/// Errors if the template carries no placeholder, so a broken template can
/// never be installed verbatim.
pub fn render_sudoers(template: &str, username: &str) -> DeckhandResult<String> {
    if !template.contains(PLACEHOLDER) {
        return Err(DeckhandError::MissingPlaceholder {
            placeholder: PLACEHOLDER.to_string(),
        });
    }
    Ok(template.replace(PLACEHOLDER, username))
}

/// Render the sudoers fragment for the current session's username, install
/// it under /etc/sudoers.d with root ownership and 644 permissions.
pub fn add_sudoers(runner: &mut dyn Runner) -> DeckhandResult<()> {
    progress("Adding sudo rights for the deploying user...");
    let fragment = render_sudoers(SUDOERS_TEMPLATE, runner.username())?;
    runner.upload(fragment.as_bytes(), SUDOERS_PATH)?;
    runner.run(&RemoteCommand::new(format!("chown root:root {SUDOERS_PATH}")))?;
    runner.run(&RemoteCommand::new(format!("chmod 644 {SUDOERS_PATH}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_substitutes_every_placeholder() {
        let rendered = render_sudoers(SUDOERS_TEMPLATE, "deployer").unwrap();
        assert!(rendered.contains("deployer ALL=(ALL) NOPASSWD: ALL"));
        assert!(!rendered.contains(PLACEHOLDER));
    }

    #[test]
    fn render_rejects_template_without_placeholder() {
        let err = render_sudoers("root ALL=(ALL) ALL\n", "deployer").unwrap_err();
        assert!(matches!(err, DeckhandError::MissingPlaceholder { .. }));
    }
}
