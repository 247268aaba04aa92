//! Application-server configuration: Tomcat connector excision and the
//! catalina.properties slash handling

use crate::error::{DeckhandError, DeckhandResult};
use crate::runner::{RemoteCommand, Runner};

use super::progress;

/// Remote path of the connector configuration
pub const SERVER_XML: &str = "/var/lib/tomcat7/conf/server.xml";

const TOMCAT_CONF_DIR: &str = "/var/lib/tomcat7/conf";
const CATALINA_DIR: &str = "/etc/tomcat7";

/// Comment marker the kept head ends with
pub const AJP_COMMENT_MARKER: &str = "<!-- Define an AJP 1.3 Connector on port 8009 -->";

/// The one connector definition the rewrite retains
pub const AJP_CONNECTOR: &str =
    r#"<Connector port="8009" protocol="AJP/1.3" redirectPort="8443" />"#;

/// Comment marker the kept tail starts at
pub const ENGINE_MARKER: &str =
    "<!-- An Engine represents the entry point (within Catalina) that processes";

/// Rewrite the connector section of server.xml.
///
/// Keeps every line up to and including the AJP comment marker, dropping
/// connector definitions inside that head, then emits exactly one connector
/// line (the AJP connector as it appears in the input), a blank line, and
/// everything from the Engine comment marker onward byte-for-byte. This is
/// a textual excision, not a structural XML edit.
pub fn rewrite_connectors(input: &str) -> DeckhandResult<String> {
    let mut head_end = None;
    let mut connector = None;
    let mut tail_start = None;

    let mut offset = 0usize;
    for line in input.split_inclusive('\n') {
        if head_end.is_none() && line.contains(AJP_COMMENT_MARKER) {
            head_end = Some(offset + line.len());
        }
        if connector.is_none() && line.contains(AJP_CONNECTOR) {
            connector = Some(line);
        }
        if tail_start.is_none() && line.contains(ENGINE_MARKER) {
            tail_start = Some(offset);
        }
        offset += line.len();
    }

    let head_end = head_end.ok_or_else(|| marker_not_found(AJP_COMMENT_MARKER))?;
    let connector = connector.ok_or_else(|| marker_not_found(AJP_CONNECTOR))?;
    let tail_start = tail_start.ok_or_else(|| marker_not_found(ENGINE_MARKER))?;

    let mut out = String::with_capacity(input.len());

    // Head, minus any connector definitions that preceded the AJP comment
    let mut in_connector = false;
    for line in input[..head_end].split_inclusive('\n') {
        if in_connector || line.trim_start().starts_with("<Connector") {
            in_connector = !line.trim_end().ends_with("/>");
            continue;
        }
        out.push_str(line);
    }

    out.push_str(connector);
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out.push('\n');
    out.push_str(&input[tail_start..]);

    Ok(out)
}

fn marker_not_found(marker: &str) -> DeckhandError {
    DeckhandError::MarkerNotFound {
        marker: marker.to_string(),
    }
}

/// Back up server.xml, rewrite its connector section, then append the
/// encoded-slash and backslash properties to catalina.properties (also
/// backed up first).
pub fn configure_tomcat(runner: &mut dyn Runner) -> DeckhandResult<()> {
    progress("Configuring Tomcat7...");

    runner.run(&RemoteCommand::new("cp server.xml server.xml.original").in_dir(TOMCAT_CONF_DIR))?;
    let original = runner.fetch(SERVER_XML)?;
    let rewritten = rewrite_connectors(&String::from_utf8_lossy(&original))?;
    runner.upload(rewritten.as_bytes(), SERVER_XML)?;

    runner.run(
        &RemoteCommand::new("cp catalina.properties catalina.properties.original")
            .in_dir(CATALINA_DIR),
    )?;
    runner.run(&RemoteCommand::new(r#"echo "" >> catalina.properties"#).in_dir(CATALINA_DIR))?;
    runner.run(
        &RemoteCommand::new(
            r#"echo "org.apache.tomcat.util.buf.UDecoder.ALLOW_ENCODED_SLASH=true" >> catalina.properties"#,
        )
        .in_dir(CATALINA_DIR),
    )?;
    runner.run(
        &RemoteCommand::new(
            r#"echo "org.apache.catalina.connector.CoyoteAdapter.ALLOW_BACKSLASH=true" >> catalina.properties"#,
        )
        .in_dir(CATALINA_DIR),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SERVER_XML_FIXTURE: &str = r#"<?xml version='1.0' encoding='utf-8'?>
<Server port="8005" shutdown="SHUTDOWN">
  <Service name="Catalina">
    <Connector port="8080" protocol="HTTP/1.1"
               connectionTimeout="20000"
               URIEncoding="UTF-8"
               redirectPort="8443" />
    <!-- Define an AJP 1.3 Connector on port 8009 -->
    <Connector port="8009" protocol="AJP/1.3" redirectPort="8443" />

    <!-- An Engine represents the entry point (within Catalina) that processes
         every request.  The Engine implementation for Tomcat stand alone
         analyzes the HTTP headers included with the request. -->
    <Engine name="Catalina" defaultHost="localhost">
      <Host name="localhost" appBase="webapps"
            unpackWARs="true" autoDeploy="true">
      </Host>
    </Engine>
  </Service>
</Server>
"#;

    #[test]
    fn rewrite_keeps_exactly_one_connector() {
        let rewritten = rewrite_connectors(SERVER_XML_FIXTURE).unwrap();
        let connectors: Vec<&str> = rewritten
            .lines()
            .filter(|l| l.trim_start().starts_with("<Connector"))
            .collect();
        assert_eq!(connectors.len(), 1);
        assert!(connectors[0].contains(r#"protocol="AJP/1.3""#));
        // the HTTP connector and its continuation lines are gone
        assert!(!rewritten.contains(r#"port="8080""#));
        assert!(!rewritten.contains("connectionTimeout"));
    }

    #[test]
    fn rewrite_preserves_tail_byte_for_byte() {
        let rewritten = rewrite_connectors(SERVER_XML_FIXTURE).unwrap();
        let tail_start = SERVER_XML_FIXTURE.find(ENGINE_MARKER).unwrap();
        let tail = &SERVER_XML_FIXTURE[SERVER_XML_FIXTURE[..tail_start]
            .rfind('\n')
            .map(|i| i + 1)
            .unwrap_or(0)..];
        assert!(rewritten.ends_with(tail));
    }

    #[test]
    fn rewrite_keeps_head_and_blank_separator() {
        let rewritten = rewrite_connectors(SERVER_XML_FIXTURE).unwrap();
        assert!(rewritten.starts_with("<?xml version='1.0' encoding='utf-8'?>\n"));
        let expected = format!(
            "    {AJP_COMMENT_MARKER}\n    {AJP_CONNECTOR}\n\n    {ENGINE_MARKER}"
        );
        assert!(
            rewritten.contains(&expected),
            "rewritten excerpt missing; got:\n{rewritten}"
        );
    }

    #[test]
    fn rewrite_is_idempotent() {
        let once = rewrite_connectors(SERVER_XML_FIXTURE).unwrap();
        let twice = rewrite_connectors(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn rewrite_requires_all_three_markers() {
        let err = rewrite_connectors("<Server>\n</Server>\n").unwrap_err();
        assert!(matches!(err, DeckhandError::MarkerNotFound { .. }));

        let no_engine = format!("{AJP_COMMENT_MARKER}\n{AJP_CONNECTOR}\n");
        let err = rewrite_connectors(&no_engine).unwrap_err();
        match err {
            DeckhandError::MarkerNotFound { marker } => {
                assert!(marker.starts_with("<!-- An Engine"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
