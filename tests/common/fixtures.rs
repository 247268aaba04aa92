//! Test fixtures - reusable content constants for tests.

/// A trimmed but representative tomcat7 server.xml: one HTTP connector
/// before the AJP comment, the AJP connector, then the Engine section.
pub const SERVER_XML: &str = r#"<?xml version='1.0' encoding='utf-8'?>
<Server port="8005" shutdown="SHUTDOWN">
  <Listener className="org.apache.catalina.core.JasperListener" />
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

/// Remote path the application-server procedure reads and rewrites
pub const SERVER_XML_PATH: &str = "/var/lib/tomcat7/conf/server.xml";
