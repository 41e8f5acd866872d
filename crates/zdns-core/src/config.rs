//! Configuration types for the ZDNS orchestrator
//!
//! The orchestrator has no configuration file format of its own. A caller
//! builds a [`ServerTarget`] (directly, from serde, or from the environment
//! in `zdnsctl`) and hands it to the transport and the managers.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Connection establishment timeout for the transport session
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Chunk size used when streaming a local file to the remote host
pub const CHUNK_SIZE: usize = 1024;

/// Remote directory where dynamic-update scripts are staged
pub const STAGING_DIR: &str = "/tmp";

/// File name of the staged dynamic-update script
pub const STAGING_FILE_NAME: &str = "nsupdate.tmp";

/// The remote nameserver to administer
///
/// Immutable after construction; one target per orchestration run.
///
/// # Security
///
/// The Debug implementation intentionally does NOT expose the password.
#[derive(Clone, Serialize, Deserialize)]
pub struct ServerTarget {
    /// Host name or address of the nameserver
    pub host: String,

    /// SSH port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Login user
    pub user: String,

    /// Login password
    /// ⚠️ NEVER log this value
    pub password: String,

    /// Absolute remote directory holding `<zone>.zone` files
    #[serde(default = "default_zone_dir")]
    pub zone_dir: String,
}

impl std::fmt::Debug for ServerTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerTarget")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<REDACTED>")
            .field("zone_dir", &self.zone_dir)
            .finish()
    }
}

impl ServerTarget {
    /// Create a target with the default port and zone directory
    pub fn new(
        host: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port: default_port(),
            user: user.into(),
            password: password.into(),
            zone_dir: default_zone_dir(),
        }
    }

    /// Set the SSH port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the remote zone directory
    pub fn with_zone_dir(mut self, zone_dir: impl Into<String>) -> Self {
        self.zone_dir = zone_dir.into();
        self
    }

    /// `host:port` for the transport
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Absolute remote path of a zone file
    pub fn zone_file_path(&self, zone_name: &str) -> String {
        format!(
            "{}/{}",
            self.zone_dir.trim_end_matches('/'),
            zone_file_name(zone_name)
        )
    }

    /// Zone file path as referenced from the nameserver's working directory
    ///
    /// `named` resolves `file` clauses relative to its `directory` option,
    /// which is the parent of `zone_dir`; so `/var/named/zone` yields
    /// `zone/<zone>.zone`.
    pub fn zone_file_reference(&self, zone_name: &str) -> String {
        let dir = self.zone_dir.trim_end_matches('/');
        match dir.rsplit('/').next() {
            Some(last) if !last.is_empty() => format!("{}/{}", last, zone_file_name(zone_name)),
            _ => zone_file_name(zone_name),
        }
    }

    /// Validate the target
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.host.trim().is_empty() {
            return Err(crate::Error::config("Server host cannot be empty"));
        }
        if self.port == 0 {
            return Err(crate::Error::config("Server port must be > 0"));
        }
        if self.user.trim().is_empty() {
            return Err(crate::Error::config("Server user cannot be empty"));
        }
        if self.zone_dir.is_empty() {
            return Err(crate::Error::config("Zone directory cannot be empty"));
        }
        if !self.zone_dir.starts_with('/') {
            return Err(crate::Error::config(format!(
                "Zone directory must be absolute, got '{}'",
                self.zone_dir
            )));
        }
        if !self
            .zone_dir
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '.' | '_' | '-'))
        {
            return Err(crate::Error::config(format!(
                "Zone directory contains characters unsafe for a shell command: '{}'",
                self.zone_dir
            )));
        }
        Ok(())
    }
}

/// Remote file name of a zone file
pub fn zone_file_name(zone_name: &str) -> String {
    format!("{}.zone", zone_name)
}

fn default_port() -> u16 {
    22
}

fn default_zone_dir() -> String {
    "/var/named/zone".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> ServerTarget {
        ServerTarget::new("10.200.192.13", "root", "s3cret")
    }

    #[test]
    fn defaults() {
        let t = target();
        assert_eq!(t.port, 22);
        assert_eq!(t.zone_dir, "/var/named/zone");
        assert_eq!(t.address(), "10.200.192.13:22");
        assert!(t.validate().is_ok());
    }

    #[test]
    fn debug_redacts_password() {
        let dbg = format!("{:?}", target());
        assert!(!dbg.contains("s3cret"));
        assert!(dbg.contains("<REDACTED>"));
    }

    #[test]
    fn zone_paths() {
        let t = target();
        assert_eq!(t.zone_file_path("abc.com"), "/var/named/zone/abc.com.zone");
        assert_eq!(t.zone_file_reference("abc.com"), "zone/abc.com.zone");

        let t = target().with_zone_dir("/srv/dns/zones/");
        assert_eq!(t.zone_file_path("abc.com"), "/srv/dns/zones/abc.com.zone");
        assert_eq!(t.zone_file_reference("abc.com"), "zones/abc.com.zone");
    }

    #[test]
    fn rejects_bad_targets() {
        assert!(target().with_port(0).validate().is_err());
        assert!(target().with_zone_dir("zone").validate().is_err());
        assert!(target().with_zone_dir("/var/named/zone; rm -rf /").validate().is_err());
        assert!(ServerTarget::new("", "root", "x").validate().is_err());
        assert!(ServerTarget::new("h", " ", "x").validate().is_err());
    }

    #[test]
    fn deserializes_with_defaults() {
        let t: ServerTarget = serde_json::from_str(
            r#"{"host":"ns1","user":"root","password":"pw"}"#,
        )
        .unwrap();
        assert_eq!(t.port, 22);
        assert_eq!(t.zone_dir, "/var/named/zone");
    }
}
