//! Zone-level requests

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A zone-level operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneOperation {
    /// Upload, check and register a new zone
    #[serde(alias = "add")]
    Create,
    /// Deregister the zone and remove its data
    #[serde(alias = "del")]
    Delete,
    /// Freeze the zone (stop accepting dynamic updates)
    Pause,
    /// Unfreeze the zone
    Thaw,
    /// Purge cached records for the zone
    Flush,
    /// Write journal changes to the zone file and drop the journal
    Sync,
    /// Reload server configuration and all zones
    Reload,
    /// Query zone status text
    Status,
}

impl ZoneOperation {
    /// All operations, in dispatch-table order
    pub const ALL: [ZoneOperation; 8] = [
        ZoneOperation::Create,
        ZoneOperation::Delete,
        ZoneOperation::Pause,
        ZoneOperation::Thaw,
        ZoneOperation::Flush,
        ZoneOperation::Sync,
        ZoneOperation::Reload,
        ZoneOperation::Status,
    ];

    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            ZoneOperation::Create => "create",
            ZoneOperation::Delete => "delete",
            ZoneOperation::Pause => "pause",
            ZoneOperation::Thaw => "thaw",
            ZoneOperation::Flush => "flush",
            ZoneOperation::Sync => "sync",
            ZoneOperation::Reload => "reload",
            ZoneOperation::Status => "status",
        }
    }

    /// Whether the zone name must be set for this operation
    pub fn requires_name(&self) -> bool {
        !matches!(self, ZoneOperation::Reload)
    }
}

impl fmt::Display for ZoneOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ZoneOperation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "create" | "add" => Ok(ZoneOperation::Create),
            "delete" | "del" => Ok(ZoneOperation::Delete),
            "pause" => Ok(ZoneOperation::Pause),
            "thaw" => Ok(ZoneOperation::Thaw),
            "flush" => Ok(ZoneOperation::Flush),
            "sync" => Ok(ZoneOperation::Sync),
            "reload" => Ok(ZoneOperation::Reload),
            "status" => Ok(ZoneOperation::Status),
            other => Err(Error::validation(format!(
                "Unknown zone operation '{}'. Valid: create, delete, pause, thaw, flush, sync, reload, status",
                other
            ))),
        }
    }
}

/// A request against one zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// Zone name, e.g. `abc.com`; may be empty only for `reload`
    #[serde(default)]
    pub name: String,

    /// Address of the authoritative server; falls back to the target host
    #[serde(default)]
    pub server: Option<String>,

    /// What to do with the zone
    pub operation: ZoneOperation,
}

impl Zone {
    /// Create a zone request
    pub fn new(name: impl Into<String>, operation: ZoneOperation) -> Self {
        Self {
            name: name.into(),
            server: None,
            operation,
        }
    }

    /// Set the authoritative server address
    pub fn with_server(mut self, server: impl Into<String>) -> Self {
        self.server = Some(server.into());
        self
    }

    /// The authoritative server address, or `default_host` if unset or blank
    pub fn server_or<'a>(&'a self, default_host: &'a str) -> &'a str {
        match self.server.as_deref() {
            Some(s) if !s.trim().is_empty() => s,
            _ => default_host,
        }
    }
}
