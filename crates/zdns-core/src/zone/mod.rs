//! Zone manager
//!
//! Sequences renderer, file push and remote commands into zone-level
//! operations. Each operation maps to one or more `rndc` /
//! `named-checkzone` invocations; a remote exit status of 0 is success.
//!
//! ## Create flow
//!
//! ```text
//! render zone file ─► test -e <zone_dir>/<zone>.zone
//!                          │ absent          │ present
//!                          ▼                 │
//!                     push zone file         │
//!                          │                 │
//!                          ▼                 ▼
//!                    named-checkzone ─► rndc addzone
//! ```
//!
//! ## Failure model
//!
//! - Missing/malformed zone name or server address: `Ok(false)`, no remote call
//! - Non-zero exit: `Ok(false)`, output logged
//! - Dispatch failure, local I/O failure, channel failure: `Err(..)`

use crate::commands;
use crate::config::{ServerTarget, zone_file_name};
use crate::error::{Error, Result};
use crate::model::{Zone, ZoneOperation, validate_zone_name};
use crate::render::{ZoneFile, write_temp};
use crate::traits::RemoteShell;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Zone-level operations against one nameserver
pub struct ZoneManager {
    /// Session used for every command and upload
    shell: Arc<dyn RemoteShell>,

    /// The nameserver being administered
    target: ServerTarget,
}

impl ZoneManager {
    /// Create a zone manager over an established session
    ///
    /// Fails with `Error::Config` if the target does not validate, since
    /// `zone_dir` ends up in remote command lines.
    pub fn new(shell: Arc<dyn RemoteShell>, target: ServerTarget) -> Result<Self> {
        target.validate()?;
        debug!(
            "Zone manager for {} over {}",
            target.host,
            shell.transport_name()
        );
        Ok(Self { shell, target })
    }

    /// The nameserver this manager administers
    pub fn target(&self) -> &ServerTarget {
        &self.target
    }

    /// Dispatch on `zone.operation`
    ///
    /// The text is the status output for `status` and empty otherwise.
    pub async fn execute(&self, zone: &Zone) -> Result<(String, bool)> {
        info!("Zone {} requested for '{}'", zone.operation, zone.name);

        match zone.operation {
            ZoneOperation::Create => Ok((String::new(), self.create(zone).await?)),
            ZoneOperation::Delete => Ok((String::new(), self.delete(&zone.name).await?)),
            ZoneOperation::Pause => Ok((String::new(), self.pause(&zone.name).await?)),
            ZoneOperation::Thaw => Ok((String::new(), self.thaw(&zone.name).await?)),
            ZoneOperation::Flush => Ok((String::new(), self.flush(&zone.name).await?)),
            ZoneOperation::Sync => Ok((String::new(), self.sync(&zone.name).await?)),
            ZoneOperation::Reload => Ok((String::new(), self.reload().await?)),
            ZoneOperation::Status => self.status(&zone.name).await,
        }
    }

    /// Dispatch a request whose operation is still raw text
    ///
    /// An unknown operation fails closed with `("", false)` and no remote call.
    pub async fn execute_raw(
        &self,
        name: &str,
        server: Option<&str>,
        operation: &str,
    ) -> Result<(String, bool)> {
        let operation = match operation.parse::<ZoneOperation>() {
            Ok(op) => op,
            Err(e) => {
                warn!("Rejecting zone request for '{}': {}", name, e);
                return Ok((String::new(), false));
            }
        };
        let mut zone = Zone::new(name, operation);
        zone.server = server.map(str::to_string);
        self.execute(&zone).await
    }

    /// Upload, check and register a new zone
    pub async fn create(&self, zone: &Zone) -> Result<bool> {
        if !self.name_ok(ZoneOperation::Create, &zone.name) {
            return Ok(false);
        }

        let server = zone.server_or(&self.target.host);
        let zone_file = match ZoneFile::new(&zone.name, server) {
            Ok(z) => z,
            Err(e) => {
                warn!("Cannot create zone {}: {}", zone.name, e);
                return Ok(false);
            }
        };

        // Removed when this function returns, whatever the outcome.
        let temp = write_temp("zone.", &zone_file.render())?;

        let file_name = zone_file_name(&zone.name);
        let remote_path = self.target.zone_file_path(&zone.name);

        if self.remote_file_exists(&remote_path).await? {
            info!("Zone file {} already present, skipping upload", remote_path);
        } else if !self
            .shell
            .push(temp.path(), &self.target.zone_dir, &file_name)
            .await?
        {
            warn!("Upload of {} failed", remote_path);
            return Ok(false);
        }

        let check = self
            .shell
            .run(&commands::check_zone(&zone.name, &remote_path))
            .await?;
        if !check.success() {
            warn!(
                "Zone file check failed for {} (status {}): {}",
                zone.name,
                check.exit_code,
                check.output.trim()
            );
            return Ok(false);
        }

        let registered = self
            .run_checked(&commands::add_zone(
                &zone.name,
                &self.target.zone_file_reference(&zone.name),
            ))
            .await?;
        if registered {
            info!("Zone {} created on {}", zone.name, self.target.host);
        }
        Ok(registered)
    }

    /// Deregister a zone and remove its data
    pub async fn delete(&self, name: &str) -> Result<bool> {
        if !self.name_ok(ZoneOperation::Delete, name) {
            return Ok(false);
        }
        info!("Deleting zone {}", name);
        self.run_checked(&commands::delete_zone(name)).await
    }

    /// Freeze a zone
    pub async fn pause(&self, name: &str) -> Result<bool> {
        if !self.name_ok(ZoneOperation::Pause, name) {
            return Ok(false);
        }
        info!("Freezing zone {}", name);
        self.run_checked(&commands::freeze(name)).await
    }

    /// Thaw a frozen zone
    pub async fn thaw(&self, name: &str) -> Result<bool> {
        if !self.name_ok(ZoneOperation::Thaw, name) {
            return Ok(false);
        }
        info!("Thawing zone {}", name);
        self.run_checked(&commands::thaw(name)).await
    }

    /// Purge cached records for a zone
    pub async fn flush(&self, name: &str) -> Result<bool> {
        if !self.name_ok(ZoneOperation::Flush, name) {
            return Ok(false);
        }
        self.run_checked(&commands::flush_name(name)).await
    }

    /// Write journal changes to the zone file and clean the journal
    pub async fn sync(&self, name: &str) -> Result<bool> {
        if !self.name_ok(ZoneOperation::Sync, name) {
            return Ok(false);
        }
        self.run_checked(&commands::sync_clean(name)).await
    }

    /// Reload server configuration and all zones
    pub async fn reload(&self) -> Result<bool> {
        self.run_checked(&commands::reload()).await
    }

    /// Query zone status text
    pub async fn status(&self, name: &str) -> Result<(String, bool)> {
        if !self.name_ok(ZoneOperation::Status, name) {
            return Ok((String::new(), false));
        }
        let command = commands::zone_status(name);
        let out = self.shell.run(&command).await?;
        if out.success() {
            Ok((out.output, true))
        } else {
            self.log_failure(&command, out.exit_code, &out.output);
            Ok((String::new(), false))
        }
    }

    /// Whether `path` exists on the remote host
    ///
    /// Any non-zero status counts as absent.
    async fn remote_file_exists(&self, path: &str) -> Result<bool> {
        let out = self.shell.run(&commands::test_exists(path)).await?;
        debug!("{} exists: {}", path, out.success());
        Ok(out.success())
    }

    /// Run a command and map its exit status to success
    async fn run_checked(&self, command: &str) -> Result<bool> {
        let out = self.shell.run(command).await?;
        if !out.success() {
            self.log_failure(command, out.exit_code, &out.output);
        }
        Ok(out.success())
    }

    fn log_failure(&self, command: &str, exit_code: i32, output: &str) {
        let err = Error::remote_execution(command, exit_code, output.trim());
        warn!("{}", err);
    }

    fn name_ok(&self, operation: ZoneOperation, name: &str) -> bool {
        if !operation.requires_name() {
            return true;
        }
        match validate_zone_name(name) {
            Ok(()) => true,
            Err(e) => {
                warn!("Rejecting zone {} without remote call: {}", operation, e);
                false
            }
        }
    }
}
