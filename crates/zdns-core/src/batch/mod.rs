//! Record batch manager
//!
//! Applies a [`DomainBatch`] through the server's dynamic-update tool:
//!
//! 1. Render the update script into a scoped temporary file
//! 2. Push it to the fixed staging path (`/tmp/nsupdate.tmp`)
//! 3. Run `nsupdate -v` against the staged script
//! 4. On success, remove the staged script (best effort)
//!
//! A failed push aborts before execution. A failed cleanup is logged and
//! leaves the batch result untouched.

use crate::commands;
use crate::config::{STAGING_DIR, STAGING_FILE_NAME, ServerTarget};
use crate::error::{Error, Result};
use crate::model::{BatchOperation, DomainBatch, Record};
use crate::render::{UpdateScript, write_temp};
use crate::traits::RemoteShell;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Record-level add/delete against one nameserver
pub struct RecordBatchManager {
    /// Session used for every command and upload
    shell: Arc<dyn RemoteShell>,

    /// The nameserver being administered
    target: ServerTarget,
}

impl RecordBatchManager {
    /// Create a record batch manager over an established session
    ///
    /// Fails with `Error::Config` if the target does not validate.
    pub fn new(shell: Arc<dyn RemoteShell>, target: ServerTarget) -> Result<Self> {
        target.validate()?;
        debug!(
            "Record batch manager for {} over {}",
            target.host,
            shell.transport_name()
        );
        Ok(Self { shell, target })
    }

    /// Remote path of the staged update script
    pub fn staging_path() -> String {
        format!("{}/{}", STAGING_DIR, STAGING_FILE_NAME)
    }

    /// Apply a batch
    ///
    /// # Returns
    ///
    /// - `Ok(true)`: the update tool exited 0
    /// - `Ok(false)`: the push or the update tool failed
    /// - `Err(Error::Validation)`: malformed batch, nothing was sent
    /// - `Err(..)`: dispatch, channel or local I/O failure
    pub async fn apply(&self, batch: &DomainBatch) -> Result<bool> {
        let script = match UpdateScript::new(&self.target.host, batch) {
            Ok(s) => s,
            Err(e) => {
                warn!("Rejecting {} batch for zone {}: {}", batch.operation, batch.zone, e);
                return Err(e);
            }
        };

        info!(
            "Applying {} of {} record(s) to zone {}",
            batch.operation,
            batch.records.len(),
            batch.zone
        );

        let rendered = script.render();
        debug!("Update script:\n{}", rendered);

        // Removed when this function returns, whatever the outcome.
        let temp = write_temp("records.", &rendered)?;

        if !self
            .shell
            .push(temp.path(), STAGING_DIR, STAGING_FILE_NAME)
            .await?
        {
            warn!("Upload of update script failed, batch not applied");
            return Ok(false);
        }

        let staged = Self::staging_path();
        let command = commands::nsupdate(&staged);
        let out = self.shell.run(&command).await?;
        if !out.success() {
            let err = Error::remote_execution(&command, out.exit_code, out.output.trim());
            warn!("{}", err);
            return Ok(false);
        }

        self.cleanup(&staged).await;

        info!("Batch applied to zone {}", batch.zone);
        Ok(true)
    }

    /// Apply a batch whose operation is still raw text
    ///
    /// An operation other than add/delete fails with `Error::Validation`
    /// before anything is rendered or pushed.
    pub async fn apply_raw(
        &self,
        zone: &str,
        operation: &str,
        records: Vec<Record>,
    ) -> Result<bool> {
        let operation = match operation.parse::<BatchOperation>() {
            Ok(op) => op,
            Err(e) => {
                warn!("Rejecting batch for zone {}: {}", zone, e);
                return Err(e);
            }
        };
        self.apply(&DomainBatch::new(zone, operation, records)).await
    }

    /// Remove the staged script; failures are only logged
    async fn cleanup(&self, staged: &str) {
        match self.shell.run(&commands::remove_file(staged)).await {
            Ok(out) if out.success() => debug!("Removed staged script {}", staged),
            Ok(out) => warn!(
                "Could not remove staged script {} (status {}): {}",
                staged,
                out.exit_code,
                out.output.trim()
            ),
            Err(e) => warn!("Could not remove staged script {}: {}", staged, e),
        }
    }
}
