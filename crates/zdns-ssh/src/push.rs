//! File push over a per-transfer SFTP channel

use crate::session::{FileChannel, SshSession};
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};
use zdns_core::transfer::copy_in_chunks;
use zdns_core::{Error, Result};

impl SshSession {
    /// Copy a local file to `remote_dir/remote_name`, overwriting it
    ///
    /// Opens a file channel for this push only. The local file, the remote
    /// file and the channel are all closed before returning, on success and
    /// on failure. A half-written remote file is left in place.
    pub async fn push_file(
        &self,
        local_path: &Path,
        remote_dir: &str,
        remote_name: &str,
    ) -> Result<bool> {
        let mut source = tokio::fs::File::open(local_path).await?;
        let remote_path = format!("{}/{}", remote_dir.trim_end_matches('/'), remote_name);

        let channel = self.initialize_file_channel().await?;
        let result = write_remote(&channel, &mut source, &remote_path).await;
        channel.close().await;

        if let Ok(true) = result {
            info!("Pushed {} to {}:{}", local_path.display(), self.address(), remote_path);
        }
        result
    }
}

async fn write_remote(
    channel: &FileChannel,
    source: &mut tokio::fs::File,
    remote_path: &str,
) -> Result<bool> {
    let mut target = match channel.create(remote_path).await {
        Ok(file) => file,
        Err(e) => {
            warn!("Could not create the remote file {}: {}", remote_path, e);
            return Ok(false);
        }
    };

    let copied = copy_in_chunks(source, &mut target).await;
    let closed = target.shutdown().await;

    let bytes = copied.map_err(|e| match e {
        Error::Protocol(msg) => {
            Error::protocol(format!("Transfer to {} failed: {}", remote_path, msg))
        }
        other => other,
    })?;
    closed.map_err(|e| Error::protocol(format!("Closing {} failed: {}", remote_path, e)))?;

    debug!("Wrote {} bytes to {}", bytes, remote_path);
    Ok(true)
}
