//! Session establishment and the file-transfer channel

use async_trait::async_trait;
use russh::client::{self, Handle};
use russh::Disconnect;
use russh_keys::key::PublicKey;
use russh_sftp::client::SftpSession;
use std::sync::Arc;
use tracing::{debug, info, warn};
use zdns_core::config::CONNECT_TIMEOUT;
use zdns_core::{Error, Result, ServerTarget};

/// Client handler that accepts every server host key
struct AcceptAnyHostKey;

#[async_trait]
impl client::Handler for AcceptAnyHostKey {
    type Error = russh::Error;

    async fn check_server_key(
        &mut self,
        server_public_key: &PublicKey,
    ) -> std::result::Result<bool, Self::Error> {
        warn!(
            "Accepting unverified host key {} {}",
            server_public_key.name(),
            server_public_key.fingerprint()
        );
        Ok(true)
    }
}

/// An authenticated SSH session to the nameserver
///
/// Shared by every command and push of one orchestration run. Wrap it in an
/// `Arc` and hand clones to the managers.
pub struct SshSession {
    handle: Handle<AcceptAnyHostKey>,
    address: String,
}

impl SshSession {
    /// Connect and authenticate with the target's password
    ///
    /// # Returns
    ///
    /// - `Err(Error::Network)`: resolve/connect/handshake failure or timeout
    /// - `Err(Error::Authentication)`: credentials rejected
    pub async fn connect(target: &ServerTarget) -> Result<Self> {
        target.validate()?;
        let address = target.address();
        info!("Connecting to {} as {}", address, target.user);

        let establish = async {
            let config = Arc::new(client::Config::default());
            let mut handle = client::connect(
                config,
                (target.host.as_str(), target.port),
                AcceptAnyHostKey,
            )
            .await
            .map_err(|e| Error::network(format!("Cannot connect to {}: {}", address, e)))?;

            let accepted = handle
                .authenticate_password(target.user.clone(), target.password.clone())
                .await
                .map_err(|e| {
                    Error::auth(format!("Authentication exchange with {} failed: {}", address, e))
                })?;
            if !accepted {
                return Err(Error::auth(format!(
                    "Password rejected for {}@{}",
                    target.user, address
                )));
            }
            Ok(handle)
        };

        let handle = tokio::time::timeout(CONNECT_TIMEOUT, establish)
            .await
            .map_err(|_| {
                Error::network(format!(
                    "Timed out after {:?} connecting to {}",
                    CONNECT_TIMEOUT, address
                ))
            })??;

        info!("Session established with {}", address);
        Ok(Self { handle, address })
    }

    /// `host:port` of the remote end
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Open a file-transfer channel (SFTP subsystem) on this session
    ///
    /// The channel belongs to the caller; close it with
    /// [`FileChannel::close`] once the transfer is done.
    pub async fn initialize_file_channel(&self) -> Result<FileChannel> {
        let channel = self
            .handle
            .channel_open_session()
            .await
            .map_err(|e| Error::protocol(format!("Cannot open channel for SFTP: {}", e)))?;
        channel
            .request_subsystem(true, "sftp")
            .await
            .map_err(|e| Error::protocol(format!("SFTP subsystem request failed: {}", e)))?;
        let sftp = SftpSession::new(channel.into_stream())
            .await
            .map_err(|e| Error::protocol(format!("SFTP initialization failed: {}", e)))?;

        debug!("File channel opened on {}", self.address);
        Ok(FileChannel { sftp })
    }

    /// Open a fresh session channel for one command
    pub(crate) async fn open_exec_channel(&self) -> Result<russh::Channel<client::Msg>> {
        self.handle
            .channel_open_session()
            .await
            .map_err(|e| Error::dispatch(format!("Cannot open session channel: {}", e)))
    }

    /// Close the session
    pub async fn disconnect(&self) -> Result<()> {
        self.handle
            .disconnect(Disconnect::ByApplication, "", "en")
            .await
            .map_err(|e| Error::network(format!("Disconnect from {} failed: {}", self.address, e)))?;
        info!("Disconnected from {}", self.address);
        Ok(())
    }
}

/// SFTP channel scoped to a single push
pub struct FileChannel {
    sftp: SftpSession,
}

impl FileChannel {
    /// Create or truncate a remote file for writing
    pub(crate) async fn create(
        &self,
        remote_path: &str,
    ) -> std::result::Result<russh_sftp::client::fs::File, russh_sftp::client::error::Error> {
        self.sftp.create(remote_path).await
    }

    /// Close the channel; failures are logged only
    pub async fn close(self) {
        if let Err(e) = self.sftp.close().await {
            warn!("Closing file channel failed: {}", e);
        }
    }
}
