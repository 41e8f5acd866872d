// # SSH Transport
//
// This crate provides the SSH/SFTP transport for the ZDNS orchestrator.
//
// ## Behavior
//
// - Password authentication only
// - Session establishment bounded by a 30 second timeout
// - ⚠️ The server host key is NOT verified; any key is accepted and its
//   fingerprint logged. Deployments relying on this crate assume a trusted
//   network path to the nameserver.
// - One exec channel per command; stdout and stderr are combined
// - One SFTP subsystem channel per file push, closed when the push ends
// - No reconnects, no retries: a dropped session fails every later call
//
// ## Usage
//
// ```rust,ignore
// use std::sync::Arc;
// use zdns_core::{ServerTarget, ZoneManager};
// use zdns_ssh::SshSession;
//
// let target = ServerTarget::new("10.200.192.13", "root", password);
// let session = Arc::new(SshSession::connect(&target).await?);
// let zones = ZoneManager::new(session.clone(), target)?;
// ```

mod exec;
mod push;
mod session;

pub use session::{FileChannel, SshSession};

use async_trait::async_trait;
use std::path::Path;
use zdns_core::{CommandOutput, Error, RemoteShell};

#[async_trait]
impl RemoteShell for SshSession {
    async fn run(&self, command: &str) -> Result<CommandOutput, Error> {
        self.exec(command).await
    }

    async fn push(
        &self,
        local_path: &Path,
        remote_dir: &str,
        remote_name: &str,
    ) -> Result<bool, Error> {
        self.push_file(local_path, remote_dir, remote_name).await
    }

    fn transport_name(&self) -> &'static str {
        "ssh"
    }
}
