// # Remote Shell Trait
//
// The single seam between orchestration logic and the transport.
//
// ## Implementations
//
// - SSH + SFTP: `zdns-ssh` crate
// - Tests: scripted doubles that record commands and pushed content
//
// ## Usage
//
// ```rust,ignore
// use zdns_core::RemoteShell;
//
// let out = shell.run("rndc reload").await?;
// if !out.success() {
//     tracing::warn!("reload failed: {}", out.output);
// }
// ```

use async_trait::async_trait;
use std::path::Path;

/// Result of one dispatched remote command
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    /// stdout and stderr, interleaved in arrival order
    pub output: String,
    /// Exit status of the remote process
    pub exit_code: i32,
}

impl CommandOutput {
    /// Create a command result
    pub fn new(output: impl Into<String>, exit_code: i32) -> Self {
        Self {
            output: output.into(),
            exit_code,
        }
    }

    /// Whether the remote process exited with status 0
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Trait for remote command and file-transfer implementations
///
/// One value wraps one authenticated session. Callers issue operations
/// sequentially; implementations are not required to support concurrent
/// use of the same session.
///
/// Implementations never re-authenticate or reconnect: once the session is
/// gone every call fails until the caller builds a new one.
#[async_trait]
pub trait RemoteShell: Send + Sync {
    /// Run one shell command in a fresh command invocation
    ///
    /// # Returns
    ///
    /// - `Ok(CommandOutput)`: the command ran; inspect `exit_code`
    /// - `Err(Error::RemoteDispatch)`: the command could not be started
    async fn run(&self, command: &str) -> Result<CommandOutput, crate::Error>;

    /// Copy a local file to `remote_dir/remote_name`, overwriting it
    ///
    /// The file-transfer channel lives for exactly one push.
    ///
    /// # Returns
    ///
    /// - `Ok(true)`: every byte was written
    /// - `Ok(false)`: the remote file could not be created
    /// - `Err(Error)`: local read failure, channel failure, or write failure
    async fn push(
        &self,
        local_path: &Path,
        remote_dir: &str,
        remote_name: &str,
    ) -> Result<bool, crate::Error>;

    /// Transport name (for logging/debugging)
    fn transport_name(&self) -> &'static str;
}
