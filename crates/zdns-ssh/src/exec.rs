//! Remote command execution over exec channels

use crate::session::SshSession;
use async_trait::async_trait;
use russh::ChannelMsg;
use russh::client;
use tracing::{debug, warn};
use zdns_core::{CommandOutput, Error, Result};

/// Exit code reported when the remote side closes without an exit status
const NO_EXIT_STATUS: i32 = -1;

impl SshSession {
    /// Run one command and wait for it to finish
    ///
    /// # Returns
    ///
    /// - `Ok(CommandOutput)`: combined output and exit status
    /// - `Err(Error::RemoteDispatch)`: the channel could not be opened or
    ///   the server refused to start the command
    pub async fn exec(&self, command: &str) -> Result<CommandOutput> {
        debug!("[{}] $ {}", self.address(), command);

        let mut channel = self.open_exec_channel().await?;
        channel
            .exec(true, command)
            .await
            .map_err(|e| Error::dispatch(format!("Cannot start `{}`: {}", command, e)))?;

        collect_output(&mut channel, command).await
    }
}

/// Source of channel messages for one command
#[async_trait]
pub(crate) trait ChannelMessages: Send {
    /// Next message, or `None` once the channel is closed
    async fn next_message(&mut self) -> Option<ChannelMsg>;
}

#[async_trait]
impl ChannelMessages for russh::Channel<client::Msg> {
    async fn next_message(&mut self) -> Option<ChannelMsg> {
        self.wait().await
    }
}

/// Drain `messages` until the channel closes or the server refuses the command
///
/// A refused request leaves the channel open, so refusal must end the loop
/// on its own.
pub(crate) async fn collect_output<M>(messages: &mut M, command: &str) -> Result<CommandOutput>
where
    M: ChannelMessages + ?Sized,
{
    let mut collector = ExecCollector::default();
    while let Some(msg) = messages.next_message().await {
        if collector.absorb(msg) == Step::Refused {
            return Err(Error::dispatch(format!(
                "Server refused to run `{}`",
                command
            )));
        }
    }
    collector.finish(command)
}

/// What the exec loop does after one message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    Continue,
    Refused,
}

/// Accumulates channel messages for one command
#[derive(Debug, Default)]
pub(crate) struct ExecCollector {
    output: Vec<u8>,
    exit_code: Option<i32>,
    signal: Option<String>,
}

impl ExecCollector {
    pub(crate) fn absorb(&mut self, msg: ChannelMsg) -> Step {
        match msg {
            ChannelMsg::Data { ref data } => self.output.extend_from_slice(data),
            ChannelMsg::ExtendedData { ref data, .. } => self.output.extend_from_slice(data),
            ChannelMsg::ExitStatus { exit_status } => {
                self.exit_code = Some(i32::try_from(exit_status).unwrap_or(i32::MAX));
            }
            ChannelMsg::ExitSignal { signal_name, .. } => {
                self.signal = Some(format!("{:?}", signal_name));
            }
            // Only the exec request asks for a reply; a late failure is ignored.
            ChannelMsg::Failure if self.exit_code.is_none() => return Step::Refused,
            _ => {}
        }
        Step::Continue
    }

    pub(crate) fn finish(self, command: &str) -> Result<CommandOutput> {
        let output = String::from_utf8_lossy(&self.output).into_owned();
        let exit_code = match (self.exit_code, self.signal) {
            (Some(code), _) => code,
            (None, Some(signal)) => {
                warn!("`{}` terminated by signal {}", command, signal);
                NO_EXIT_STATUS
            }
            (None, None) => {
                warn!("`{}` ended without an exit status", command);
                NO_EXIT_STATUS
            }
        };

        debug!("`{}` exited with {}", command, exit_code);
        Ok(CommandOutput { output, exit_code })
    }
}
