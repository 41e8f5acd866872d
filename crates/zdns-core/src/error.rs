//! Error types for the ZDNS orchestrator
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for ZDNS operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the ZDNS orchestrator
#[derive(Error, Debug)]
pub enum Error {
    /// Remote host rejected the supplied credentials
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Session could not be established (resolve, connect, handshake, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// File-transfer channel could not be opened or used
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// A dispatched remote command exited non-zero
    #[error("Remote command `{command}` exited with status {exit_code}: {output}")]
    RemoteExecution {
        /// The command line that was run
        command: String,
        /// Exit status reported by the remote process
        exit_code: i32,
        /// Combined stdout and stderr
        output: String,
    },

    /// A remote command could not be started at all
    ///
    /// Fatal to the current operation, never to the process.
    #[error("Remote dispatch failed: {0}")]
    RemoteDispatch(String),

    /// Local temporary file create/read/write/remove errors
    #[error("Local I/O error: {0}")]
    LocalIo(#[from] std::io::Error),

    /// Malformed operation or missing required field
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create an authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a file-channel protocol error
    pub fn protocol(msg: impl Into<String>) -> Self {
        Self::Protocol(msg.into())
    }

    /// Create a remote dispatch error
    pub fn dispatch(msg: impl Into<String>) -> Self {
        Self::RemoteDispatch(msg.into())
    }

    /// Create a remote execution error
    pub fn remote_execution(
        command: impl Into<String>,
        exit_code: i32,
        output: impl Into<String>,
    ) -> Self {
        Self::RemoteExecution {
            command: command.into(),
            exit_code,
            output: output.into(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
