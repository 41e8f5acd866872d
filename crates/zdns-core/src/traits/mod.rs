//! Core traits for the ZDNS orchestrator
//!
//! - [`RemoteShell`]: run a command on the nameserver and push files to it

pub mod remote_shell;

pub use remote_shell::{CommandOutput, RemoteShell};
