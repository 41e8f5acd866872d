//! Test doubles and common utilities for orchestration contract tests
//!
//! [`ScriptedShell`] stands in for a remote session: it records every
//! command and push in order, captures pushed file content, and answers
//! commands from a script of prefix → response rules.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use zdns_core::{CommandOutput, Error, RemoteShell, ServerTarget};

/// One observed interaction with the remote side
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellEvent {
    /// A command was dispatched
    Run(String),
    /// A file was pushed
    Push {
        remote_dir: String,
        remote_name: String,
        content: String,
    },
}

/// A scripted remote shell
#[derive(Default)]
pub struct ScriptedShell {
    /// Everything that happened, in order
    events: Arc<Mutex<Vec<ShellEvent>>>,
    /// Local paths handed to push()
    pushed_paths: Arc<Mutex<Vec<PathBuf>>>,
    /// First matching prefix wins; unmatched commands exit 0
    responses: Vec<(String, CommandOutput)>,
    /// Commands with these prefixes fail to start
    dispatch_failures: Vec<String>,
    /// Pretend the remote file cannot be created
    refuse_push: bool,
}

impl ScriptedShell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer commands starting with `prefix`
    pub fn respond(mut self, prefix: &str, exit_code: i32, output: &str) -> Self {
        self.responses
            .push((prefix.to_string(), CommandOutput::new(output, exit_code)));
        self
    }

    /// Fail to start commands starting with `prefix`
    pub fn fail_dispatch(mut self, prefix: &str) -> Self {
        self.dispatch_failures.push(prefix.to_string());
        self
    }

    /// Make every push report that the remote file could not be created
    pub fn refuse_push(mut self) -> Self {
        self.refuse_push = true;
        self
    }

    pub fn events(&self) -> Vec<ShellEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn commands(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ShellEvent::Run(c) => Some(c),
                ShellEvent::Push { .. } => None,
            })
            .collect()
    }

    pub fn push_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ShellEvent::Push { .. }))
            .count()
    }

    pub fn pushed_paths(&self) -> Vec<PathBuf> {
        self.pushed_paths.lock().unwrap().clone()
    }

    /// Content of the first pushed file
    pub fn first_pushed_content(&self) -> Option<String> {
        self.events().into_iter().find_map(|e| match e {
            ShellEvent::Push { content, .. } => Some(content),
            ShellEvent::Run(_) => None,
        })
    }
}

#[async_trait::async_trait]
impl RemoteShell for ScriptedShell {
    async fn run(&self, command: &str) -> Result<CommandOutput, Error> {
        if self
            .dispatch_failures
            .iter()
            .any(|p| command.starts_with(p.as_str()))
        {
            return Err(Error::dispatch(format!("cannot start `{}`", command)));
        }

        self.events
            .lock()
            .unwrap()
            .push(ShellEvent::Run(command.to_string()));

        Ok(self
            .responses
            .iter()
            .find(|(prefix, _)| command.starts_with(prefix.as_str()))
            .map(|(_, out)| out.clone())
            .unwrap_or_default())
    }

    async fn push(
        &self,
        local_path: &Path,
        remote_dir: &str,
        remote_name: &str,
    ) -> Result<bool, Error> {
        // Read while the caller still holds the temporary file.
        let content = std::fs::read_to_string(local_path)?;
        self.pushed_paths
            .lock()
            .unwrap()
            .push(local_path.to_path_buf());
        self.events.lock().unwrap().push(ShellEvent::Push {
            remote_dir: remote_dir.to_string(),
            remote_name: remote_name.to_string(),
            content,
        });
        Ok(!self.refuse_push)
    }

    fn transport_name(&self) -> &'static str {
        "scripted"
    }
}

/// Target used throughout the contract tests
pub fn lab_target() -> ServerTarget {
    ServerTarget::new("10.200.192.13", "root", "test-password")
}
