//! Process launcher backed by `tokio::process`.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::{Child, Command};
use tracing::{info, warn};

use crate::domain::{CommandLine, ProcessExit};
use crate::error::BootstrapError;
use crate::port::{ProcessHandle, ProcessLauncher};

/// Runs node-tool commands as child processes.
///
/// Children inherit stdout and stderr so the node tool's own progress
/// output stays visible. On unix they are placed in their own process group,
/// which keeps a ctrl-c aimed at this process from also killing a head that
/// is still being provisioned.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioProcessLauncher;

impl TokioProcessLauncher {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn command(command: &CommandLine) -> Command {
        let mut cmd = Command::new(command.program());
        cmd.args(command.arguments())
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        #[cfg(unix)]
        cmd.process_group(0);
        cmd
    }
}

#[async_trait]
impl ProcessLauncher for TokioProcessLauncher {
    async fn spawn(&self, command: &CommandLine) -> Result<Box<dyn ProcessHandle>, BootstrapError> {
        info!(command = %command, "Spawning process");
        let child = Self::command(command)
            .spawn()
            .map_err(|source| BootstrapError::Spawn {
                command: command.to_string(),
                source,
            })?;
        Ok(Box::new(TokioProcess {
            child,
            command: command.to_string(),
        }))
    }
}

struct TokioProcess {
    child: Child,
    command: String,
}

#[async_trait]
impl ProcessHandle for TokioProcess {
    async fn wait(mut self: Box<Self>) -> ProcessExit {
        match self.child.wait().await {
            Ok(status) => ProcessExit {
                code: status.code(),
            },
            Err(err) => {
                warn!(command = %self.command, error = %err, "Failed to wait for process");
                ProcessExit { code: None }
            }
        }
    }
}
