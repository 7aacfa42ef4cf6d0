//! Process launcher port for node-tool invocations.
//!
//! The bootstrap orchestrator only ever runs short-lived control commands
//! (start a head, stop a head) and always waits for them right after
//! spawning.

use async_trait::async_trait;

use crate::domain::{CommandLine, ProcessExit};
use crate::error::BootstrapError;

/// A spawned process that can be waited on once.
#[async_trait]
pub trait ProcessHandle: Send {
    /// Block until the process terminates.
    ///
    /// The exit status is informational; a failed wait is reported as an
    /// exit without a code rather than as an error.
    async fn wait(self: Box<Self>) -> ProcessExit;
}

/// Port for spawning external commands.
///
/// # Errors
///
/// `spawn` returns [`BootstrapError::Spawn`] when the command cannot be
/// started at all.
#[async_trait]
pub trait ProcessLauncher: Send + Sync {
    async fn spawn(&self, command: &CommandLine) -> Result<Box<dyn ProcessHandle>, BootstrapError>;
}
