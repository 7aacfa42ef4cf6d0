//! Launcher fake that records command lines instead of running them.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use super::{Call, CallLog};
use crate::domain::{CommandLine, ProcessExit};
use crate::error::BootstrapError;
use crate::port::{ProcessHandle, ProcessLauncher};

#[derive(Clone)]
pub struct RecordingLauncher {
    log: CallLog,
    fail_spawn: Arc<AtomicBool>,
    exit_code: Option<i32>,
}

impl RecordingLauncher {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            fail_spawn: Arc::new(AtomicBool::new(false)),
            exit_code: Some(0),
        }
    }

    /// Make every subsequent spawn fail with `NotFound`.
    pub fn fail_spawns(&self) {
        self.fail_spawn.store(true, Ordering::SeqCst);
    }

    /// Report this exit code from every spawned command.
    pub fn with_exit_code(mut self, code: Option<i32>) -> Self {
        self.exit_code = code;
        self
    }
}

struct FinishedProcess {
    exit: ProcessExit,
}

#[async_trait]
impl ProcessHandle for FinishedProcess {
    async fn wait(self: Box<Self>) -> ProcessExit {
        self.exit
    }
}

#[async_trait]
impl ProcessLauncher for RecordingLauncher {
    async fn spawn(&self, command: &CommandLine) -> Result<Box<dyn ProcessHandle>, BootstrapError> {
        self.log.push(Call::Spawn(command.to_string()));
        if self.fail_spawn.load(Ordering::SeqCst) {
            return Err(BootstrapError::Spawn {
                command: command.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such program"),
            });
        }
        Ok(Box::new(FinishedProcess {
            exit: ProcessExit {
                code: self.exit_code,
            },
        }))
    }
}
