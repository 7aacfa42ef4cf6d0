//! Worker runtime fake that captures startup options.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{Call, CallLog};
use crate::domain::WorkerStartupOptions;
use crate::error::{Error, Result};
use crate::port::WorkerRuntime;

#[derive(Clone)]
pub struct RecordingRuntime {
    log: CallLog,
    options: Arc<Mutex<Option<WorkerStartupOptions>>>,
    refuse: bool,
}

impl RecordingRuntime {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            options: Arc::new(Mutex::new(None)),
            refuse: false,
        }
    }

    /// Make `initialize` fail.
    pub fn refusing(mut self) -> Self {
        self.refuse = true;
        self
    }

    /// Options received by `initialize`, if it was called.
    pub fn options(&self) -> Option<WorkerStartupOptions> {
        self.options.lock().clone()
    }
}

#[async_trait]
impl WorkerRuntime for RecordingRuntime {
    async fn initialize(&self, options: WorkerStartupOptions) -> Result<()> {
        self.log.push(Call::Initialize);
        if self.refuse {
            return Err(Error::Runtime("runtime refused to start".into()));
        }
        *self.options.lock() = Some(options);
        Ok(())
    }

    async fn shutdown(&self) {
        self.log.push(Call::Shutdown);
    }
}
