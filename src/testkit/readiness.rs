//! Readiness probe fake.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use super::{Call, CallLog};
use crate::error::{BootstrapError, Result};
use crate::port::HeadReadiness;

#[derive(Clone)]
pub struct RecordingReadiness {
    log: CallLog,
    unreachable: Arc<AtomicBool>,
}

impl RecordingReadiness {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            unreachable: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Make every subsequent probe time out.
    pub fn never_ready(&self) {
        self.unreachable.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl HeadReadiness for RecordingReadiness {
    async fn wait_until_ready(&self, address: &str) -> Result<()> {
        self.log.push(Call::ReadinessWait(address.to_string()));
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(BootstrapError::Connection {
                address: address.to_string(),
            }
            .into());
        }
        Ok(())
    }
}
