//! Worker runtime that only reports what it was asked to do.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::WorkerStartupOptions;
use crate::error::Result;
use crate::port::WorkerRuntime;

/// Logs the startup options instead of starting a task executor.
///
/// Stands in for the native runtime when a node is bootstrapped for
/// inspection, e.g. to verify that a driver resolves the right endpoints.
#[derive(Debug, Default)]
pub struct LogRuntime {
    running: AtomicBool,
}

impl LogRuntime {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WorkerRuntime for LogRuntime {
    async fn initialize(&self, options: WorkerStartupOptions) -> Result<()> {
        info!(
            role = %options.role,
            language = ?options.language,
            job_id = ?options.job_id.map(|id| id.to_hex()),
            metadata_address = %options.metadata.address,
            node_ip = %options.node_ip_address,
            raylet_socket = %options.raylet_socket,
            store_socket = %options.store_socket,
            node_manager_port = options.node_manager_port,
            log_dir = %options.log_dir.display(),
            startup_token = options.startup_token,
            job_config_bytes = options.serialized_job_config.len(),
            "Worker runtime initialized"
        );
        self.running.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn shutdown(&self) {
        if self.running.swap(false, Ordering::SeqCst) {
            info!("Worker runtime shut down");
        } else {
            warn!("Shutdown requested for a runtime that is not running");
        }
    }
}
