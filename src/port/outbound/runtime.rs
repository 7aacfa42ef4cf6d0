//! Worker runtime lifecycle port.

use async_trait::async_trait;

use crate::domain::WorkerStartupOptions;
use crate::error::Result;

/// Port for the runtime that actually executes tasks.
///
/// Both calls are one-shot and process-global from the runtime's point of
/// view; the orchestrator guarantees it makes each at most once.
#[async_trait]
pub trait WorkerRuntime: Send + Sync {
    /// Start the runtime. Takes ownership of the options.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime refuses to start.
    async fn initialize(&self, options: WorkerStartupOptions) -> Result<()>;

    /// Stop the runtime.
    async fn shutdown(&self);
}
