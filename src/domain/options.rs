//! Fully assembled worker runtime startup options.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use super::id::JobId;
use super::role::{Language, WorkerRole};

/// Settings for the runtime's own metadata client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataClientOptions {
    /// `host:port` of the metadata service.
    pub address: String,
    /// Per-request timeout applied by the client.
    pub request_timeout: Duration,
}

impl MetadataClientOptions {
    #[must_use]
    pub fn new(address: impl Into<String>, request_timeout: Duration) -> Self {
        Self {
            address: address.into(),
            request_timeout,
        }
    }
}

/// A task the runtime asks this process to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskInvocation {
    pub function_name: String,
    pub args: Vec<Vec<u8>>,
}

/// Outcome of a task: the serialized return value or an error message.
pub type TaskOutput = std::result::Result<Vec<u8>, String>;

/// Callback the runtime invokes for every task assigned to this worker.
#[derive(Clone)]
pub struct TaskExecutionCallback(Arc<dyn Fn(&TaskInvocation) -> TaskOutput + Send + Sync>);

impl TaskExecutionCallback {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&TaskInvocation) -> TaskOutput + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn call(&self, task: &TaskInvocation) -> TaskOutput {
        (self.0)(task)
    }
}

impl fmt::Debug for TaskExecutionCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TaskExecutionCallback(..)")
    }
}

/// Everything the worker runtime needs to start.
///
/// Built once per bootstrap and moved into `WorkerRuntime::initialize`.
#[derive(Debug, Clone)]
pub struct WorkerStartupOptions {
    pub role: WorkerRole,
    pub language: Language,
    pub store_socket: String,
    pub raylet_socket: String,
    /// Set for drivers only.
    pub job_id: Option<JobId>,
    pub metadata: MetadataClientOptions,
    pub enable_logging: bool,
    pub install_failure_signal_handler: bool,
    pub log_dir: PathBuf,
    pub node_ip_address: String,
    pub raylet_ip_address: String,
    pub node_manager_port: i32,
    pub driver_name: String,
    /// `None` disables metrics export.
    pub metrics_agent_port: Option<u16>,
    pub task_execution_callback: TaskExecutionCallback,
    pub startup_token: i64,
    pub serialized_job_config: Vec<u8>,
}
