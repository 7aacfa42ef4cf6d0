//! Node bootstrap orchestrator.
//!
//! Wires one process into a cluster, or creates the cluster's first node:
//!
//! 1. A driver with no cluster address launches a head via the node tool.
//! 2. A loopback bootstrap host is replaced with the machine's real address.
//! 3. The node IP is taken from config, or discovered.
//! 4. The metadata service is connected.
//! 5. Drivers ask the metadata service which node to attach to. Every role
//!    must end up with both socket paths and a node-manager port.
//! 6. The log directory is resolved, falling back to the session directory.
//! 7. Drivers resolve a job id; the job config blob is encoded.
//! 8. Startup options are assembled and the worker runtime initialized.
//!
//! Each step either completes or returns a fatal error. Nothing is retried
//! or rolled back.

mod head;
mod state;


use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info};

use crate::domain::{
    BootstrapAddress, JobDescriptor, JobId, Language, MetadataClientOptions, NodeEndpoints,
    TaskExecutionCallback, WorkerStartupOptions, LOOPBACK_HOST,
};
use crate::error::{BootstrapError, LifecycleError, Result};
use crate::infrastructure::config::settings::BootstrapConfig;
use crate::port::{
    AssumeReady, ClusterMetadata, HeadReadiness, MetadataFactory, NetworkIdentity,
    ProcessLauncher, WorkerRuntime, SESSION_DIR_KEY, SESSION_NAMESPACE,
};

pub use head::{start_head_command, stop_head_command};
pub use state::BootstrapState;

/// Collaborators the orchestrator drives.
#[derive(Clone)]
pub struct BootstrapPorts {
    pub launcher: Arc<dyn ProcessLauncher>,
    pub metadata: MetadataFactory,
    pub identity: Arc<dyn NetworkIdentity>,
    pub runtime: Arc<dyn WorkerRuntime>,
    pub readiness: Arc<dyn HeadReadiness>,
}

impl BootstrapPorts {
    /// Ports with the default readiness policy, which trusts the head
    /// launch command.
    #[must_use]
    pub fn new(
        launcher: Arc<dyn ProcessLauncher>,
        metadata: MetadataFactory,
        identity: Arc<dyn NetworkIdentity>,
        runtime: Arc<dyn WorkerRuntime>,
    ) -> Self {
        Self {
            launcher,
            metadata,
            identity,
            runtime,
            readiness: Arc::new(AssumeReady),
        }
    }

    #[must_use]
    pub fn with_readiness(mut self, readiness: Arc<dyn HeadReadiness>) -> Self {
        self.readiness = readiness;
        self
    }
}

/// Drives a single bootstrap attempt and the matching shutdown.
pub struct NodeBootstrap<'a> {
    config: &'a BootstrapConfig,
    ports: BootstrapPorts,
    state: BootstrapState,
}

impl<'a> NodeBootstrap<'a> {
    #[must_use]
    pub fn new(config: &'a BootstrapConfig, ports: BootstrapPorts) -> Self {
        Self {
            config,
            ports,
            state: BootstrapState::Unstarted,
        }
    }

    #[must_use]
    pub fn state(&self) -> BootstrapState {
        self.state
    }

    /// Run every bootstrap step and initialize the worker runtime.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::AlreadyStarted`] if called more than once,
    /// and the first fatal [`BootstrapError`] otherwise. On failure the
    /// orchestrator is left in [`BootstrapState::Failed`].
    pub async fn start(&mut self, callback: TaskExecutionCallback) -> Result<()> {
        if self.state != BootstrapState::Unstarted {
            return Err(LifecycleError::AlreadyStarted {
                state: self.state.as_str(),
            }
            .into());
        }

        match self.run(callback).await {
            Ok(()) => Ok(()),
            Err(err) => {
                error!(state = %self.state, error = %err, "Bootstrap failed");
                self.state = BootstrapState::Failed;
                Err(err)
            }
        }
    }

    /// Shut the worker runtime down and, if this process created the
    /// cluster, stop the head.
    ///
    /// A no-op if the runtime was never initialized.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::AlreadyStopped`] on a second call, or a
    /// spawn error if the head-stop command cannot be launched.
    pub async fn shutdown(&mut self) -> Result<()> {
        match self.state {
            BootstrapState::Initialized => {}
            BootstrapState::ShuttingDown | BootstrapState::Stopped => {
                return Err(LifecycleError::AlreadyStopped.into());
            }
            state => {
                debug!(%state, "Shutdown requested before initialization, nothing to stop");
                return Ok(());
            }
        }

        self.transition(BootstrapState::ShuttingDown);
        self.ports.runtime.shutdown().await;

        // Keyed on the original config: no address means we made the head.
        let result = if self.config.cluster.address.is_none() {
            let command = stop_head_command(&self.config.cluster.node_tool);
            head::run_to_completion(self.ports.launcher.as_ref(), &command).await
        } else {
            Ok(())
        };

        self.transition(BootstrapState::Stopped);
        result
    }

    async fn run(&mut self, callback: TaskExecutionCallback) -> Result<()> {
        let config = self.config;
        let (mut host, port) = config.bootstrap_host_port();

        let launches_head = config.launches_head();
        if launches_head {
            self.transition(BootstrapState::HeadLaunch);
            host = LOOPBACK_HOST.to_string();
            self.launch_head(port).await?;
        }

        if host == LOOPBACK_HOST {
            host = self.ports.identity.local_address();
        }
        let bootstrap_address = BootstrapAddress::new(host, port);

        if launches_head {
            self.ports
                .readiness
                .wait_until_ready(&bootstrap_address.to_string())
                .await?;
        }

        let node_ip = self.resolve_node_ip(&bootstrap_address);
        info!(
            role = %config.role,
            bootstrap_address = %bootstrap_address,
            node_ip = %node_ip,
            "Bootstrap address resolved"
        );

        self.transition(BootstrapState::Connecting);
        let metadata_options = MetadataClientOptions::new(
            bootstrap_address.to_string(),
            Duration::from_millis(config.metadata.request_timeout_ms),
        );
        let metadata = self.connect(&metadata_options).await?;

        let endpoints = if config.role.is_driver() {
            let endpoints = resolve_node_assignment(metadata.as_ref(), &node_ip).await?;
            self.transition(BootstrapState::NodeResolved);
            endpoints
        } else {
            config.node.endpoints.clone()
        };
        endpoints.ensure_complete()?;

        let log_dir = self.resolve_log_dir(metadata.as_ref()).await?;

        let job = JobDescriptor {
            job_id: self.resolve_job_id(metadata.as_ref()).await?,
            default_actor_lifetime: config.job.default_actor_lifetime,
            code_search_path: config.job.code_search_path.clone(),
        };
        let serialized_job_config = job.serialize()?;
        drop(metadata);

        let options = WorkerStartupOptions {
            role: config.role,
            language: Language::Cpp,
            store_socket: endpoints.object_store_socket,
            raylet_socket: endpoints.raylet_socket,
            job_id: job.job_id,
            metadata: metadata_options,
            enable_logging: true,
            install_failure_signal_handler: true,
            log_dir,
            node_ip_address: node_ip.clone(),
            raylet_ip_address: node_ip,
            node_manager_port: endpoints.node_manager_port,
            driver_name: config.node.driver_name.clone(),
            metrics_agent_port: None,
            task_execution_callback: callback,
            startup_token: config.node.startup_token,
            serialized_job_config,
        };
        self.transition(BootstrapState::ConfigAssembled);

        self.ports.runtime.initialize(options).await?;
        self.transition(BootstrapState::Initialized);
        Ok(())
    }

    async fn launch_head(&self, port: u16) -> Result<()> {
        let cluster = &self.config.cluster;
        let node_ip = self
            .config
            .node
            .ip_address
            .clone()
            .unwrap_or_else(|| self.ports.identity.local_address());
        let command = start_head_command(
            &cluster.node_tool,
            port,
            &cluster.redis_password,
            &node_ip,
            &cluster.head_args,
        );
        head::run_to_completion(self.ports.launcher.as_ref(), &command).await
    }

    fn resolve_node_ip(&self, bootstrap_address: &BootstrapAddress) -> String {
        if let Some(ip) = &self.config.node.ip_address {
            return ip.clone();
        }
        if bootstrap_address.host().is_empty() {
            self.ports.identity.local_address()
        } else {
            self.ports
                .identity
                .address_toward(&bootstrap_address.to_string())
        }
    }

    async fn connect(&self, options: &MetadataClientOptions) -> Result<Box<dyn ClusterMetadata>> {
        let metadata = (self.ports.metadata)(options);
        if !metadata.connect().await {
            return Err(BootstrapError::Connection {
                address: options.address.clone(),
            }
            .into());
        }
        info!(address = %options.address, "Connected to cluster metadata service");
        Ok(metadata)
    }

    async fn resolve_log_dir(&self, metadata: &dyn ClusterMetadata) -> Result<PathBuf> {
        let session = &self.config.session;
        if let Some(dir) = &session.logs_dir {
            return Ok(dir.clone());
        }

        let session_dir = match &session.session_dir {
            Some(dir) => dir.clone(),
            None => metadata
                .internal_kv(SESSION_NAMESPACE, SESSION_DIR_KEY)
                .await
                .map_err(|e| BootstrapError::lookup("session directory", e))?
                .map(PathBuf::from)
                .ok_or_else(|| {
                    BootstrapError::lookup(
                        "session directory",
                        format!("key '{SESSION_NAMESPACE}/{SESSION_DIR_KEY}' is not set"),
                    )
                })?,
        };
        let log_dir = session_dir.join("logs");
        debug!(log_dir = %log_dir.display(), "Log directory resolved");
        Ok(log_dir)
    }

    async fn resolve_job_id(&self, metadata: &dyn ClusterMetadata) -> Result<Option<JobId>> {
        if !self.config.role.is_driver() {
            return Ok(None);
        }
        if let Some(job_id) = self.config.job.id {
            return Ok(Some(job_id));
        }
        let job_id = metadata
            .next_job_id()
            .await
            .map_err(|e| BootstrapError::lookup("next job id", e))?;
        info!(%job_id, "Allocated job id");
        Ok(Some(job_id))
    }

    fn transition(&mut self, next: BootstrapState) {
        debug!(from = %self.state, to = %next, "Bootstrap state transition");
        self.state = next;
    }
}

async fn resolve_node_assignment(
    metadata: &dyn ClusterMetadata,
    node_ip: &str,
) -> Result<NodeEndpoints> {
    let record = metadata
        .node_for_driver(node_ip)
        .await
        .map_err(|e| BootstrapError::lookup("node for driver", e))?;
    let endpoints = NodeEndpoints::from_record(&record)?;
    info!(
        raylet_socket = %endpoints.raylet_socket,
        object_store_socket = %endpoints.object_store_socket,
        node_manager_port = endpoints.node_manager_port,
        "Node assignment resolved"
    );
    Ok(endpoints)
}
