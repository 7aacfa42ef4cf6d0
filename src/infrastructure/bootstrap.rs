//! Infrastructure bootstrap helpers for runtime wiring.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::metadata::HttpMetadataClient;
use crate::adapter::outbound::network::UdpIdentity;
use crate::adapter::outbound::process::TokioProcessLauncher;
use crate::adapter::outbound::readiness::TcpReadinessProbe;
use crate::adapter::outbound::runtime::LogRuntime;
use crate::application::bootstrap::BootstrapPorts;
use crate::infrastructure::config::settings::BootstrapConfig;
use crate::port::WorkerRuntime;

/// Build the production collaborators for `config`.
///
/// The worker runtime is supplied by the caller so an embedding process can
/// plug in its own executor.
#[must_use]
pub fn build_ports(config: &BootstrapConfig, runtime: Arc<dyn WorkerRuntime>) -> BootstrapPorts {
    let ports = BootstrapPorts::new(
        Arc::new(TokioProcessLauncher::new()),
        HttpMetadataClient::factory(config.metadata.scheme.clone()),
        Arc::new(UdpIdentity::new()),
        runtime,
    );

    if config.cluster.readiness.enabled {
        info!(
            timeout_ms = config.cluster.readiness.timeout_ms,
            "Head readiness probe enabled"
        );
        ports.with_readiness(Arc::new(TcpReadinessProbe::from_config(
            &config.cluster.readiness,
        )))
    } else {
        ports
    }
}

/// Production collaborators with the logging runtime.
#[must_use]
pub fn build_default_ports(config: &BootstrapConfig) -> BootstrapPorts {
    build_ports(config, Arc::new(LogRuntime::new()))
}
