//! Handler for `check connection`: reach the metadata service and report
//! latency without bootstrapping the node.

use std::time::{Duration, Instant};

use crate::adapter::inbound::cli::command::BootstrapArgs;
use crate::adapter::inbound::cli::{config, output};
use crate::adapter::outbound::metadata::HttpMetadataClient;
use crate::adapter::outbound::network::UdpIdentity;
use crate::domain::{BootstrapAddress, MetadataClientOptions};
use crate::error::{BootstrapError, ConfigError, Result};
use crate::port::{ClusterMetadata, NetworkIdentity};

/// Connect to the configured cluster's metadata service without
/// bootstrapping anything.
pub async fn execute_connection(args: &BootstrapArgs) -> Result<()> {
    let (config, _) = config::resolve(args)?;
    config.init_logging();

    let address = config
        .cluster
        .address
        .clone()
        .ok_or(ConfigError::MissingField { field: "address" })?;
    let address = normalize(address, &UdpIdentity::new());

    output::section("Connection Check");
    output::field("Metadata service", output::highlight(&address));
    output::field("Scheme", &config.metadata.scheme);

    let options = MetadataClientOptions::new(
        address.to_string(),
        Duration::from_millis(config.metadata.request_timeout_ms),
    );
    let client = HttpMetadataClient::new(&options, &config.metadata.scheme);

    let started = Instant::now();
    if !client.connect().await {
        output::error("Metadata service unreachable");
        return Err(BootstrapError::Connection {
            address: options.address,
        }
        .into());
    }

    output::success("Metadata service reachable");
    if output::verbosity() > 0 {
        output::field("Latency", format!("{}ms", started.elapsed().as_millis()));
    }
    Ok(())
}

/// Replace a loopback host with the address peers would use.
fn normalize(address: BootstrapAddress, identity: &dyn NetworkIdentity) -> BootstrapAddress {
    if address.is_loopback() {
        BootstrapAddress::new(identity.local_address(), address.port())
    } else {
        address
    }
}
