//! Canonical test configurations.
//!
//! Single source of truth for bootstrap configs used across tests.

use crate::domain::{BootstrapAddress, NodeEndpoints, WorkerRole};
use crate::infrastructure::config::settings::BootstrapConfig;

/// Driver with no cluster address: launches its own head on `port`.
pub fn driver_without_address(port: u16) -> BootstrapConfig {
    let mut config = BootstrapConfig::default();
    config.role = WorkerRole::Driver;
    config.cluster.port = port;
    config.cluster.redis_password = "test-password".into();
    config
}

/// Driver attaching to an existing cluster at `address`.
pub fn driver_with_address(address: &str) -> BootstrapConfig {
    let mut config = BootstrapConfig::default();
    config.role = WorkerRole::Driver;
    config.cluster.address = BootstrapAddress::parse(address).ok();
    config
}

/// Worker attaching to `address` with endpoints handed down by its node.
pub fn worker_with_address(address: &str) -> BootstrapConfig {
    let mut config = BootstrapConfig::default();
    config.role = WorkerRole::Worker;
    config.cluster.address = BootstrapAddress::parse(address).ok();
    config.node.endpoints = NodeEndpoints {
        raylet_socket: "/tmp/worker/raylet".into(),
        object_store_socket: "/tmp/worker/plasma_store".into(),
        node_manager_port: 50001,
    };
    config.node.startup_token = 3;
    config
}
