//! Builders for wire records and callbacks.

use prost::Message;

use crate::domain::proto::GcsNodeInfo;
use crate::domain::TaskExecutionCallback;

/// Address [`FixedIdentity`](super::network::FixedIdentity) reports for plain discovery.
pub const LOCAL_IP: &str = "192.168.1.20";

/// Address it reports for route-based discovery.
pub const ROUTED_IP: &str = "10.0.0.9";

pub const RAYLET_SOCKET: &str = "/tmp/session_1/sockets/raylet";
pub const STORE_SOCKET: &str = "/tmp/session_1/sockets/plasma_store";
pub const NODE_MANAGER_PORT: i32 = 40123;
pub const SESSION_DIR: &str = "/tmp/session_1";

/// Encoded node record as the metadata service returns it.
pub fn node_record(raylet: &str, store: &str, port: i32) -> Vec<u8> {
    GcsNodeInfo {
        node_id: vec![0xab; 28],
        node_manager_address: ROUTED_IP.to_string(),
        raylet_socket_name: raylet.to_string(),
        object_store_socket_name: store.to_string(),
        node_manager_port: port,
    }
    .encode_to_vec()
}

/// Node record with the canonical test endpoints.
pub fn default_node_record() -> Vec<u8> {
    node_record(RAYLET_SOCKET, STORE_SOCKET, NODE_MANAGER_PORT)
}

/// Callback that echoes the first argument back.
pub fn echo_callback() -> TaskExecutionCallback {
    TaskExecutionCallback::new(|task| Ok(task.args.first().cloned().unwrap_or_default()))
}
