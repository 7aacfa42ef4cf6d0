//! Local endpoints a process uses to reach its node.

use prost::Message;
use serde::{Deserialize, Serialize};

use super::proto::GcsNodeInfo;
use crate::error::BootstrapError;

/// Raylet socket, object-store socket and node-manager port.
///
/// Empty strings and a zero port mean "not set".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeEndpoints {
    #[serde(default)]
    pub raylet_socket: String,
    #[serde(default)]
    pub object_store_socket: String,
    #[serde(default)]
    pub node_manager_port: i32,
}

impl NodeEndpoints {
    /// Decode the node record returned by the node-for-driver lookup.
    pub fn from_record(record: &[u8]) -> Result<Self, BootstrapError> {
        let info = GcsNodeInfo::decode(record)
            .map_err(|e| BootstrapError::lookup("node record", e))?;
        Ok(Self {
            raylet_socket: info.raylet_socket_name,
            object_store_socket: info.object_store_socket_name,
            node_manager_port: info.node_manager_port,
        })
    }

    /// Reject endpoints the worker runtime cannot start with.
    pub fn ensure_complete(&self) -> Result<(), BootstrapError> {
        if self.raylet_socket.is_empty() {
            return Err(BootstrapError::Invariant(
                "raylet socket path is empty".into(),
            ));
        }
        if self.object_store_socket.is_empty() {
            return Err(BootstrapError::Invariant(
                "object store socket path is empty".into(),
            ));
        }
        if self.node_manager_port <= 0 {
            return Err(BootstrapError::Invariant(format!(
                "node manager port must be positive, got {}",
                self.node_manager_port
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;

    fn record(raylet: &str, store: &str, port: i32) -> Vec<u8> {
        GcsNodeInfo {
            node_id: vec![7; 28],
            node_manager_address: "10.0.0.5".into(),
            raylet_socket_name: raylet.into(),
            object_store_socket_name: store.into(),
            node_manager_port: port,
        }
        .encode_to_vec()
    }

    #[test]
    fn from_record_copies_socket_and_port_fields() {
        let endpoints = NodeEndpoints::from_record(&record("/tmp/raylet", "/tmp/store", 6390))
            .expect("decode");
        assert_eq!(endpoints.raylet_socket, "/tmp/raylet");
        assert_eq!(endpoints.object_store_socket, "/tmp/store");
        assert_eq!(endpoints.node_manager_port, 6390);
        assert!(endpoints.ensure_complete().is_ok());
    }

    #[test]
    fn from_record_rejects_garbage() {
        let err = NodeEndpoints::from_record(&[0xff, 0xff, 0xff]).unwrap_err();
        assert_eq!(err.kind(), FailureKind::Lookup);
    }

    #[test]
    fn missing_store_socket_violates_invariant() {
        let endpoints = NodeEndpoints::from_record(&record("/tmp/raylet", "", 6390)).unwrap();
        let err = endpoints.ensure_complete().unwrap_err();
        assert_eq!(err.kind(), FailureKind::Invariant);
    }

    #[test]
    fn non_positive_port_violates_invariant() {
        let endpoints = NodeEndpoints {
            raylet_socket: "/tmp/raylet".into(),
            object_store_socket: "/tmp/store".into(),
            node_manager_port: 0,
        };
        assert!(endpoints.ensure_complete().is_err());
    }
}
