//! Cluster metadata service port.
//!
//! A narrow view of the metadata client: just the queries node bootstrap
//! needs. Implementations perform no retries; every failure surfaces to the
//! orchestrator, which treats it as fatal.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{JobId, MetadataClientOptions};
use crate::error::Result;

/// Internal key-value namespace holding session metadata.
pub const SESSION_NAMESPACE: &str = "session";

/// Key under [`SESSION_NAMESPACE`] holding the session directory path.
pub const SESSION_DIR_KEY: &str = "session_dir";

/// Port for querying the cluster metadata service.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so the orchestrator future can be
/// driven from any runtime worker thread.
#[async_trait]
pub trait ClusterMetadata: Send + Sync {
    /// Establish a connection. Returns `false` if the service is unreachable.
    async fn connect(&self) -> bool;

    /// Fetch the serialized node record a driver on `node_ip` should attach to.
    ///
    /// # Errors
    ///
    /// Returns an error if the RPC fails or no node is registered for the IP.
    async fn node_for_driver(&self, node_ip: &str) -> Result<Vec<u8>>;

    /// Allocate the next cluster-wide job id.
    ///
    /// # Errors
    ///
    /// Returns an error if the counter cannot be read or incremented.
    async fn next_job_id(&self) -> Result<JobId>;

    /// Read a value from the internal key-value store; `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the RPC itself fails.
    async fn internal_kv(&self, namespace: &str, key: &str) -> Result<Option<String>>;
}

/// Builds a metadata accessor for a given bootstrap address.
pub type MetadataFactory =
    Arc<dyn Fn(&MetadataClientOptions) -> Box<dyn ClusterMetadata> + Send + Sync>;
