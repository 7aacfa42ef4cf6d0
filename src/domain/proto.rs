//! Protobuf messages exchanged with the metadata service and worker runtime.
//!
//! Only the fields this crate reads or writes are declared; unknown fields
//! in incoming records are skipped by the decoder.

/// Node registry record, as returned by the node-for-driver lookup.
#[derive(Clone, PartialEq, prost::Message)]
pub struct GcsNodeInfo {
    #[prost(bytes = "vec", tag = "1")]
    pub node_id: Vec<u8>,
    #[prost(string, tag = "2")]
    pub node_manager_address: String,
    #[prost(string, tag = "3")]
    pub raylet_socket_name: String,
    #[prost(string, tag = "4")]
    pub object_store_socket_name: String,
    #[prost(int32, tag = "5")]
    pub node_manager_port: i32,
}

/// Job-level settings handed to the worker runtime as an opaque blob.
#[derive(Clone, PartialEq, prost::Message)]
pub struct JobConfig {
    #[prost(string, repeated, tag = "3")]
    pub code_search_path: Vec<String>,
    #[prost(enumeration = "job_config::ActorLifetime", tag = "7")]
    pub default_actor_lifetime: i32,
}

pub mod job_config {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
    #[repr(i32)]
    pub enum ActorLifetime {
        Detached = 0,
        NonDetached = 1,
    }
}
