//! Cluster-agnostic domain types: identities, endpoints, jobs and options.

mod address;
mod command;
mod id;
mod job;
mod node;
mod options;
mod role;

pub mod proto;

pub use address::{BootstrapAddress, DEFAULT_BOOTSTRAP_PORT, LOOPBACK_HOST};
pub use command::{CommandLine, ProcessExit};
pub use id::{InvalidJobId, JobId};
pub use job::JobDescriptor;
pub use node::NodeEndpoints;
pub use options::{
    MetadataClientOptions, TaskExecutionCallback, TaskInvocation, TaskOutput,
    WorkerStartupOptions,
};
pub use role::{ActorLifetime, Language, WorkerRole};
