//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports are the seams between the bootstrap orchestrator and the systems it
//! drives but does not own: the node tool, the metadata service, the worker
//! runtime and the host's network stack.
//!
//! ```text
//!                  ┌──────────────────────────┐
//!                  │   Bootstrap orchestrator  │
//!                  └─────────────┬────────────┘
//!        ┌──────────────┬────────┴──────┬───────────────┐
//!        ▼              ▼               ▼               ▼
//!  ┌──────────┐  ┌────────────┐  ┌────────────┐  ┌───────────┐
//!  │ Launcher │  │  Metadata  │  │  Runtime   │  │  Network  │
//!  └──────────┘  └────────────┘  └────────────┘  └───────────┘
//! ```
//!
//! All ports live under [`outbound`]; the CLI drives the orchestrator
//! directly and needs no inbound port.

pub mod outbound;

pub use outbound::launcher::{ProcessHandle, ProcessLauncher};
pub use outbound::metadata::{
    ClusterMetadata, MetadataFactory, SESSION_DIR_KEY, SESSION_NAMESPACE,
};
pub use outbound::network::NetworkIdentity;
pub use outbound::readiness::{AssumeReady, HeadReadiness};
pub use outbound::runtime::WorkerRuntime;
