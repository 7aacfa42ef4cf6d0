//! Nodeboot - attach a process to a compute cluster, or start one.
//!
//! A process bootstraps in one of two roles. A **driver** owns a job: when
//! no cluster address is configured it launches a single-node head itself,
//! asks the cluster which node it should attach to and allocates a job id.
//! A **worker** joins an existing cluster with endpoints handed down by the
//! node that spawned it.
//!
//! # Architecture
//!
//! The crate follows a ports-and-adapters layout:
//!
//! - [`domain`] - Addresses, ids, endpoints, wire messages and startup options
//! - [`port`] - Traits for the collaborators the bootstrap drives
//! - [`application`] - The [`NodeBootstrap`](application::bootstrap::NodeBootstrap)
//!   orchestrator and its state machine
//! - [`adapter`] - Process launcher, HTTP metadata client, network identity,
//!   readiness probe, and the CLI
//! - [`infrastructure`] - Configuration loading and production wiring
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use nodeboot::application::bootstrap::NodeBootstrap;
//! use nodeboot::domain::TaskExecutionCallback;
//! use nodeboot::infrastructure::bootstrap::build_default_ports;
//! use nodeboot::infrastructure::config::settings::BootstrapConfig;
//!
//! # async fn example() -> nodeboot::error::Result<()> {
//! let config = BootstrapConfig::default();
//! let mut bootstrap = NodeBootstrap::new(&config, build_default_ports(&config));
//! bootstrap
//!     .start(TaskExecutionCallback::new(|task| Ok(task.args.concat())))
//!     .await?;
//! bootstrap.shutdown().await?;
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
