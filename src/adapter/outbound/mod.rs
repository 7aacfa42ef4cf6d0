//! Outbound adapters (driven side).

pub mod metadata;
pub mod network;
pub mod process;
pub mod readiness;
pub mod runtime;
