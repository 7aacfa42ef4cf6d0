//! Outbound ports (driven side): interfaces implemented by outbound adapters.

pub mod launcher;
pub mod metadata;
pub mod network;
pub mod readiness;
pub mod runtime;
