//! Connectivity check command handlers.

pub mod connection;
