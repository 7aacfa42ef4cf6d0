//! Cluster metadata service adapters.

pub mod client;
pub mod dto;

pub use client::HttpMetadataClient;
