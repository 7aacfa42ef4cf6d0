//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`config`] - Canonical bootstrap configurations for each scenario.
//! - [`domain`] - Builders for wire records and callbacks.
//! - [`launcher`] - `RecordingLauncher`, a [`ProcessLauncher`](crate::port::ProcessLauncher)
//!   that records command lines instead of running them.
//! - [`metadata`] - `ScriptedMetadata`, a metadata service with canned answers.
//! - [`network`] - `FixedIdentity`, deterministic address discovery.
//! - [`readiness`] - `RecordingReadiness`, a head readiness probe.
//! - [`runtime`] - `RecordingRuntime`, captures startup options.
//!
//! Every fake appends to a shared [`CallLog`] so tests can assert on the
//! order in which collaborators were used.

pub mod config;
pub mod domain;
pub mod launcher;
pub mod metadata;
pub mod network;
pub mod readiness;
pub mod runtime;

use std::sync::Arc;

use parking_lot::Mutex;

use crate::application::bootstrap::BootstrapPorts;

/// One observable interaction with a collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Spawn(String),
    ReadinessWait(String),
    Connect(String),
    NodeForDriver(String),
    NextJobId,
    InternalKv(String, String),
    Initialize,
    Shutdown,
}

/// Ordered, shareable record of [`Call`]s.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, call: Call) {
        self.calls.lock().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    /// Command lines passed to the launcher, in order.
    pub fn spawned(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                Call::Spawn(command) => Some(command.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().iter().filter(|call| predicate(call)).count()
    }

    /// Index of the first call matching `predicate`.
    pub fn position(&self, predicate: impl Fn(&Call) -> bool) -> Option<usize> {
        self.calls.lock().iter().position(|call| predicate(call))
    }
}

/// A full set of fakes sharing one [`CallLog`].
pub struct Harness {
    pub log: CallLog,
    pub launcher: launcher::RecordingLauncher,
    pub metadata: metadata::ScriptedMetadata,
    pub identity: network::FixedIdentity,
    pub runtime: runtime::RecordingRuntime,
}

impl Harness {
    /// Fakes that let a driver bootstrap succeed end to end.
    pub fn new() -> Self {
        let log = CallLog::new();
        Self {
            launcher: launcher::RecordingLauncher::new(log.clone()),
            metadata: metadata::ScriptedMetadata::new(log.clone()),
            identity: network::FixedIdentity::new(
                domain::LOCAL_IP,
                domain::ROUTED_IP,
            ),
            runtime: runtime::RecordingRuntime::new(log.clone()),
            log,
        }
    }

    pub fn ports(&self) -> BootstrapPorts {
        BootstrapPorts::new(
            Arc::new(self.launcher.clone()),
            self.metadata.factory(),
            Arc::new(self.identity.clone()),
            Arc::new(self.runtime.clone()),
        )
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}
