//! Bootstrap lifecycle states.

use std::fmt;

/// Where a [`NodeBootstrap`](super::NodeBootstrap) is in its lifecycle.
///
/// States only move forward. `Failed` is terminal: a bootstrap that failed
/// part-way is never resumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapState {
    Unstarted,
    HeadLaunch,
    Connecting,
    /// Driver only.
    NodeResolved,
    ConfigAssembled,
    Initialized,
    ShuttingDown,
    Stopped,
    Failed,
}

impl BootstrapState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unstarted => "unstarted",
            Self::HeadLaunch => "head_launch",
            Self::Connecting => "connecting",
            Self::NodeResolved => "node_resolved",
            Self::ConfigAssembled => "config_assembled",
            Self::Initialized => "initialized",
            Self::ShuttingDown => "shutting_down",
            Self::Stopped => "stopped",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for BootstrapState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
