//! Process role, worker language and actor lifetime policy.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The part a process plays in the cluster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkerRole {
    /// Owns a job's lifetime; launches a head when no cluster is given.
    #[default]
    Driver,
    /// Joins an existing cluster to execute work.
    Worker,
}

impl WorkerRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Driver => "driver",
            Self::Worker => "worker",
        }
    }

    #[must_use]
    pub const fn is_driver(self) -> bool {
        matches!(self, Self::Driver)
    }
}

impl fmt::Display for WorkerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Language tag the worker runtime registers under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    Java,
    /// Native workers linked against the runtime's C ABI.
    Cpp,
}

/// Default lifetime applied to actors created by a job.
///
/// Discriminants match the `JobConfig.ActorLifetime` wire enum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorLifetime {
    /// Actors outlive the driver that created them.
    Detached = 0,
    /// Actors are torn down with their owning driver.
    #[default]
    NonDetached = 1,
}

impl ActorLifetime {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Detached => "detached",
            Self::NonDetached => "non_detached",
        }
    }
}

impl fmt::Display for ActorLifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ActorLifetime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "detached" => Ok(Self::Detached),
            "non_detached" => Ok(Self::NonDetached),
            other => Err(format!(
                "unknown actor lifetime '{other}' (expected detached or non_detached)"
            )),
        }
    }
}
