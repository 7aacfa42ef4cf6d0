use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Coarse classification of a fatal bootstrap failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Connection,
    Lookup,
    Invariant,
    Serialization,
    Spawn,
}

/// Fatal failures raised while wiring a node into the cluster.
///
/// None of these are retried. They travel up to the single abort handler in
/// `main`, which logs them and terminates the process.
#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("Failed to connect to cluster metadata service at {address}")]
    Connection { address: String },

    #[error("lookup of {what} failed: {reason}")]
    Lookup { what: &'static str, reason: String },

    #[error("invariant violated: {0}")]
    Invariant(String),

    #[error("failed to serialize job descriptor: {0}")]
    Serialization(#[source] prost::EncodeError),

    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

impl BootstrapError {
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Connection { .. } => FailureKind::Connection,
            Self::Lookup { .. } => FailureKind::Lookup,
            Self::Invariant(_) => FailureKind::Invariant,
            Self::Serialization(_) => FailureKind::Serialization,
            Self::Spawn { .. } => FailureKind::Spawn,
        }
    }

    pub(crate) fn lookup(what: &'static str, reason: impl ToString) -> Self {
        Self::Lookup {
            what,
            reason: reason.to_string(),
        }
    }
}

/// Orchestrator lifecycle misuse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("bootstrap already ran (state: {state})")]
    AlreadyStarted { state: &'static str },

    #[error("node is already stopped")]
    AlreadyStopped,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Bootstrap(#[from] BootstrapError),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error("metadata service error: {0}")]
    Metadata(String),

    #[error("worker runtime error: {0}")]
    Runtime(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("parse error: {0}")]
    Parse(String),
}

impl Error {
    /// Failure kind when this error is a fatal bootstrap failure.
    #[must_use]
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Bootstrap(err) => Some(err.kind()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
