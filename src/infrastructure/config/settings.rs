//! Bootstrap configuration loading and validation.
//!
//! Provides [`BootstrapConfig`], the immutable snapshot the orchestrator reads.
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `NODEBOOT_*` environment variables, then command-line flags. Once
//! [`ConfigOverrides::apply`] returns, the config is never mutated again.
//!
//! # Example
//!
//! ```no_run
//! use nodeboot::infrastructure::config::settings::{BootstrapConfig, ConfigOverrides};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = BootstrapConfig::load("nodeboot.toml")?;
//!     let config = ConfigOverrides::from_env().apply(config)?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};

use super::logging::LoggingConfig;
use crate::domain::{
    ActorLifetime, BootstrapAddress, JobId, NodeEndpoints, WorkerRole, DEFAULT_BOOTSTRAP_PORT,
};
use crate::error::{ConfigError, Result};

/// Cluster password used by the node tool when none is configured.
pub const DEFAULT_REDIS_PASSWORD: &str = "5241590000000000";

/// Which cluster to join, and how to create one if there is none.
#[derive(Debug, Clone, Deserialize)]
pub struct ClusterConfig {
    /// Metadata service address (`host:port`) of an existing cluster.
    ///
    /// When absent, a driver launches a single-node head itself.
    #[serde(default, deserialize_with = "deserialize_address")]
    pub address: Option<BootstrapAddress>,

    /// Port for a self-launched head. Ignored when `address` is set.
    /// Defaults to 6379.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Cluster auth token passed to the node tool.
    #[serde(default = "default_redis_password")]
    pub redis_password: String,

    /// Extra arguments appended to the head-launch command, in order.
    #[serde(default)]
    pub head_args: Vec<String>,

    /// Program used to start and stop heads. Defaults to `ray`.
    #[serde(default = "default_node_tool")]
    pub node_tool: String,

    /// Optional wait for a self-launched head to accept connections.
    #[serde(default)]
    pub readiness: ReadinessConfig,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            address: None,
            port: default_port(),
            redis_password: default_redis_password(),
            head_args: Vec::new(),
            node_tool: default_node_tool(),
            readiness: ReadinessConfig::default(),
        }
    }
}

/// Post-launch readiness probing for self-launched heads.
#[derive(Debug, Clone, Deserialize)]
pub struct ReadinessConfig {
    /// Probe the head's metadata port before connecting. Defaults to false,
    /// which trusts the launch command.
    #[serde(default)]
    pub enabled: bool,

    /// Give up after this many milliseconds. Defaults to 30000.
    #[serde(default = "default_readiness_timeout_ms")]
    pub timeout_ms: u64,

    /// Delay between probe attempts. Defaults to 250ms.
    #[serde(default = "default_readiness_poll_ms")]
    pub poll_interval_ms: u64,
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            timeout_ms: default_readiness_timeout_ms(),
            poll_interval_ms: default_readiness_poll_ms(),
        }
    }
}

/// Identity and local endpoints of this node.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeConfig {
    /// Address other members reach this node on. Discovered when absent.
    #[serde(default, deserialize_with = "deserialize_non_empty")]
    pub ip_address: Option<String>,

    /// Pre-assigned raylet socket, object-store socket and node-manager
    /// port. Workers must have all three; drivers get them from the
    /// metadata service.
    #[serde(flatten)]
    pub endpoints: NodeEndpoints,

    /// Token identifying the worker slot this process fills.
    #[serde(default)]
    pub startup_token: i64,

    /// Display name reported for drivers.
    #[serde(default = "default_driver_name")]
    pub driver_name: String,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            ip_address: None,
            endpoints: NodeEndpoints::default(),
            startup_token: 0,
            driver_name: default_driver_name(),
        }
    }
}

/// Job-wide settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobSettings {
    /// Hex job id. When absent, drivers allocate one from the cluster.
    #[serde(default, deserialize_with = "deserialize_job_id")]
    pub id: Option<JobId>,

    #[serde(default)]
    pub default_actor_lifetime: ActorLifetime,

    /// Directories and libraries searched for user code, in order.
    #[serde(default)]
    pub code_search_path: Vec<String>,
}

/// Where the runtime writes logs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionConfig {
    /// Log directory. Derived from the session directory when absent.
    #[serde(default)]
    pub logs_dir: Option<PathBuf>,

    /// Session directory. Fetched from the cluster when absent.
    #[serde(default)]
    pub session_dir: Option<PathBuf>,
}

/// Metadata service client settings.
#[derive(Debug, Clone, Deserialize)]
pub struct MetadataConfig {
    /// URL scheme of the metadata gateway. Defaults to `http`.
    #[serde(default = "default_scheme")]
    pub scheme: String,

    /// Per-request timeout. Defaults to 10000ms.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            scheme: default_scheme(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

/// Process-wide bootstrap configuration.
///
/// Load from a TOML file with [`BootstrapConfig::load`] or parse directly
/// with [`BootstrapConfig::parse_toml`]; layer environment and CLI values on
/// top with [`ConfigOverrides`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BootstrapConfig {
    /// Driver or worker. Defaults to driver.
    #[serde(default)]
    pub role: WorkerRole,

    #[serde(default)]
    pub cluster: ClusterConfig,

    #[serde(default)]
    pub node: NodeConfig,

    #[serde(default)]
    pub job: JobSettings,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub metadata: MetadataConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BootstrapConfig {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML is malformed,
    /// or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Check values that cannot be expressed in the type system.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if self.cluster.node_tool.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "node_tool",
            }
            .into());
        }
        if self.cluster.address.is_none() && self.cluster.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "port",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.cluster.readiness.enabled
            && (self.cluster.readiness.timeout_ms == 0
                || self.cluster.readiness.poll_interval_ms == 0)
        {
            return Err(ConfigError::InvalidValue {
                field: "readiness",
                reason: "timeout_ms and poll_interval_ms must be greater than 0".to_string(),
            }
            .into());
        }
        if self.node.endpoints.node_manager_port < 0 {
            return Err(ConfigError::InvalidValue {
                field: "node_manager_port",
                reason: "must not be negative".to_string(),
            }
            .into());
        }
        if self.node.driver_name.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "driver_name",
            }
            .into());
        }
        if self.metadata.request_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if !matches!(self.metadata.scheme.as_str(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                field: "scheme",
                reason: format!("expected http or https, got '{}'", self.metadata.scheme),
            }
            .into());
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "format",
                reason: format!("expected pretty or json, got '{}'", self.logging.format),
            }
            .into());
        }
        Ok(())
    }

    /// True when this process is expected to create the cluster itself.
    #[must_use]
    pub fn launches_head(&self) -> bool {
        self.role.is_driver() && self.cluster.address.is_none()
    }

    /// Host and port this process will bootstrap against before any
    /// normalization. The host is empty when no address was given.
    #[must_use]
    pub fn bootstrap_host_port(&self) -> (String, u16) {
        match &self.cluster.address {
            Some(address) => (address.host().to_string(), address.port()),
            None => (String::new(), self.cluster.port),
        }
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

/// Values that override a loaded [`BootstrapConfig`].
///
/// Filled from `NODEBOOT_*` environment variables by [`Self::from_env`] and
/// from command-line flags by the CLI. `None` leaves the loaded value alone.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub role: Option<WorkerRole>,
    pub address: Option<String>,
    pub port: Option<u16>,
    pub redis_password: Option<String>,
    pub head_args: Option<Vec<String>>,
    pub node_tool: Option<String>,
    pub node_ip: Option<String>,
    pub raylet_socket: Option<String>,
    pub object_store_socket: Option<String>,
    pub node_manager_port: Option<i32>,
    pub startup_token: Option<i64>,
    pub job_id: Option<String>,
    pub default_actor_lifetime: Option<ActorLifetime>,
    pub code_search_path: Option<Vec<String>>,
    pub logs_dir: Option<PathBuf>,
    pub session_dir: Option<PathBuf>,
    pub wait_for_head: Option<bool>,
}

impl ConfigOverrides {
    /// Collect overrides from the process environment.
    ///
    /// `NODEBOOT_CODE_SEARCH_PATH` is `:`-separated; `NODEBOOT_HEAD_ARGS` is
    /// split on whitespace.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            address: var("NODEBOOT_ADDRESS"),
            redis_password: var("NODEBOOT_REDIS_PASSWORD"),
            head_args: var("NODEBOOT_HEAD_ARGS").map(|v| split_head_args(&v)),
            node_ip: var("NODEBOOT_NODE_IP"),
            job_id: var("NODEBOOT_JOB_ID"),
            code_search_path: var("NODEBOOT_CODE_SEARCH_PATH").map(|v| split_search_path(&v)),
            logs_dir: var("NODEBOOT_LOGS_DIR").map(PathBuf::from),
            session_dir: var("NODEBOOT_SESSION_DIR").map(PathBuf::from),
            ..Self::default()
        }
    }

    /// Layer `other` on top of `self`; values set in `other` win.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            role: other.role.or(self.role),
            address: other.address.or(self.address),
            port: other.port.or(self.port),
            redis_password: other.redis_password.or(self.redis_password),
            head_args: other.head_args.or(self.head_args),
            node_tool: other.node_tool.or(self.node_tool),
            node_ip: other.node_ip.or(self.node_ip),
            raylet_socket: other.raylet_socket.or(self.raylet_socket),
            object_store_socket: other.object_store_socket.or(self.object_store_socket),
            node_manager_port: other.node_manager_port.or(self.node_manager_port),
            startup_token: other.startup_token.or(self.startup_token),
            job_id: other.job_id.or(self.job_id),
            default_actor_lifetime: other.default_actor_lifetime.or(self.default_actor_lifetime),
            code_search_path: other.code_search_path.or(self.code_search_path),
            logs_dir: other.logs_dir.or(self.logs_dir),
            session_dir: other.session_dir.or(self.session_dir),
            wait_for_head: other.wait_for_head.or(self.wait_for_head),
        }
    }

    /// Apply the overrides and re-validate.
    ///
    /// # Errors
    ///
    /// Returns an error if an override cannot be parsed or the resulting
    /// config fails validation.
    #[allow(clippy::result_large_err)]
    pub fn apply(self, mut config: BootstrapConfig) -> Result<BootstrapConfig> {
        if let Some(role) = self.role {
            config.role = role;
        }
        if let Some(address) = self.address {
            config.cluster.address = if address.trim().is_empty() {
                None
            } else {
                Some(BootstrapAddress::parse(&address).map_err(|reason| {
                    ConfigError::InvalidValue {
                        field: "address",
                        reason,
                    }
                })?)
            };
        }
        if let Some(port) = self.port {
            config.cluster.port = port;
        }
        if let Some(password) = self.redis_password {
            config.cluster.redis_password = password;
        }
        if let Some(args) = self.head_args {
            config.cluster.head_args = args;
        }
        if let Some(tool) = self.node_tool {
            config.cluster.node_tool = tool;
        }
        if let Some(wait) = self.wait_for_head {
            config.cluster.readiness.enabled = wait;
        }
        if let Some(ip) = self.node_ip {
            config.node.ip_address = Some(ip).filter(|ip| !ip.trim().is_empty());
        }
        if let Some(socket) = self.raylet_socket {
            config.node.endpoints.raylet_socket = socket;
        }
        if let Some(socket) = self.object_store_socket {
            config.node.endpoints.object_store_socket = socket;
        }
        if let Some(port) = self.node_manager_port {
            config.node.endpoints.node_manager_port = port;
        }
        if let Some(token) = self.startup_token {
            config.node.startup_token = token;
        }
        if let Some(job_id) = self.job_id {
            config.job.id = parse_job_id(&job_id)?;
        }
        if let Some(lifetime) = self.default_actor_lifetime {
            config.job.default_actor_lifetime = lifetime;
        }
        if let Some(paths) = self.code_search_path {
            config.job.code_search_path = paths;
        }
        if let Some(dir) = self.logs_dir {
            config.session.logs_dir = Some(dir);
        }
        if let Some(dir) = self.session_dir {
            config.session.session_dir = Some(dir);
        }

        config.validate()?;
        Ok(config)
    }
}

/// Split a `:`-separated search path, dropping empty segments.
#[must_use]
pub fn split_search_path(raw: &str) -> Vec<String> {
    raw.split(':')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split a head-args string on whitespace.
#[must_use]
pub fn split_head_args(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}

#[allow(clippy::result_large_err)]
fn parse_job_id(raw: &str) -> Result<Option<JobId>> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    JobId::from_hex(raw)
        .map(Some)
        .map_err(|e| {
            ConfigError::InvalidValue {
                field: "job_id",
                reason: e.to_string(),
            }
            .into()
        })
}

fn deserialize_non_empty<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()))
}

fn deserialize_address<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<BootstrapAddress>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_non_empty(deserializer)?
        .map(|raw| BootstrapAddress::parse(&raw).map_err(serde::de::Error::custom))
        .transpose()
}

fn deserialize_job_id<'de, D>(deserializer: D) -> std::result::Result<Option<JobId>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_non_empty(deserializer)?
        .map(|raw| JobId::from_hex(&raw).map_err(serde::de::Error::custom))
        .transpose()
}

const fn default_port() -> u16 {
    DEFAULT_BOOTSTRAP_PORT
}

fn default_redis_password() -> String {
    DEFAULT_REDIS_PASSWORD.to_string()
}

fn default_node_tool() -> String {
    "ray".to_string()
}

fn default_driver_name() -> String {
    "cpp_worker".to_string()
}

fn default_scheme() -> String {
    "http".to_string()
}

const fn default_readiness_timeout_ms() -> u64 {
    30_000
}

const fn default_readiness_poll_ms() -> u64 {
    250
}

const fn default_request_timeout_ms() -> u64 {
    10_000
}
