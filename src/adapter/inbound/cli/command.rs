//! Command-line interface definitions.
//!
//! Defines the CLI structure for nodeboot using `clap`. Every command that
//! touches a cluster accepts the same configuration flags, which override
//! `NODEBOOT_*` environment variables, which override the config file.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::domain::{ActorLifetime, WorkerRole};
use crate::infrastructure::config::settings::{split_head_args, split_search_path, ConfigOverrides};

/// Attach this process to a cluster, or start one
#[derive(Parser, Debug)]
#[command(name = "nodeboot")]
#[command(version)]
pub struct Cli {
    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Bootstrap the node and keep it attached until interrupted
    Run(Box<RunArgs>),

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Subcommands for `nodeboot config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display the effective configuration with defaults and overrides applied.
    Show(BootstrapArgs),
    /// Validate the configuration without contacting the cluster.
    Validate(BootstrapArgs),
}

/// Subcommands for `nodeboot check`.
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Connect to the cluster metadata service and report the result.
    Connection(BootstrapArgs),
}

/// Role flag values.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum RoleArg {
    Driver,
    Worker,
}

impl From<RoleArg> for WorkerRole {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Driver => Self::Driver,
            RoleArg::Worker => Self::Worker,
        }
    }
}

/// Configuration source and per-field overrides shared by all commands.
#[derive(Args, Debug, Default)]
pub struct BootstrapArgs {
    /// Path to the configuration file [default: ./nodeboot.toml if present]
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Process role.
    #[arg(long, value_enum)]
    pub role: Option<RoleArg>,

    /// Metadata service address (host:port) of an existing cluster.
    #[arg(long)]
    pub address: Option<String>,

    /// Port for a self-launched head.
    #[arg(long)]
    pub port: Option<u16>,

    /// Cluster auth token passed to the node tool.
    #[arg(long)]
    pub redis_password: Option<String>,

    /// Extra head-launch arguments, whitespace-separated.
    #[arg(long, allow_hyphen_values = true)]
    pub head_args: Option<String>,

    /// Program used to start and stop heads.
    #[arg(long)]
    pub node_tool: Option<String>,

    /// Address other members reach this node on.
    #[arg(long)]
    pub node_ip: Option<String>,

    /// Pre-assigned raylet socket path (workers).
    #[arg(long)]
    pub raylet_socket: Option<String>,

    /// Pre-assigned object-store socket path (workers).
    #[arg(long)]
    pub object_store_socket: Option<String>,

    /// Pre-assigned node-manager port (workers).
    #[arg(long)]
    pub node_manager_port: Option<i32>,

    /// Worker slot token.
    #[arg(long)]
    pub startup_token: Option<i64>,

    /// Job id as 8 hex characters.
    #[arg(long)]
    pub job_id: Option<String>,

    /// Default actor lifetime [detached, non_detached].
    #[arg(long)]
    pub actor_lifetime: Option<ActorLifetime>,

    /// Code search path, `:`-separated.
    #[arg(long)]
    pub code_search_path: Option<String>,

    /// Log directory.
    #[arg(long)]
    pub logs_dir: Option<PathBuf>,

    /// Session directory.
    #[arg(long)]
    pub session_dir: Option<PathBuf>,

    /// Wait for a self-launched head to accept connections.
    #[arg(long)]
    pub wait_for_head: bool,
}

impl BootstrapArgs {
    /// Overrides carried by the flags that were given.
    #[must_use]
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            role: self.role.map(Into::into),
            address: self.address.clone(),
            port: self.port,
            redis_password: self.redis_password.clone(),
            head_args: self.head_args.as_deref().map(split_head_args),
            node_tool: self.node_tool.clone(),
            node_ip: self.node_ip.clone(),
            raylet_socket: self.raylet_socket.clone(),
            object_store_socket: self.object_store_socket.clone(),
            node_manager_port: self.node_manager_port,
            startup_token: self.startup_token,
            job_id: self.job_id.clone(),
            default_actor_lifetime: self.actor_lifetime,
            code_search_path: self.code_search_path.as_deref().map(split_search_path),
            logs_dir: self.logs_dir.clone(),
            session_dir: self.session_dir.clone(),
            wait_for_head: self.wait_for_head.then_some(true),
        }
    }
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub bootstrap: BootstrapArgs,

    /// Shut down right after the runtime initializes instead of waiting
    /// for ctrl-c.
    #[arg(long)]
    pub once: bool,

    /// Use JSON log format instead of pretty-printed logs.
    #[arg(long)]
    pub json_logs: bool,
}
