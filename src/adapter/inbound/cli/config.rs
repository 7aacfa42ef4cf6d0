//! Handler for the `config` command group, plus config resolution shared by
//! every command.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::adapter::inbound::cli::command::BootstrapArgs;
use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::config::settings::{BootstrapConfig, ConfigOverrides};

/// Config file picked up from the working directory when `--config` is not
/// given.
pub const DEFAULT_CONFIG_FILE: &str = "nodeboot.toml";

/// Load the file (if any), then apply environment and flag overrides.
///
/// Returns the effective config and the file it came from.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, an override is
/// malformed, or the result fails validation.
pub fn resolve(args: &BootstrapArgs) -> Result<(BootstrapConfig, Option<PathBuf>)> {
    let path = match &args.config {
        Some(path) => Some(path.clone()),
        None => Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|p| p.exists()),
    };

    let base = match &path {
        Some(path) => {
            debug!(path = %path.display(), "Loading config file");
            BootstrapConfig::load(path)?
        }
        None => BootstrapConfig::default(),
    };

    let overrides = ConfigOverrides::from_env().merge(args.overrides());
    Ok((overrides.apply(base)?, path))
}

/// Problems that are legal but almost certainly unintended.
#[must_use]
pub fn warnings(config: &BootstrapConfig) -> Vec<String> {
    let mut warnings = Vec::new();
    if !config.role.is_driver() {
        if config.cluster.address.is_none() {
            warnings.push("worker has no cluster address and will not be able to connect".into());
        }
        if config.node.endpoints.ensure_complete().is_err() {
            warnings.push(
                "worker endpoints are incomplete (raylet_socket, object_store_socket, \
                 node_manager_port)"
                    .into(),
            );
        }
        if config.job.id.is_some() {
            warnings.push("job id is ignored for workers".into());
        }
    }
    if config.cluster.address.is_some() && !config.cluster.head_args.is_empty() {
        warnings.push("head_args are ignored when attaching to an existing cluster".into());
    }
    warnings
}

/// Execute `config show`.
pub fn execute_show(args: &BootstrapArgs) -> Result<()> {
    let (config, path) = resolve(args)?;

    output::section("Effective Configuration");
    output::field("Source", source_label(path.as_deref()));
    output::field("Role", config.role);

    output::section("Cluster");
    match &config.cluster.address {
        Some(address) => output::field("Address", output::highlight(address)),
        None if config.launches_head() => output::field(
            "Address",
            format!("(launch head on port {})", config.cluster.port),
        ),
        None => output::field("Address", output::muted("(none)")),
    }
    output::field("Node tool", &config.cluster.node_tool);
    if !config.cluster.head_args.is_empty() {
        output::field("Head args", config.cluster.head_args.join(" "));
    }
    output::field(
        "Wait for head",
        if config.cluster.readiness.enabled {
            format!("yes ({}ms)", config.cluster.readiness.timeout_ms)
        } else {
            "no".to_string()
        },
    );

    output::section("Node");
    output::field(
        "IP address",
        config.node.ip_address.as_deref().unwrap_or("(discovered)"),
    );
    if !config.role.is_driver() || output::verbosity() > 0 {
        let endpoints = &config.node.endpoints;
        output::field("Raylet socket", &endpoints.raylet_socket);
        output::field("Store socket", &endpoints.object_store_socket);
        output::field("Node manager port", endpoints.node_manager_port);
        output::field("Startup token", config.node.startup_token);
    }
    if config.role.is_driver() {
        output::field("Driver name", &config.node.driver_name);
    }

    output::section("Job");
    if config.role.is_driver() {
        output::field(
            "Job id",
            config
                .job
                .id
                .map_or_else(|| "(allocated by cluster)".to_string(), |id| id.to_hex()),
        );
    }
    output::field("Actor lifetime", config.job.default_actor_lifetime);
    if config.job.code_search_path.is_empty() {
        output::field("Code search path", output::muted("(empty)"));
    } else {
        output::field("Code search path", config.job.code_search_path.join(":"));
    }

    output::section("Session");
    output::field("Logs dir", dir_label(config.session.logs_dir.as_deref()));
    output::field(
        "Session dir",
        dir_label(config.session.session_dir.as_deref()),
    );

    output::section("Logging");
    output::field("Level", &config.logging.level);
    output::field("Format", &config.logging.format);

    Ok(())
}

/// Execute `config validate`.
pub fn execute_validate(args: &BootstrapArgs) -> Result<()> {
    let (config, path) = resolve(args)?;

    output::section("Config Validation");
    output::field("Source", source_label(path.as_deref()));
    output::success("Configuration is valid");

    let warnings = warnings(&config);
    if !warnings.is_empty() {
        output::section("Warnings");
        for warning in &warnings {
            output::warning(warning);
        }
    }

    output::hint("run `nodeboot config show` to see the effective values");
    Ok(())
}

fn source_label(path: Option<&Path>) -> String {
    path.map_or_else(
        || "(defaults and environment)".to_string(),
        |p| p.display().to_string(),
    )
}

fn dir_label(dir: Option<&Path>) -> String {
    dir.map_or_else(
        || "(from cluster)".to_string(),
        |d| d.display().to_string(),
    )
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::domain::{BootstrapAddress, WorkerRole};

    fn args_for(path: &Path) -> BootstrapArgs {
        BootstrapArgs {
            config: Some(path.to_path_buf()),
            ..BootstrapArgs::default()
        }
    }

    #[test]
    fn resolve_reads_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("node.toml");
        fs::write(&path, "[cluster]\naddress = \"10.0.0.5:6380\"\n").unwrap();

        let (config, source) = resolve(&args_for(&path)).unwrap();

        assert_eq!(
            config.cluster.address,
            Some(BootstrapAddress::new("10.0.0.5", 6380))
        );
        assert_eq!(source.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("node.toml");
        fs::write(&path, "role = \"worker\"\n[cluster]\nport = 7000\n").unwrap();
        let args = BootstrapArgs {
            port: Some(7100),
            ..args_for(&path)
        };

        let (config, _) = resolve(&args).unwrap();

        assert_eq!(config.role, WorkerRole::Worker);
        assert_eq!(config.cluster.port, 7100);
    }

    #[test]
    fn resolve_fails_for_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(resolve(&args_for(&dir.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn worker_without_address_or_endpoints_warns() {
        let mut config = BootstrapConfig::default();
        config.role = WorkerRole::Worker;

        let warnings = warnings(&config);

        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("no cluster address"));
    }

    #[test]
    fn default_driver_has_no_warnings() {
        assert!(warnings(&BootstrapConfig::default()).is_empty());
    }
}
