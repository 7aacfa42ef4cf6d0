use std::fs;
use std::path::PathBuf;

use nodeboot::domain::{ActorLifetime, BootstrapAddress, WorkerRole};
use nodeboot::error::{ConfigError, Error};
use nodeboot::infrastructure::config::settings::{BootstrapConfig, ConfigOverrides};
use tempfile::TempDir;

fn write_temp_config(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("nodeboot.toml");
    fs::write(&path, contents).expect("write temp config");
    (dir, path)
}

#[test]
fn worker_config_file_is_loaded() {
    let (_dir, path) = write_temp_config(
        r#"
role = "worker"

[cluster]
address = "10.0.0.5:6380"

[node]
ip_address = "10.0.0.7"
raylet_socket = "/tmp/session/sockets/raylet"
object_store_socket = "/tmp/session/sockets/plasma_store"
node_manager_port = 41000
startup_token = 12

[job]
default_actor_lifetime = "detached"
code_search_path = ["/opt/app/lib"]

[logging]
level = "debug"
format = "json"
"#,
    );

    let config = BootstrapConfig::load(&path).unwrap();

    assert_eq!(config.role, WorkerRole::Worker);
    assert_eq!(
        config.cluster.address,
        Some(BootstrapAddress::new("10.0.0.5", 6380))
    );
    assert_eq!(config.node.ip_address.as_deref(), Some("10.0.0.7"));
    assert_eq!(config.node.endpoints.node_manager_port, 41000);
    assert_eq!(config.node.startup_token, 12);
    assert_eq!(config.job.default_actor_lifetime, ActorLifetime::Detached);
    assert_eq!(config.job.code_search_path, ["/opt/app/lib"]);
    assert_eq!(config.logging.format, "json");
}

#[test]
fn config_rejects_address_without_port() {
    let (_dir, path) = write_temp_config("[cluster]\naddress = \"10.0.0.5\"\n");

    let result = BootstrapConfig::load(&path);

    assert!(
        matches!(result, Err(Error::Config(ConfigError::Parse(_)))),
        "Expected parse error for address without port"
    );
}

#[test]
fn config_rejects_unknown_scheme() {
    let (_dir, path) = write_temp_config("[metadata]\nscheme = \"grpc\"\n");

    match BootstrapConfig::load(&path) {
        Err(Error::Config(ConfigError::InvalidValue { field: "scheme", .. })) => {}
        Err(err) => panic!("Expected invalid scheme error, got {err}"),
        Ok(_) => panic!("Expected grpc scheme to be rejected"),
    }
}

#[test]
fn config_rejects_unknown_log_format() {
    let (_dir, path) = write_temp_config("[logging]\nformat = \"jsn\"\n");

    match BootstrapConfig::load(&path) {
        Err(Error::Config(ConfigError::InvalidValue { field: "format", .. })) => {}
        Err(err) => panic!("Expected invalid format error, got {err}"),
        Ok(_) => panic!("Expected jsn log format to be rejected"),
    }
}

#[test]
fn config_rejects_enabled_readiness_without_timeout() {
    let (_dir, path) =
        write_temp_config("[cluster.readiness]\nenabled = true\ntimeout_ms = 0\n");

    assert!(matches!(
        BootstrapConfig::load(&path),
        Err(Error::Config(ConfigError::InvalidValue {
            field: "readiness",
            ..
        }))
    ));
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();

    let result = BootstrapConfig::load(dir.path().join("absent.toml"));

    assert!(matches!(result, Err(Error::Config(ConfigError::ReadFile(_)))));
}

#[test]
fn overrides_win_over_file_values() {
    let (_dir, path) = write_temp_config(
        "[cluster]\naddress = \"10.0.0.5:6380\"\n[job]\nid = \"00000001\"\n",
    );
    let config = BootstrapConfig::load(&path).unwrap();
    let overrides = ConfigOverrides {
        address: Some(String::new()),
        job_id: Some("deadbeef".into()),
        ..ConfigOverrides::default()
    };

    let config = overrides.apply(config).unwrap();

    assert_eq!(config.cluster.address, None);
    assert!(config.launches_head());
    assert_eq!(config.job.id.map(|id| id.to_hex()).as_deref(), Some("deadbeef"));
}

#[test]
fn override_with_bad_job_id_is_rejected() {
    let overrides = ConfigOverrides {
        job_id: Some("xyz".into()),
        ..ConfigOverrides::default()
    };

    match overrides.apply(BootstrapConfig::default()) {
        Err(Error::Config(ConfigError::InvalidValue { field: "job_id", .. })) => {}
        other => panic!("Expected invalid job id, got {other:?}"),
    }
}
