//! Bootstrap scenarios through the public API with recording collaborators.

use nodeboot::application::bootstrap::{BootstrapState, NodeBootstrap};
use nodeboot::domain::{JobId, WorkerRole};
use nodeboot::error::{BootstrapError, Error, FailureKind};
use nodeboot::testkit::domain::{echo_callback, node_record, LOCAL_IP, RAYLET_SOCKET};
use nodeboot::testkit::{config, Call, Harness};

#[tokio::test]
async fn driver_without_address_launches_head_then_attaches() {
    let harness = Harness::new();
    let config = config::driver_without_address(6380);
    let mut bootstrap = NodeBootstrap::new(&config, harness.ports());

    tokio_test::assert_ok!(bootstrap.start(echo_callback()).await);

    let calls = harness.log.calls();
    let expected_spawn = Call::Spawn(format!(
        "ray start --head --port 6380 --redis-password test-password --node-ip-address {LOCAL_IP}"
    ));
    let expected_connect = Call::Connect(format!("{LOCAL_IP}:6380"));
    let spawn_at = calls.iter().position(|c| *c == expected_spawn).unwrap();
    let connect_at = calls.iter().position(|c| *c == expected_connect).unwrap();
    assert!(spawn_at < connect_at);
    assert_eq!(harness.log.spawned().len(), 1);
    assert_eq!(bootstrap.state(), BootstrapState::Initialized);

    tokio_test::assert_ok!(bootstrap.shutdown().await);
    assert_eq!(harness.log.spawned().last().map(String::as_str), Some("ray stop"));
}

#[tokio::test]
async fn worker_with_address_attaches_without_lookup() {
    let harness = Harness::new();
    let config = config::worker_with_address("10.0.0.5:6380");
    let mut bootstrap = NodeBootstrap::new(&config, harness.ports());

    tokio_test::assert_ok!(bootstrap.start(echo_callback()).await);
    tokio_test::assert_ok!(bootstrap.shutdown().await);

    assert!(harness.log.spawned().is_empty());
    assert!(harness
        .log
        .calls()
        .contains(&Call::Connect("10.0.0.5:6380".into())));
    assert_eq!(
        harness.log.count(|c| matches!(c, Call::NodeForDriver(_))),
        0
    );
    let options = harness.runtime.options().unwrap();
    assert_eq!(options.role, WorkerRole::Worker);
    assert_eq!(options.job_id, None);
}

#[tokio::test]
async fn incomplete_node_record_stops_before_runtime() {
    let harness = Harness::new();
    harness
        .metadata
        .script(|s| s.node_record = Some(node_record(RAYLET_SOCKET, "", 40123)));
    let config = config::driver_with_address("10.0.0.5:6380");
    let mut bootstrap = NodeBootstrap::new(&config, harness.ports());

    let err = bootstrap.start(echo_callback()).await.unwrap_err();

    assert!(matches!(err, Error::Bootstrap(BootstrapError::Invariant(_))));
    assert_eq!(err.failure_kind(), Some(FailureKind::Invariant));
    assert_eq!(harness.log.count(|c| *c == Call::Initialize), 0);
    assert_eq!(bootstrap.state(), BootstrapState::Failed);
}

#[tokio::test]
async fn configured_job_id_skips_allocation() {
    let harness = Harness::new();
    let mut config = config::driver_with_address("10.0.0.5:6380");
    config.job.id = Some("deadbeef".parse::<JobId>().unwrap());
    let mut bootstrap = NodeBootstrap::new(&config, harness.ports());

    tokio_test::assert_ok!(bootstrap.start(echo_callback()).await);

    let job_id = harness.runtime.options().unwrap().job_id.unwrap();
    assert_eq!(job_id.as_bytes(), &[0xde, 0xad, 0xbe, 0xef]);
    assert_eq!(harness.log.count(|c| *c == Call::NextJobId), 0);
}

#[tokio::test]
async fn unreachable_cluster_reports_connection_failure() {
    let harness = Harness::new();
    harness.metadata.script(|s| s.reachable = false);
    let config = config::driver_with_address("10.0.0.5:6380");
    let mut bootstrap = NodeBootstrap::new(&config, harness.ports());

    let err = bootstrap.start(echo_callback()).await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "Failed to connect to cluster metadata service at 10.0.0.5:6380"
    );
}
