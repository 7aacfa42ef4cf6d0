//! Full bootstrap through the production adapters: a scripted node tool
//! spawned as a real process and the HTTP metadata client talking to a
//! local gateway.

#![cfg(unix)]

mod support;

use std::sync::Arc;

use nodeboot::adapter::outbound::metadata::HttpMetadataClient;
use nodeboot::adapter::outbound::process::TokioProcessLauncher;
use nodeboot::adapter::outbound::readiness::TcpReadinessProbe;
use nodeboot::application::bootstrap::{BootstrapPorts, BootstrapState, NodeBootstrap};
use nodeboot::domain::{BootstrapAddress, JobId};
use nodeboot::infrastructure::config::settings::BootstrapConfig;
use nodeboot::testkit::domain::{default_node_record, echo_callback, STORE_SOCKET};
use nodeboot::testkit::network::FixedIdentity;
use nodeboot::testkit::runtime::RecordingRuntime;
use nodeboot::testkit::CallLog;
use serde_json::json;
use support::gateway::{self, Gateway, Route};
use support::node_tool::NodeTool;

async fn cluster_gateway() -> Gateway {
    gateway::spawn(vec![
        Route::text("GET", "/api/health", 200, "ok"),
        Route::bytes("GET", "/api/nodes/driver", default_node_record()),
        Route::json("POST", "/api/jobs/next", json!({ "job_id": "0000002a" })),
        Route::text("GET", "/api/kv/session/session_dir", 200, "/tmp/session_e2e"),
    ])
    .await
}

fn ports(runtime: &RecordingRuntime) -> BootstrapPorts {
    BootstrapPorts::new(
        Arc::new(TokioProcessLauncher::new()),
        HttpMetadataClient::factory("http"),
        Arc::new(FixedIdentity::new("127.0.0.1", "127.0.0.1")),
        Arc::new(runtime.clone()),
    )
}

#[tokio::test]
async fn driver_launches_head_with_real_process_and_attaches_over_http() {
    let gateway = cluster_gateway().await;
    let tool = NodeTool::new(0);
    let runtime = RecordingRuntime::new(CallLog::new());

    let mut config = BootstrapConfig::default();
    config.cluster.port = gateway.port;
    config.cluster.node_tool = tool.program();
    config.cluster.redis_password = "secret".into();
    config.cluster.head_args = vec!["--num-cpus".into(), "2".into()];

    let probe = TcpReadinessProbe::from_config(&config.cluster.readiness);
    let mut bootstrap =
        NodeBootstrap::new(&config, ports(&runtime).with_readiness(Arc::new(probe)));
    bootstrap.start(echo_callback()).await.unwrap();

    assert_eq!(
        tool.invocations(),
        [format!(
            "start --head --port {} --redis-password secret --node-ip-address 127.0.0.1 --num-cpus 2",
            gateway.port
        )]
    );
    let options = runtime.options().unwrap();
    assert_eq!(options.metadata.address, gateway.address);
    assert_eq!(options.store_socket, STORE_SOCKET);
    assert_eq!(options.job_id, Some(JobId::from_int(42)));
    assert_eq!(options.log_dir.to_str(), Some("/tmp/session_e2e/logs"));

    bootstrap.shutdown().await.unwrap();
    assert_eq!(tool.invocations().last().map(String::as_str), Some("stop"));
    assert_eq!(bootstrap.state(), BootstrapState::Stopped);
}

#[tokio::test]
async fn failing_node_tool_does_not_abort_bootstrap() {
    let gateway = cluster_gateway().await;
    let tool = NodeTool::new(1);
    let runtime = RecordingRuntime::new(CallLog::new());

    let mut config = BootstrapConfig::default();
    config.cluster.port = gateway.port;
    config.cluster.node_tool = tool.program();

    let mut bootstrap = NodeBootstrap::new(&config, ports(&runtime));
    bootstrap.start(echo_callback()).await.unwrap();

    assert_eq!(tool.invocations().len(), 1);
    assert!(runtime.options().is_some());
}

#[tokio::test]
async fn driver_attaches_to_existing_cluster_over_http() {
    let gateway = cluster_gateway().await;
    let runtime = RecordingRuntime::new(CallLog::new());

    let mut config = BootstrapConfig::default();
    config.cluster.address = Some(BootstrapAddress::new("127.0.0.1", gateway.port));
    config.session.session_dir = Some("/var/run/session_x".into());

    let mut bootstrap = NodeBootstrap::new(&config, ports(&runtime));
    bootstrap.start(echo_callback()).await.unwrap();
    bootstrap.shutdown().await.unwrap();

    let requests = gateway.requests();
    assert_eq!(requests[0], "GET /api/health");
    assert_eq!(requests[1], "GET /api/nodes/driver?node_ip=127.0.0.1");
    assert_eq!(requests[2], "POST /api/jobs/next");
    assert_eq!(requests.len(), 3);
    assert_eq!(
        runtime.options().unwrap().log_dir.to_str(),
        Some("/var/run/session_x/logs")
    );
}
