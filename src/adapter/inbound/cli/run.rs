//! Handler for the `run` command.

use std::future::Future;
use std::io;

use tokio::signal;
use tracing::{error, info};

use crate::adapter::inbound::cli::command::RunArgs;
use crate::adapter::inbound::cli::{config, output};
use crate::application::bootstrap::NodeBootstrap;
use crate::domain::TaskExecutionCallback;
use crate::error::Result;
use crate::infrastructure::bootstrap::build_default_ports;
use crate::infrastructure::config::settings::BootstrapConfig;

/// Execute the run command.
pub async fn execute(args: &RunArgs, verbose: u8) -> Result<()> {
    let (config, _) = config::resolve(&args.bootstrap)?;

    let mut logging = config.logging.clone().with_verbosity(verbose);
    if args.json_logs || output::is_json() {
        logging.format = "json".into();
    }
    logging.init();

    if !output::is_quiet() || output::is_json() {
        print_startup_config(&config);
    }

    let ports = build_default_ports(&config);
    let mut bootstrap = NodeBootstrap::new(&config, ports);
    bootstrap.start(unassigned_task_callback()).await?;
    output::success("Node attached");

    if args.once {
        info!("Single-shot run, shutting down");
        bootstrap.shutdown().await?;
    } else {
        output::note("Press ctrl-c to detach");
        detach_on(signal::ctrl_c(), &mut bootstrap).await?;
    }

    output::success("Node detached");
    Ok(())
}

/// Wait for `signal`, then shut the node down. A signal that cannot be
/// installed still ends the wait so a launched head is stopped.
async fn detach_on(
    signal: impl Future<Output = io::Result<()>>,
    bootstrap: &mut NodeBootstrap<'_>,
) -> Result<()> {
    match signal.await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!(error = %e, "Failed to listen for shutdown signal, detaching"),
    }
    bootstrap.shutdown().await
}

/// Callback for processes that only bootstrap and never execute tasks.
fn unassigned_task_callback() -> TaskExecutionCallback {
    TaskExecutionCallback::new(|task| {
        Err(format!(
            "no task executor registered for '{}'",
            task.function_name
        ))
    })
}

fn print_startup_config(config: &BootstrapConfig) {
    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Role", config.role);
    match &config.cluster.address {
        Some(address) => output::field("Cluster", output::highlight(address)),
        None if config.launches_head() => output::field(
            "Cluster",
            format!("new head on port {}", config.cluster.port),
        ),
        None => output::field("Cluster", output::muted("(none)")),
    }
    if output::verbosity() > 0 {
        output::field("Node tool", &config.cluster.node_tool);
        output::field("Actor lifetime", config.job.default_actor_lifetime);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::bootstrap::BootstrapState;
    use crate::domain::TaskInvocation;
    use crate::testkit::{config as fixtures, Call, Harness};

    #[test]
    fn unassigned_callback_rejects_every_task() {
        let task = TaskInvocation {
            function_name: "train".into(),
            args: Vec::new(),
        };
        let result = unassigned_task_callback().call(&task);
        assert_eq!(
            result,
            Err("no task executor registered for 'train'".to_string())
        );
    }

    #[tokio::test]
    async fn failed_signal_listener_still_stops_launched_head() {
        let harness = Harness::new();
        let config = fixtures::driver_without_address(6379);
        let mut bootstrap = NodeBootstrap::new(&config, harness.ports());
        bootstrap
            .start(crate::testkit::domain::echo_callback())
            .await
            .unwrap();

        let signal = async { Err::<(), _>(io::Error::other("no signal support")) };
        detach_on(signal, &mut bootstrap).await.unwrap();

        assert_eq!(bootstrap.state(), BootstrapState::Stopped);
        assert_eq!(harness.log.count(|c| *c == Call::Shutdown), 1);
        assert_eq!(harness.log.count(|c| *c == Call::Spawn("ray stop".into())), 1);
    }
}
