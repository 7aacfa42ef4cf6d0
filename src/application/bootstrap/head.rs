//! Head-node control commands.

use tracing::{info, warn};

use crate::domain::CommandLine;
use crate::error::Result;
use crate::port::ProcessLauncher;

/// `<tool> start --head --port <P> --redis-password <pwd> --node-ip-address <ip> [extra...]`
#[must_use]
pub fn start_head_command(
    node_tool: &str,
    port: u16,
    redis_password: &str,
    node_ip: &str,
    extra_args: &[String],
) -> CommandLine {
    CommandLine::new(node_tool)
        .args(["start", "--head", "--port"])
        .arg(port.to_string())
        .arg("--redis-password")
        .arg(redis_password)
        .arg("--node-ip-address")
        .arg(node_ip)
        .args(extra_args.iter().cloned())
}

/// `<tool> stop`
#[must_use]
pub fn stop_head_command(node_tool: &str) -> CommandLine {
    CommandLine::new(node_tool).arg("stop")
}

/// Spawn `command` and wait for it to exit.
///
/// A non-zero exit is logged but not treated as a failure; only a failed
/// spawn is.
pub(crate) async fn run_to_completion(
    launcher: &dyn ProcessLauncher,
    command: &CommandLine,
) -> Result<()> {
    info!(command = %command, "Running node tool");
    let handle = launcher.spawn(command).await?;
    let exit = handle.wait().await;
    if exit.success() {
        info!(program = command.program(), "Node tool finished");
    } else {
        warn!(
            program = command.program(),
            exit_code = ?exit.code,
            "Node tool exited unsuccessfully"
        );
    }
    Ok(())
}
