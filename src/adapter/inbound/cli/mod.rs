//! CLI module graph and command dispatch.

pub mod check;
pub mod command;
pub mod config;
pub mod output;
pub mod run;

use command::{CheckCommand, Cli, Commands, ConfigCommand};

use crate::error::Result;
use crate::infrastructure::config::logging::LoggingConfig;

/// Route a parsed command line to its handler.
///
/// # Errors
///
/// Returns whatever the selected handler returns.
pub async fn dispatch(cli: Cli) -> Result<()> {
    output::configure(output::OutputConfig::new(cli.json, cli.quiet, cli.verbose));

    match cli.command {
        Commands::Run(args) => run::execute(&args, cli.verbose).await,
        Commands::Config(command) => {
            init_quiet_logging(cli.json, cli.verbose);
            match command {
                ConfigCommand::Show(args) => config::execute_show(&args),
                ConfigCommand::Validate(args) => config::execute_validate(&args),
            }
        }
        Commands::Check(CheckCommand::Connection(args)) => {
            check::connection::execute_connection(&args).await
        }
    }
}

/// Logging for commands that only report: warnings unless `-v` is given.
fn init_quiet_logging(json: bool, verbose: u8) {
    let logging = LoggingConfig {
        level: "warn".into(),
        format: if json { "json" } else { "pretty" }.into(),
    };
    logging.with_verbosity(verbose).init();
}
