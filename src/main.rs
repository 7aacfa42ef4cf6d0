use clap::Parser;
use tracing::error;

use nodeboot::adapter::inbound::cli::{self, command::Cli, output};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    if let Err(e) = cli::dispatch(cli).await {
        error!(error = %e, kind = ?e.failure_kind(), "Fatal error");
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
