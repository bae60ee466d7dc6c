use anyhow::Result;
use clap::Parser;

use shipload::cli::Cli;
use shipload::cli::commands::load::handle_load_command;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    handle_load_command(cli.load).await
}

/// RUST_LOG wins over --verbose when both are given
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "info,shipload=debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}
