//! Main application entry point.

use clap::Parser;
use playground_app::cli::Cli;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Starting design playground");

    let cli = Cli::parse();
    playground_app::cli::run(cli)
}
