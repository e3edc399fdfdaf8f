use clap::Parser;
use usersvc::cli::{run_cli, Cli};
use usersvc::logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging_with_config(&logging::LogConfig::from_env())?;
    run_cli(cli)
}
