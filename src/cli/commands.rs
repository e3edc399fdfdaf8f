use crate::client::{script::run_script, UserClient};
use crate::runtime_config::RuntimeConfig;
use crate::server::{HttpServer, UserService};
use crate::store::RecordStore;
use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "usersvc")]
#[command(about = "User record HTTP service and scripted client", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the server
    Serve {
        /// Listen address (overrides USERSVC_ADDR)
        #[arg(long)]
        addr: Option<String>,

        /// Record store file (overrides USERSVC_STORE)
        #[arg(long)]
        store: Option<PathBuf>,
    },
    /// Run the scripted request sequence against a running server
    Client {
        #[arg(long, default_value = "127.0.0.1:7070")]
        addr: String,
    },
}

pub fn run_cli(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Serve { addr, store } => {
            let config = RuntimeConfig::from_env().with_overrides(addr, store);
            serve(&config)
        }
        Commands::Client { addr } => {
            let mut client = UserClient::connect(&addr)?;
            let stdout = std::io::stdout();
            run_script(&mut client, &mut stdout.lock())?;
            Ok(())
        }
    }
}

fn serve(config: &RuntimeConfig) -> Result<()> {
    let service = UserService::new(RecordStore::new(&config.store_path));
    let handle = HttpServer::new(service)
        .with_stack_size(config.stack_size)
        .start(config.addr.as_str())
        .with_context(|| format!("failed to bind {}", config.addr))?;
    println!("usersvc listening on {}", handle.local_addr());

    #[cfg(unix)]
    {
        wait_for_shutdown_signal()?;
        handle.stop();
        Ok(())
    }

    #[cfg(not(unix))]
    {
        handle
            .join()
            .map_err(|e| anyhow!("listener failed: {e:?}"))
    }
}

#[cfg(unix)]
fn wait_for_shutdown_signal() -> Result<()> {
    use signal_hook::consts::{SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;

    let mut signals = Signals::new([SIGINT, SIGTERM]).context("installing signal handlers")?;
    let signal = signals
        .forever()
        .next()
        .ok_or_else(|| anyhow!("signal iterator closed"))?;
    info!(signal, "shutdown signal received");
    Ok(())
}
