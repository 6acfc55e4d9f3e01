use anyhow::Result;
use clap::Parser;
use parley_core::config::Config;
use parley_core::logging::{init_logging_with_config, LogConfig};
use parley_core::{Directory, JsonStore};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

mod api;
mod error;
mod handlers;
mod server;
mod state;
mod types;

use server::ApiServer;

#[derive(Parser, Debug)]
#[command(name = "parley-api")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a TOML configuration file (env vars are used otherwise)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind address, e.g. 127.0.0.1:3001
    #[arg(short, long)]
    bind: Option<SocketAddr>,

    /// Path of the JSON state file
    #[arg(short, long)]
    data_file: Option<PathBuf>,

    /// Set the log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,

    /// Enable JSON formatted logging
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config file or environment, then flags win
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };
    if let Some(bind) = args.bind {
        config.server.bind_address = bind;
    }
    if let Some(data_file) = args.data_file {
        config.store.data_file = data_file;
    }
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
    if args.json_logs {
        config.logging.json_format = true;
    }
    config.validate()?;

    init_logging_with_config(LogConfig::from(&config.logging))?;

    info!("Parley API server starting on {}", config.server.bind_address);
    info!("Data path: {}", config.store.data_file.display());

    let store = JsonStore::new(&config.store.data_file);
    let directory = Arc::new(Directory::open(store)?);

    let server = ApiServer::new(directory, config.server.bind_address);
    server.run().await
}
