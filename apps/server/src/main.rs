//! CodeMerge server — transient text-file upload and merge service.
//!
//! Accepts text files over HTTP, normalizes them to UTF-8, holds them in
//! memory with a TTL, and merges selected files into one download with
//! per-file comment headers.

mod routes;
mod server;
mod state;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;

use codemerge_shared::{AppConfig, apply_env_overrides, load_config, load_config_from};

/// CodeMerge — merge uploaded text files into one.
#[derive(Parser)]
#[command(
    name = "codemerge-server",
    version,
    about = "Upload text files, merge them into one output with per-file comment headers.",
    long_about = None,
)]
struct Args {
    /// Path to a config file (defaults to ~/.codemerge/codemerge.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the listen port.
    #[arg(long)]
    port: Option<u16>,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text")]
    log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

/// Initialize tracing based on CLI flags.
fn init_tracing(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match args.log_format {
        LogFormat::Text => {
            fmt().with_env_filter(env_filter).with_target(false).init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

/// Resolve the effective config: file, then env overrides, then CLI flags.
fn resolve_config(args: &Args) -> Result<AppConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let mut c = load_config_from(path)?;
            apply_env_overrides(&mut c)?;
            c
        }
        None => load_config()?,
    };

    if let Some(port) = args.port {
        config.server.port = port;
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    init_tracing(&args);

    let config = resolve_config(&args)?;
    server::run(config).await
}
