//! BigDemo: a diagnostics webpage.
//!
//! This is the application entry point. It initializes tracing, compiles the
//! page template, builds the shared state and router, and serves HTTP until
//! SIGTERM/SIGINT.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bigdemo::config::{
    LogFormat, ProcessEnv, DEFAULT_LOG_FILTER, DEFAULT_LOG_FORMAT, DEFAULT_PORT,
    DEFAULT_UPTIME_SOURCE,
};
use bigdemo::http::start_server;
use bigdemo::templates::init_templates;
use bigdemo::{create_router, AppState};

/// BigDemo: reports environment, dependency and host status as a webpage
#[derive(Parser, Debug)]
#[command(name = "bigdemo", version, about)]
struct Args {
    /// TCP port to listen on
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Log level filter (e.g., "bigdemo=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,

    /// Log output format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value = DEFAULT_LOG_FORMAT)]
    log_format: LogFormat,

    /// File to read host uptime from
    #[arg(long, default_value = DEFAULT_UPTIME_SOURCE)]
    uptime_source: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let registry =
        tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(&log_filter));
    match args.log_format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }

    let tera = init_templates()?;
    tracing::info!("Initialized templates");

    let state = AppState::new(Arc::new(ProcessEnv), tera, args.uptime_source)?;
    let app = create_router(state);

    start_server(app, args.port).await?;

    Ok(())
}
