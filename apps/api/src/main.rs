mod config;
mod errors;
mod llm_client;
mod routes;
mod screening;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::screening::demo::{format_report, run_demo};
use crate::screening::orchestrator::Screener;
use crate::state::AppState;

#[derive(Parser, Debug)]
#[command(
    name = "screener",
    about = "Screen job applications with an LLM and pick a follow-up action",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Screen the built-in sample applications and print a report
    Demo,
    /// Screen a single application and print its report
    Screen(ScreenArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug)]
struct ScreenArgs {
    /// Application text to screen
    #[arg(long)]
    application: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (fails on missing provider key)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Initialize LLM client
    let llm = LlmClient::new(config.llm_settings()).context("Failed to build LLM client")?;
    info!(
        "LLM client initialized (provider: {:?}, model: {})",
        llm.provider(),
        llm.model()
    );

    let screener = Screener::new(Arc::new(llm), config.classification_mode);

    match cli.command.unwrap_or_else(|| Command::Serve(ServeArgs::default())) {
        Command::Serve(args) => serve(config, screener, args).await,
        Command::Demo => run_demo(&screener, &mut std::io::stdout()).await,
        Command::Screen(args) => {
            let result = screener.screen(&args.application).await?;
            print!("{}", format_report(&args.application, &result));
            Ok(())
        }
    }
}

async fn serve(config: Config, screener: Screener, args: ServeArgs) -> Result<()> {
    info!("Starting screener API v{}", env!("CARGO_PKG_VERSION"));

    let port = args.port.unwrap_or(config.port);
    let state = AppState { screener, config };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{port}").parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
