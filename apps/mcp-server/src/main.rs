//! MutaDoc MCP Server Binary
//!
//! Entry point for the MCP server.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use mcp_server::mcp::server::DEFAULT_TIMEOUT_MS;
use mcp_server::{MutaDocServer, MutationEngine};
use mutation_engine::PresetRegistry;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "mutadoc-mcp")]
#[command(version, about = "Document mutation testing via Model Context Protocol")]
struct Args {
    /// Transport mode
    #[arg(short, long, default_value = "stdio")]
    transport: String,

    /// Directory of preset files that shadow or extend the built-in presets
    #[arg(long, env = "MUTADOC_PRESETS_DIR")]
    presets_dir: Option<PathBuf>,

    /// Analysis timeout in milliseconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS)]
    timeout_ms: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // stdout carries JSON-RPC frames, so logs go to stderr
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting MutaDoc MCP Server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Transport: {}", args.transport);

    let presets = match args.presets_dir {
        Some(dir) => {
            if !dir.is_dir() {
                bail!("Presets directory not found: {}", dir.display());
            }
            tracing::info!("Presets directory: {}", dir.display());
            PresetRegistry::with_directory(dir)
        }
        None => PresetRegistry::builtin(),
    };
    let server = MutaDocServer::new(MutationEngine::with_presets(presets))
        .with_timeout(args.timeout_ms);

    match args.transport.as_str() {
        "stdio" => {
            mcp_server::transport::stdio::run_stdio_server(server)
                .await
                .context("stdio transport failed")?;
        }
        other => bail!("Unknown transport: {}. Use 'stdio'", other),
    }

    Ok(())
}
