//! # GRA: Climate Adaptation Advisory Server
//!
//! Serves the farm advisory endpoints and the keyword-overlap RAG demo.
//!
//! Usage:
//!   gra                           # Start server (default 0.0.0.0:8000)
//!   gra --port 9000               # Custom port
//!   gra --ingest-sample           # Load the sample corpus at startup
//!   gra --init-config             # Write ~/.gra/config.toml and exit

use anyhow::Result;
use clap::Parser;
use gra_core::GraConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "gra",
    version,
    about = "🌾 GRA: Climate Adaptation Advisory Server"
)]
struct Cli {
    /// Config file (defaults to ~/.gra/config.toml)
    #[arg(short, long)]
    config: Option<String>,

    /// Bind address
    #[arg(long)]
    host: Option<String>,

    /// Listen port
    #[arg(short, long)]
    port: Option<u16>,

    /// Ingest the sample corpus before serving
    #[arg(long)]
    ingest_sample: bool,

    /// Write the default config file and exit
    #[arg(long)]
    init_config: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Default directives when `RUST_LOG` is unset; covers every workspace crate.
fn log_filter(verbose: bool) -> &'static str {
    if verbose {
        "gra=debug,gra_core=debug,gra_gateway=debug,gra_knowledge=debug,gra_agents=debug,\
         gra_providers=debug,tower_http=debug"
    } else {
        "gra=info,gra_core=info,gra_gateway=info,gra_knowledge=info,gra_agents=info,\
         gra_providers=info"
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = log_filter(cli.verbose);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_target(false)
        .init();

    let config_path = cli
        .config
        .as_deref()
        .map(GraConfig::expand_path)
        .unwrap_or_else(GraConfig::default_path);

    if cli.init_config {
        if config_path.exists() {
            println!("⚠️  Config already exists: {}", config_path.display());
        } else {
            GraConfig::default().save_to(&config_path)?;
            println!("✅ Config written: {}", config_path.display());
        }
        return Ok(());
    }

    let mut config = if cli.config.is_some() {
        GraConfig::load_from(&config_path)?
    } else {
        GraConfig::load()?
    };
    config.apply_env_overrides();

    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if cli.ingest_sample {
        config.retriever.ingest_sample_on_start = true;
    }

    tracing::info!("🌾 GRA v{}", env!("CARGO_PKG_VERSION"));
    gra_gateway::start(config).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_covers_workspace_crates() {
        for verbose in [false, true] {
            let filter = log_filter(verbose);
            let level = if verbose { "debug" } else { "info" };
            for target in ["gra", "gra_core", "gra_gateway", "gra_knowledge", "gra_agents", "gra_providers"] {
                assert!(
                    filter.split(',').any(|d| d == format!("{target}={level}")),
                    "{target} missing from {filter}"
                );
            }
            assert!(EnvFilter::try_new(filter).is_ok());
        }
    }
}
