//! product-api server binary.
//!
//! Startup order: arguments → configuration → logging → metrics → store →
//! listener. Shutdown starts on SIGINT/SIGTERM.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use product_api::config::{load_config, validate_config, ConfigError, ServiceConfig};
use product_api::http::HttpServer;
use product_api::lifecycle::{build_product_service, wait_for_termination, Shutdown};
use product_api::observability::{init_logging, metrics};

#[derive(Debug, Parser)]
#[command(name = "product-api", version, about = "In-memory product catalogue HTTP service")]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long, env = "PRODUCT_API_CONFIG")]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long, env = "PRODUCT_API_BIND")]
    bind: Option<String>,

    /// Load the demo products at startup.
    #[arg(long)]
    seed: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = resolve_config(&args)?;

    init_logging(&config.observability)?;

    tracing::info!("product-api v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_concurrent_requests = config.listener.max_concurrent_requests,
        request_timeout_secs = config.timeouts.request_secs,
        seed_demo_data = config.store.seed_demo_data,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        // Already checked by validate_config.
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr)?;
        }
    }

    let products = build_product_service(&config.store)?;
    metrics::record_store_size(products.count());

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            match wait_for_termination().await {
                Ok(signal) => tracing::info!(?signal, "Beginning graceful shutdown"),
                Err(e) => tracing::error!(error = %e, "Signal handling failed, shutting down"),
            }
            shutdown.trigger();
        }
    });

    let server = HttpServer::new(config, products);
    tracing::debug!(
        shutdown_grace_secs = server.config().timeouts.shutdown_grace_secs,
        "HTTP server built"
    );
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn resolve_config(args: &Args) -> Result<ServiceConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };

    if let Some(bind) = &args.bind {
        config.listener.bind_address = bind.clone();
    }
    if args.seed {
        config.store.seed_demo_data = true;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}
