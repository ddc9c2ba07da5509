//! Function host entry point.
//!
//! Startup order: tracing subscriber, configuration (path from the first
//! CLI argument, else `host.toml` when present, else defaults), telemetry
//! connection-string resolution (fatal when missing), listener bind,
//! reclaim task spawn, HTTP server.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use function_host::config::{load_config, load_config_or_default, DEFAULT_CONFIG_PATH};
use function_host::lifecycle::Shutdown;
use function_host::store::AccumulatorStore;
use function_host::tasks::ReclaimTask;
use function_host::trace::{RequestTracer, TracingSink};
use function_host::HttpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "function_host=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("function-host v0.1.0 starting");

    // Load configuration: explicit path must exist; the default path falls
    // back to defaults when absent
    let config = match std::env::args().nth(1) {
        Some(path) => load_config(Path::new(&path))?,
        None => load_config_or_default(Path::new(DEFAULT_CONFIG_PATH))?,
    };

    // The telemetry backend connection string is required before serving
    // anything.
    let Some(_connection_string) = config.telemetry.resolve_connection_string() else {
        tracing::error!(
            "Telemetry connection string missing: set telemetry.connection_string \
             or the TELEMETRY_CONNECTION_STRING environment variable"
        );
        return Err("missing telemetry connection string".into());
    };

    tracing::info!(
        bind_address = %config.listener.bind_address,
        reclaim_interval_secs = config.accumulator.reclaim_interval_secs,
        growth_enabled = config.accumulator.enable_growth,
        downstream = %config.downstream.url,
        "Configuration loaded"
    );

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    let store = Arc::new(AccumulatorStore::new());
    let tracer = Arc::new(RequestTracer::new(
        Arc::new(TracingSink),
        Duration::from_secs(config.timeouts.dispatch_secs),
        config.downstream.suffix_correlation_token,
    ));

    let shutdown = Shutdown::new();

    // Spawn the scheduled reclaim task
    let reclaim = ReclaimTask::new(
        store.clone(),
        Duration::from_secs(config.accumulator.reclaim_interval_secs),
    );
    let reclaim_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        reclaim.run(reclaim_shutdown).await;
    });

    let server_shutdown = shutdown.subscribe();

    // Ctrl+C triggers coordinated shutdown
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received");
            shutdown.trigger();
        }
    });

    // Create and run HTTP server
    let server = HttpServer::new(config, store, tracer);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
