//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the axum Router with the trigger routes
//! - Wire up middleware (timeout, trace)
//! - Inject shared state (store, tracer, config) into handlers
//! - Serve with graceful shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{AccumulatorConfig, DownstreamConfig, HostConfig};
use crate::http::handlers;
use crate::store::AccumulatorStore;
use crate::trace::RequestTracer;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<AccumulatorStore>,
    pub tracer: Arc<RequestTracer>,
    pub accumulator: AccumulatorConfig,
    pub downstream: DownstreamConfig,
}

/// HTTP server for the function host.
pub struct HttpServer {
    router: Router,
    config: HostConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and subsystems.
    pub fn new(
        config: HostConfig,
        store: Arc<AccumulatorStore>,
        tracer: Arc<RequestTracer>,
    ) -> Self {
        let state = AppState {
            store,
            tracer,
            accumulator: config.accumulator.clone(),
            downstream: config.downstream.clone(),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the axum router with all middleware layers.
    fn build_router(config: &HostConfig, state: AppState) -> Router {
        Router::new()
            .route("/http1", get(handlers::http1).post(handlers::http1))
            .route(
                "/http1/{token}",
                get(handlers::http1_with_token).post(handlers::http1_with_token),
            )
            .route("/http2", get(handlers::http2).post(handlers::http2))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Returns once the shutdown signal fires and in-flight requests drain.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server received shutdown signal");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &HostConfig {
        &self.config
    }
}
