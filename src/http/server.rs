//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeouts, body limit, request ID, metrics)
//! - Bind server to listener
//! - Stop accepting on shutdown and drain within the grace period

use std::future::IntoFuture;
use std::time::Duration;

use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::Request,
    middleware,
    routing::{get, put},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, oneshot};
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServiceConfig;
use crate::http::middleware::track_metrics;
use crate::http::products::{create_product, list_products, replace_product};
use crate::http::request::{request_id_middleware, RequestIdExt};
use crate::http::status::get_status;
use crate::lifecycle::shutdown;
use crate::products::ProductService;

/// Application state injected into handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub products: ProductService,
}

/// HTTP server for the product API.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server serving `products`.
    pub fn new(config: ServiceConfig, products: ProductService) -> Self {
        let state = AppState { products };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(list_products).post(create_product))
            .route("/{id}", put(replace_product))
            .route("/status", get(get_status))
            .route_layer(middleware::from_fn(track_metrics))
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.security.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(GlobalConcurrencyLimitLayer::new(
                config.listener.max_concurrent_requests,
            ))
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                let request_id = request
                    .request_id()
                    .map(|id| id.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id,
                )
            }))
            .layer(middleware::from_fn(request_id_middleware))
    }

    /// The fully layered router, for driving the API without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    ///
    /// After the signal, in-flight requests get `timeouts.shutdown_grace_secs`
    /// to finish before the server stops regardless.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        let grace = Duration::from_secs(self.config.timeouts.shutdown_grace_secs);
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        let (draining_tx, draining_rx) = oneshot::channel::<()>();
        let signal = async move {
            shutdown::wait_for(shutdown).await;
            tracing::info!(grace_secs = grace.as_secs(), "Shutdown requested, draining requests");
            let _ = draining_tx.send(());
        };

        let serve = axum::serve(listener, self.router)
            .with_graceful_shutdown(signal)
            .into_future();
        let deadline = async move {
            if draining_rx.await.is_err() {
                std::future::pending::<()>().await;
            }
            tokio::time::sleep(grace).await;
        };

        tokio::select! {
            result = serve => result?,
            _ = deadline => {
                tracing::warn!(grace_secs = grace.as_secs(), "Grace period elapsed, abandoning in-flight requests");
            }
        }

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}
