//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, limits, request ID, rate limiting)
//! - Bind server to listener
//! - Apply reloaded configuration
//! - Persist store snapshots on graceful shutdown

use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwap;
use axum::{
    body::Body,
    http::Request,
    middleware,
    response::Response,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::admin;
use crate::config::SiteConfig;
use crate::http::{analytics, contact, quote};
use crate::observability::metrics;
use crate::outbound::{LogSink, NotificationSink};
use crate::security::headers::security_headers_middleware;
use crate::security::rate_limit::{rate_limit_middleware, RateLimiter};
use crate::store::{AnalyticsStore, ContentStore, LeadStore, StoreError};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ArcSwap<SiteConfig>>,
    pub limiter: Arc<RateLimiter>,
    pub leads: LeadStore,
    pub content: ContentStore,
    pub analytics: AnalyticsStore,
    pub sink: Arc<dyn NotificationSink>,
}

/// HTTP server for the site backend.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Loads store snapshots from the configured paths when they exist.
    /// Rate-limit window and count are fixed at startup; other settings
    /// follow hot reloads.
    pub fn new(config: SiteConfig) -> Result<Self, StoreError> {
        let leads = match &config.storage.leads_path {
            Some(path) => LeadStore::load_from_file(path)?,
            None => LeadStore::new(None),
        };
        let content = match &config.storage.content_path {
            Some(path) => ContentStore::load_from_file(path)?,
            None => ContentStore::new(None),
        };

        let limiter = Arc::new(RateLimiter::new(
            Duration::from_secs(config.rate_limit.window_secs),
            config.rate_limit.max_requests,
        ));

        let state = AppState {
            config: Arc::new(ArcSwap::from_pointee(config.clone())),
            limiter,
            leads,
            content,
            analytics: AnalyticsStore::new(),
            sink: Arc::new(LogSink),
        };

        let router = Self::build_router(&config, state.clone());
        Ok(Self { router, state })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &SiteConfig, state: AppState) -> Router {
        // Only the contact route sits behind the limiter; estimates and
        // event ingestion are cheap and idempotent enough to stay open.
        let contact_routes = Router::new()
            .route("/api/contact", post(contact::submit_contact))
            .layer(middleware::from_fn_with_state(
                state.clone(),
                rate_limit_middleware,
            ));

        let mut router = Router::new()
            .route("/health", get(health))
            .route("/api/quote", post(quote::create_estimate))
            .route("/api/analytics/event", post(analytics::ingest_event))
            .merge(contact_routes)
            .with_state(state.clone());

        if config.admin.enabled {
            router = router.merge(admin::admin_router(state));
        }

        if config.security.enable_headers {
            router = router.layer(middleware::from_fn(security_headers_middleware));
        }

        router
            .layer(middleware::from_fn(track_requests))
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    ))),
            )
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Consumes configuration updates from the watcher channel and drains
    /// in-flight requests when the shutdown signal fires; store snapshots
    /// are written before returning.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<SiteConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let config_handle = self.state.config.clone();
        tokio::spawn(async move {
            while let Some(new_config) = config_updates.recv().await {
                tracing::info!("Applying reloaded configuration");
                config_handle.store(Arc::new(new_config));
            }
        });

        let state = self.state.clone();
        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        if let Err(e) = state.leads.save_to_file() {
            tracing::error!(error = %e, "Failed to save leads snapshot");
        }
        if let Err(e) = state.content.save_to_file() {
            tracing::error!(error = %e, "Failed to save content snapshot");
        }

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the shared state.
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

/// Liveness probe.
async fn health() -> &'static str {
    "ok"
}

/// Record method/status/latency for every request.
async fn track_requests(request: Request<Body>, next: axum::middleware::Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let response = next.run(request).await;
    metrics::record_request(&method, response.status().as_u16(), start);
    response
}
