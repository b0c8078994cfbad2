//! dvimport API: HTTP service verifying metadata imported into Dataverse.
pub mod config;
pub mod fetch;
pub mod handlers;
pub mod metrics;
pub mod middleware;

pub use config::ApiConfig;
pub use fetch::DataverseClient;
pub use metrics::Metrics;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use dvimport_core::{Comparator, MetadataFetcher, Verifier};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Version reported by `/version`
pub const VERSION: &str = dvimport_core::DVIMPORT_VERSION;

pub struct AppState<F> {
    pub verifier: Verifier<F>,
    pub metrics: Metrics,
}

impl<F: MetadataFetcher> AppState<F> {
    pub fn new(verifier: Verifier<F>) -> Result<Self, prometheus::Error> {
        Ok(Self {
            verifier,
            metrics: Metrics::new()?,
        })
    }
}

pub fn create_app<F: MetadataFetcher + 'static>(state: Arc<AppState<F>>) -> Router {
    Router::new()
        .route("/verify", post(handlers::verify::<F>))
        .route("/version", get(handlers::version))
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics::<F>))
        .layer(axum::middleware::from_fn(middleware::log_requests))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::cors()),
        )
        .with_state(state)
}

pub async fn run(config: ApiConfig) -> anyhow::Result<()> {
    let client = DataverseClient::new(config.fetch_timeout)?;
    let verifier = Verifier::new(client, Comparator::new(config.excluded_fields));
    let state = Arc::new(AppState::new(verifier)?);
    let excluded_fields: Vec<&str> = state.verifier.comparator().exclusions().iter().collect();
    tracing::info!(?excluded_fields, "comparison policy loaded");
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(&config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;

    tracing::info!(addr = %config.addr, "dvimport API listening");
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
