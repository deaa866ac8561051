use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lead_intake_api::channels::ChannelSet;
use lead_intake_api::config::Config;
use lead_intake_api::handlers::{self, AppState};

/// Main entry point for the application.
///
/// Initializes logging, configuration, and the three delivery channels,
/// then starts the Axum server with the intake routes behind a request
/// body limit and per-IP rate limiting.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lead_intake_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    // Build the delivery channels once; each submission fans out to all of
    // them concurrently.
    let channels = ChannelSet::from_config(&config)
        .map_err(|e| anyhow::anyhow!("Failed to build delivery channels: {}", e))?;
    tracing::info!("Delivery channels initialized");

    let app_state = Arc::new(AppState {
        config: config.clone(),
        channels,
    });

    // Configure rate limiter: 10 requests/second per IP, burst of 20
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(10)
            .burst_size(20)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .unwrap(),
    );

    // Build protected routes with security layers
    let protected_routes = Router::new()
        .route("/api/v1/leads", post(handlers::submit_lead))
        .route("/api/v1/services", get(handlers::list_services))
        .layer(
            ServiceBuilder::new()
                // Lead submissions are small; 64KB is generous
                .layer(RequestBodyLimitLayer::new(64 * 1024))
                // Rate limiting: 10 req/sec per IP, burst of 20
                .layer(GovernorLayer {
                    config: governor_conf,
                }),
        );

    // Health check bypasses rate limiting
    let app = Router::new()
        .route("/health", get(handlers::health))
        .merge(protected_routes)
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
