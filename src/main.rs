//! MetaPredict - Metabolic Syndrome Risk Assessment Client
//!
//! Serves the static assessment page and the small JSON API behind it.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                      METAPREDICT                          │
//! ├───────────────────────────────────────────────────────────┤
//! │  ┌──────────┐   ┌───────────────────────────────────────┐ │
//! │  │ Static   │   │  Presentation Controller              │ │
//! │  │ Page     │──▶│  form ─▶ payload ─▶ predict ─▶ tips   │ │
//! │  │ (Axum)   │   │            │            └─▶ animator  │ │
//! │  └──────────┘   └────────────┼──────────────────────────┘ │
//! │                              ▼                            │
//! │                 ┌──────────────────────┐                  │
//! │                 │ Prediction Service   │ (external HTTP)  │
//! │                 └──────────────────────┘                  │
//! └───────────────────────────────────────────────────────────┘
//! ```

mod api;
mod config;
pub mod constants;
mod error;
mod logic;

use std::net::SocketAddr;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use logic::controller::AssessmentController;
use logic::insight::TipCatalog;

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "metapredict=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    tracing::info!("{} v{} starting...", constants::APP_NAME, constants::APP_VERSION);
    tracing::info!("Prediction service: {}", config.predict_url);
    tracing::info!(
        "Animation: {}ms total, {}ms per tick",
        config.animation_duration_ms,
        config.animation_step_ms
    );

    // Build application state
    let state = AppState {
        controller: AssessmentController::new(&config, TipCatalog::default()),
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    tracing::info!("🚀 Page served on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub controller: AssessmentController,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::handlers::index))
        .route("/health", get(api::handlers::health))
        .route("/api/v1/form", get(api::handlers::get_form))
        .route("/api/v1/form/:field", put(api::handlers::set_field))
        .route("/api/v1/assessment", post(api::handlers::submit_assessment))
        .route("/api/v1/assessment", get(api::handlers::get_assessment))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
