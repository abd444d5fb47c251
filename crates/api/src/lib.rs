//! # MedSync API
//!
//! The API crate provides the web server for the MedSync booking service.
//! It exposes RESTful endpoints for registering doctors and patients, submitting
//! and approving appointments, and a websocket that streams the resolved schedule.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Translate HTTP requests into service calls
//! - **Services**: The booking workflow, the schedule cache and the notifier
//! - **Middleware**: Error mapping for handlers and the `tower` stack
//! - **Config**: Handle environment and application configuration
//!
//! The API uses Axum as the web framework. Storage is reached only through the
//! `ClinicStore` trait, so the same server runs on PostgreSQL or in memory.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Error handling middleware
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;
/// Booking workflow, schedule cache and websocket notifier
pub mod services;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    error_handling::HandleErrorLayer,
    http::{HeaderValue, Method, header},
};
use eyre::{Result, WrapErr};
use medsync_core::{scheduler::SearchConfig, store::ClinicStore};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use crate::services::{BookingService, Notifier, ScheduleCache};

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    pub booking: BookingService,
}

impl ApiState {
    /// Wires the booking service over `store` using the cache and search
    /// settings from `config`.
    pub fn new(store: Arc<dyn ClinicStore>, config: &config::ApiConfig) -> Self {
        let booking = BookingService::new(
            store,
            ScheduleCache::from_secs(config.cache_ttl),
            Notifier::default(),
            SearchConfig {
                max_iterations: config.max_iterations,
            },
        );

        Self { booking }
    }
}

/// Builds the application router with every route attached to `state`.
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Appointment submission, schedule and approval endpoints
        .merge(routes::appointments::routes())
        // Doctor and patient registration endpoints
        .merge(routes::parties::routes())
        // Schedule updates over websocket
        .merge(routes::socket::routes())
        .with_state(state)
}

/// Starts the API server on top of the given store
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use medsync_api::{config::ApiConfig, start_server};
/// use medsync_db::MemoryStore;
///
/// # async fn run() -> eyre::Result<()> {
/// let config = ApiConfig::from_env()?;
/// start_server(config, Arc::new(MemoryStore::new())).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig, store: Arc<dyn ClinicStore>) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = Arc::new(ApiState::new(store, &config));
    let app = build_router(state).layer(TraceLayer::new_for_http());

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let origins = origins
            .iter()
            .map(|origin| origin.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .wrap_err("Invalid API_CORS_ORIGINS value")?;

        let cors = CorsLayer::new()
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
            .allow_origin(origins);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware
    let app = app.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(
                middleware::error_handling::handle_middleware_error,
            ))
            .timeout(Duration::from_secs(config.request_timeout)),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
