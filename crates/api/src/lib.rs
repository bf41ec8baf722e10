//! # evslot API
//!
//! HTTP surface of the EV charging slot booking service.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Translate requests into `BookingService` calls
//! - **Middleware**: Bearer-token identity and error-to-envelope mapping
//! - **Config**: Handle environment and application configuration
//!
//! The booking rules themselves live in `evslot-core`; storage is provided
//! by `evslot-db`.

/// Configuration module for API settings
pub mod config;
/// Envelope-aware request extractors
pub mod extract;
/// Request handlers
pub mod handlers;
/// Middleware for authentication and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::Router;
use eyre::Result;
use evslot_core::{catalog::SlotCatalog, clock::SystemClock, service::BookingService};
use evslot_db::repositories::booking::PgBookingRepository;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use crate::middleware::auth::{IdentityProvider, JwtIdentity};

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// Booking rules bound to a repository, clock and slot catalog
    pub bookings: BookingService,
    /// Verifies bearer tokens on protected routes
    pub identity: Arc<dyn IdentityProvider>,
}

/// Builds the router with every endpoint and request tracing attached.
///
/// Start-up concerns like CORS and timeouts are added by [`start_server`].
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Booking lifecycle endpoints
        .merge(routes::booking::routes())
        // Availability lookup
        .merge(routes::availability::routes())
        // Attach shared state to all routes
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Starts the API server with the provided configuration and database connection
///
/// # Arguments
///
/// * `config` - API configuration including host, port, and other settings
/// * `db_pool` - PostgreSQL connection pool for booking storage
///
/// # Example
///
/// ```no_run
/// # async fn run() -> eyre::Result<()> {
/// let config = evslot_api::config::ApiConfig::from_env()?;
/// let db_pool = evslot_db::create_pool(&config.database_url, config.database_max_connections).await?;
/// evslot_api::start_server(config, db_pool).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Create shared state with dependencies
    let bookings = BookingService::new(
        Arc::new(PgBookingRepository::new(db_pool)),
        Arc::new(SystemClock),
        SlotCatalog::standard()?,
    );
    let state = Arc::new(ApiState {
        bookings,
        identity: Arc::new(JwtIdentity::new(&config.jwt_secret)),
    });

    let app = router(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let origins = origins
            .iter()
            .map(|origin| origin.parse())
            .collect::<Result<Vec<axum::http::HeaderValue>, _>>()?;
        let cors = CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(origins)
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware
    let app = app.layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout)));

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
