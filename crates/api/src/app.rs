use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{metrics_handler, metrics_middleware, trace_id};
use crate::routes::{feedback, health, settings};
use crate::services::{EmailService, FeedbackService, SettingsStore};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub settings: SettingsStore,
    pub feedback: FeedbackService,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let config = Arc::new(config);

    let email = EmailService::new(config.mail.clone());
    let settings_store = SettingsStore::new(pool.clone(), config.mail.sender_email.clone());
    let feedback_service = FeedbackService::new(
        pool.clone(),
        settings_store.clone(),
        email,
        config.mail.sender_email.clone(),
    );

    let state = AppState {
        pool,
        config: config.clone(),
        settings: settings_store,
        feedback: feedback_service,
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Production: only allow specified origins
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Feedback routes: public submission plus moderation endpoints
    let feedback_routes = Router::new()
        .route(
            "/api/feedback",
            post(feedback::submit_feedback).get(feedback::list_feedback),
        )
        .route(
            "/api/feedback/approved",
            get(feedback::list_approved_feedback),
        )
        .route("/api/feedback/stats", get(feedback::feedback_stats))
        .route(
            "/api/feedback/:id/status",
            patch(feedback::update_feedback_status),
        )
        .route("/api/feedback/:id", delete(feedback::delete_feedback));

    // Settings routes
    let settings_routes = Router::new()
        .route(
            "/api/settings",
            get(settings::get_settings).put(settings::update_settings),
        )
        .route("/api/settings/public", get(settings::get_public_settings));

    // Health and metrics (no business logic)
    let health_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    // Merge all routes
    Router::new()
        .merge(feedback_routes)
        .merge(settings_routes)
        .merge(health_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware)) // Prometheus metrics
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id)) // Request ID and logging
        .layer(cors)
        .with_state(state)
}
