//! Route definitions for the Santa HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via
//! Axum's `State` extractor.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(link_routes())
        .merge(department_routes())
        .merge(admin_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Auth endpoints: identify, login, register, logout, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/identify", post(handlers::auth::identify))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
}

/// Wishlist link endpoints: own link, submission, allocation, reporting
fn link_routes() -> Router<AppState> {
    Router::new()
        .route("/links", get(handlers::link::own_link))
        .route("/links", put(handlers::link::submit_link))
        .route("/links/allocate", post(handlers::link::allocate))
        .route("/links/allocated", get(handlers::link::allocated))
        .route(
            "/links/{id}/purchased",
            post(handlers::link::report_purchase),
        )
        .route(
            "/links/{id}/report-error",
            post(handlers::link::report_error),
        )
}

/// Department self-service endpoints
fn department_routes() -> Router<AppState> {
    Router::new()
        .route("/departments", get(handlers::department::list))
        .route("/departments/select", post(handlers::department::select))
}

/// Admin-only endpoints
fn admin_routes() -> Router<AppState> {
    Router::new()
        // Domain management
        .route("/admin/domains", get(handlers::admin::domains::list))
        .route("/admin/domains", post(handlers::admin::domains::create))
        .route(
            "/admin/domains/{id}/toggle",
            post(handlers::admin::domains::toggle),
        )
        .route(
            "/admin/domains/{id}",
            delete(handlers::admin::domains::delete),
        )
        // Department management
        .route(
            "/admin/departments",
            get(handlers::admin::departments::list),
        )
        .route(
            "/admin/departments",
            post(handlers::admin::departments::create),
        )
        .route(
            "/admin/departments/{id}",
            delete(handlers::admin::departments::delete),
        )
        // User management
        .route("/admin/users", get(handlers::admin::users::list))
        .route("/admin/users/{id}", put(handlers::admin::users::update))
        .route(
            "/admin/users/{id}/password",
            put(handlers::admin::users::reset_password),
        )
        .route("/admin/users/{id}", delete(handlers::admin::users::delete))
}

/// Health check endpoints (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}

/// Build CORS layer from configuration
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use axum::http::{HeaderValue, Method};
    use tower_http::cors::Any;

    let cors_config = &state.config.server.cors;

    let mut cors = CorsLayer::new();

    if cors_config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    let methods: Vec<Method> = cors_config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    cors = cors.allow_methods(methods);

    if cors_config.allowed_headers.contains(&"*".to_string()) {
        cors = cors.allow_headers(Any);
    }

    cors.max_age(std::time::Duration::from_secs(cors_config.max_age_seconds))
}
