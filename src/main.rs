//! Random Acts of Santa — anonymous office gift-giving server.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use santa_core::config::AppConfig;
use santa_core::error::AppError;
use santa_database::repositories::allocation::AllocationStore;

#[tokio::main]
async fn main() {
    let env = std::env::var("SANTA_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        "Starting Random Acts of Santa v{}",
        env!("CARGO_PKG_VERSION")
    );

    // ── Step 1: Database connection + migrations ─────────────────
    let db = santa_database::DatabasePool::connect(&config.database).await?;
    santa_database::migration::run_migrations(db.pool()).await?;

    // ── Step 2: Initialize repositories ──────────────────────────
    let user_repo = Arc::new(santa_database::repositories::user::UserRepository::new(
        db.pool().clone(),
    ));
    let domain_repo = Arc::new(santa_database::repositories::domain::DomainRepository::new(
        db.pool().clone(),
    ));
    let department_repo = Arc::new(
        santa_database::repositories::department::DepartmentRepository::new(db.pool().clone()),
    );
    let link_repo = Arc::new(santa_database::repositories::link::LinkRepository::new(
        db.pool().clone(),
    ));
    let allocation_repo = Arc::new(
        santa_database::repositories::allocation::AllocationRepository::new(db.pool().clone()),
    );
    let session_repo = Arc::new(
        santa_database::repositories::session::SessionRepository::new(db.pool().clone()),
    );

    // ── Step 3: Initialize auth system ───────────────────────────
    let session_manager = Arc::new(santa_auth::session::SessionManager::new(
        Arc::clone(&session_repo),
        Arc::clone(&user_repo),
        Arc::clone(&domain_repo),
        config.session.clone(),
    ));

    // ── Step 4: Initialize services ──────────────────────────────
    let allocation_engine = Arc::new(santa_service::allocation::AllocationEngine::new(
        Arc::clone(&allocation_repo) as Arc<dyn AllocationStore>,
        Box::new(santa_service::allocation::RandomTieBreaker),
        config.allocation.clone(),
    ));
    let link_service = Arc::new(santa_service::link::LinkService::new(
        Arc::clone(&link_repo),
        Arc::clone(&allocation_repo),
    ));
    let department_service = Arc::new(santa_service::department::DepartmentService::new(
        Arc::clone(&department_repo),
        Arc::clone(&user_repo),
    ));
    let admin_domain_service = Arc::new(santa_service::domain::AdminDomainService::new(
        Arc::clone(&domain_repo),
        Arc::clone(&department_repo),
    ));
    let admin_user_service = Arc::new(santa_service::user::AdminUserService::new(
        Arc::clone(&user_repo),
        Arc::clone(&session_repo),
    ));

    // ── Step 5: Shutdown channel + session sweeper ───────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let sweeper_handle = {
        let session_manager = Arc::clone(&session_manager);
        let interval = Duration::from_secs(config.session.sweep_interval_seconds);
        let mut cancel = shutdown_rx.clone();

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if let Err(e) = session_manager.sweep_expired().await {
                            tracing::warn!("Session sweep failed: {}", e);
                        }
                    }
                    _ = cancel.changed() => break,
                }
            }
        })
    };

    // ── Step 6: Build and start HTTP server ──────────────────────
    let app_state = santa_api::state::AppState {
        config: Arc::new(config.clone()),
        db: db.clone(),
        session_manager,
        user_repo,
        domain_repo,
        department_repo,
        allocation_engine,
        link_service,
        department_service,
        admin_domain_service,
        admin_user_service,
    };

    let app = santa_api::router::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Santa server listening on {}", addr);

    // ── Step 7: Graceful shutdown ────────────────────────────────
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        let _ = shutdown_tx.send(true);
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    let _ = tokio::time::timeout(
        Duration::from_secs(config.server.shutdown_grace_seconds),
        sweeper_handle,
    )
    .await;

    db.close().await;
    tracing::info!("Santa server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
