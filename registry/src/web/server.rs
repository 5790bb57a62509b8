// File: registry/src/web/server.rs
use crate::config::Config;
use crate::database::Database;
use crate::web::{handlers, AppState};
use anyhow::Result;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub async fn start_web_server(config: Arc<Config>, database: Arc<Database>) -> Result<()> {
    let state = AppState::new(config.clone(), database);
    let app = create_router(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

pub fn create_router(state: AppState) -> Router {
    let mail_routes = Router::new()
        // === MAIL SERVER ROUTES ===
        .route("/add-server", post(handlers::add_mail_server))
        .route("/get-servers", get(handlers::get_all_mail_servers))
        .route(
            "/get/server/{server_id}",
            get(handlers::get_mail_server_by_id),
        )
        .route(
            "/update/server/{server_id}",
            put(handlers::update_mail_server_by_id),
        )
        .route(
            "/delete/server/{server_id}",
            delete(handlers::delete_mail_server_by_id),
        )
        // === ID-LESS PATHS ===
        .route("/get/server/", get(handlers::missing_server_id))
        .route("/update/server/", put(handlers::missing_server_id))
        .route("/delete/server/", delete(handlers::missing_server_id));

    let router = match route_prefix(&state.config.route_prefix) {
        Some(prefix) => Router::new().nest(&prefix, mail_routes),
        None => Router::new().merge(mail_routes),
    };

    router
        .route("/health", get(handlers::health_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Normalizes the configured prefix to `/segment` form; root means none.
fn route_prefix(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(format!("/{}", trimmed))
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
