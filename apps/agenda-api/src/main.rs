use axum::{Router, routing::get_service};
use axum_helpers::server::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::path::Path;
use std::time::Duration;
use tower_http::services::ServeFile;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    info!(
        "MongoDB configured at {} (database: {}); connecting on first use",
        config.mongodb.redacted_url(),
        config.mongodb.database()
    );

    let state = AppState::new(config);

    let api_routes = api::routes(&state);

    let static_dir = Path::new(&state.config.server.static_dir);
    let root_routes = Router::new()
        .route(
            "/favicon.ico",
            get_service(ServeFile::new(static_dir.join("image").join("computer.png"))),
        )
        .merge(health_router(state.config.app));

    let app = create_router::<openapi::ApiDoc>(api_routes, root_routes, Some(static_dir))?;

    info!("🖥️ Servidor rodando na porta {}", state.config.server.port);

    let db = state.db.clone();
    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!(
                connected = db.is_connected(),
                "Shutting down: closing MongoDB connections"
            );
            drop(db);
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Agenda API shutdown complete");
    Ok(())
}
