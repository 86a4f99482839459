use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::not_found;
use axum::{
    Router,
    handler::HandlerWithoutStateExt,
    http::{HeaderValue, Method, header},
};
use core_config::server::ServerConfig;
use std::io;
use std::path::Path;
use std::time::Duration;
use tower::Layer;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::normalize_path::NormalizePathLayer;
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Build the CORS layer from an optional comma-separated origin list.
///
/// `None` yields a permissive layer (any origin, no credentials).
pub fn cors_layer(allowed_origins: Option<&str>) -> io::Result<CorsLayer> {
    let Some(origins_str) = allowed_origins else {
        info!("CORS_ALLOWED_ORIGIN not set, allowing any origin");
        return Ok(CorsLayer::permissive());
    };

    let origins: Vec<HeaderValue> = origins_str
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse::<HeaderValue>)
        .collect::<Result<_, _>>()
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid CORS_ALLOWED_ORIGIN value: {}", e),
            )
        })?;

    if origins.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "CORS_ALLOWED_ORIGIN cannot be empty",
        ));
    }

    info!("CORS configured with allowed origins: {}", origins_str);

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600)))
}

/// Creates the application router with cross-cutting concerns applied.
///
/// - API routes nested under `/api`, with a trailing slash trimmed before
///   routing (`/api/AgendaEventos/` serves the same as `/api/AgendaEventos`)
/// - `root` routes (health, favicon, ...) merged at the top level
/// - OpenAPI JSON at `/api-docs/openapi.json`, Swagger UI at `/swagger-ui`
/// - static files from `static_dir` for everything else, when given
/// - JSON 404 envelope for anything still unmatched, including a known path
///   called with a method it does not serve
/// - request tracing, CORS (`CORS_ALLOWED_ORIGIN`), response compression
///
/// Domain routers are expected to have their state applied already.
pub fn create_router<T>(apis: Router, root: Router, static_dir: Option<&Path>) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    let cors = cors_layer(std::env::var("CORS_ALLOWED_ORIGIN").ok().as_deref())?;

    // Nested as a service so the path is normalized before the API routes match.
    let apis = apis
        .fallback(not_found)
        .method_not_allowed_fallback(not_found);

    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .nest_service("/api", NormalizePathLayer::trim_trailing_slash().layer(apis))
        .merge(root)
        .method_not_allowed_fallback(not_found);

    let router = match static_dir {
        Some(dir) => {
            info!("Serving static files from {}", dir.display());
            router.fallback_service(
                ServeDir::new(dir)
                    .call_fallback_on_method_not_allowed(true)
                    .not_found_service(not_found.into_service()),
            )
        }
        None => router.fallback(not_found),
    };

    Ok(router
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(CompressionLayer::new()))
}

/// Serve `router` until SIGINT/SIGTERM, then run `cleanup` within `shutdown_timeout`.
///
/// # Example
/// ```ignore
/// create_production_app(router, &config.server, Duration::from_secs(30), async move {
///     drop(mongo);
/// })
/// .await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let (coordinator, _rx) = ShutdownCoordinator::new();
    let shutdown_handle = coordinator.clone();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let cleanup_handle = tokio::spawn(async move {
        shutdown_handle.wait_for_signal().await;

        info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
        match tokio::time::timeout(shutdown_timeout, cleanup).await {
            Ok(_) => info!("Cleanup completed successfully"),
            Err(_) => {
                tracing::warn!(
                    "Cleanup exceeded timeout of {:?}, forcing shutdown",
                    shutdown_timeout
                );
            }
        }
    });

    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move { coordinator.wait_for_signal().await })
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        });

    cleanup_handle.await.ok();

    serve_result
}
