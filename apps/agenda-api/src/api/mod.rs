//! API routes, nested under `/api` by `axum_helpers::create_router`.

pub mod agenda_eventos;
pub mod health;

use axum::{Json, Router, extract::State, routing::get};
use core_config::AppInfo;
use serde::Serialize;

use crate::state::AppState;

const INFO_MESSAGE: &str = "API 1 Projeto Fatec 100% funcional 👌";

#[derive(Serialize)]
struct ApiInfo {
    message: &'static str,
    version: &'static str,
}

pub fn routes(state: &AppState) -> Router {
    Router::new()
        .route("/", get(api_info).with_state(state.config.app))
        .nest("/AgendaEventos", agenda_eventos::router(state))
        .merge(health::router(state.clone()))
}

async fn api_info(State(app): State<AppInfo>) -> Json<ApiInfo> {
    Json(ApiInfo {
        message: INFO_MESSAGE,
        version: app.version,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Environment};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use core_config::{app_info, server::ServerConfig};
    use database::mongodb::MongoConfig;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn state() -> AppState {
        AppState::new(Config {
            app: app_info!(),
            mongodb: MongoConfig::with_database(
                "mongodb://127.0.0.1:1/?directConnection=true",
                "fatec",
            )
            .with_server_selection_timeout(1),
            server: ServerConfig::default(),
            environment: Environment::Development,
        })
    }

    async fn call(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_api_info() {
        let (status, body) = call(routes(&state()), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "message": "API 1 Projeto Fatec 100% funcional 👌", "version": "1.0.0" })
        );
    }

    #[tokio::test]
    async fn test_ready_reports_unreachable_store() {
        let state = state();
        let (status, body) = call(routes(&state), "/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["mongodb"], "disconnected");
        assert!(!state.db.is_connected());
    }

    #[tokio::test]
    async fn test_unknown_agenda_path_is_not_found_envelope() {
        let app = axum_helpers::create_router::<crate::openapi::ApiDoc>(
            routes(&state()),
            Router::new(),
            None,
        )
        .unwrap();

        for method in ["GET", "POST"] {
            let response = app
                .clone()
                .oneshot(
                    Request::builder()
                        .method(method)
                        .uri("/api/AgendaEventos/qualquer")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{method}");
            let bytes = response.into_body().collect().await.unwrap().to_bytes();
            let body: Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(body["errors"][0]["value"], "/api/AgendaEventos/qualquer");
            assert_eq!(body["errors"][0]["param"], "invalid route");
        }
    }

    #[tokio::test]
    async fn test_collection_url_with_trailing_slash_is_routed() {
        let app = axum_helpers::create_router::<crate::openapi::ApiDoc>(
            routes(&state()),
            Router::new(),
            None,
        )
        .unwrap();

        // The list route is reached; it fails only because the store is unreachable.
        let (status, body) = call(app, "/api/AgendaEventos/").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["errors"][0]["param"], "database");
    }

    #[tokio::test]
    async fn test_building_routes_does_not_connect() {
        let state = state();
        let _ = routes(&state);
        assert_eq!(state.db.attempts(), 0);
    }
}
