//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use forum_common::{AppConfig, AppError};
use forum_core::traits::LocalStorage;
use forum_core::SnowflakeGenerator;
use forum_service::{spawn_notification_ticker, RandomNotificationSource, ServiceContextBuilder};
use forum_store::{seed_demo_data, FileLocalStorage, MemoryLocalStorage};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::middleware::apply_middleware;
use crate::routes::create_router;
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let router = create_router();
    let router = apply_middleware(
        router,
        &state.config().cors,
        state.config().app.env.is_production(),
    );
    router.with_state(state)
}

/// Initialize all dependencies and create AppState
///
/// Opens local storage, seeds the demo data when enabled and restores the
/// persisted viewer.
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let storage: Arc<dyn LocalStorage> = match &config.storage.path {
        Some(path) => {
            info!(path = %path.display(), "Opening local storage file");
            Arc::new(FileLocalStorage::open(path).await?)
        }
        None => {
            info!("Using in-memory local storage");
            Arc::new(MemoryLocalStorage::new())
        }
    };

    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));

    let service_context = ServiceContextBuilder::new()
        .storage(storage)
        .snowflake_generator(snowflake_generator)
        .config(config.forum.clone())
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    if config.forum.seed_demo_data {
        seed_demo_data(
            service_context.user_repo(),
            service_context.question_repo(),
            service_context.answer_repo(),
            service_context.snowflake_generator(),
            &config.forum.demo,
        )
        .await?;
    }

    if let Some(viewer) = service_context.session().restore().await? {
        // The stored viewer may predate this process's member list
        if service_context.user_repo().find_by_id(viewer.id).await?.is_none() {
            warn!(user_id = %viewer.id, "Restored viewer is not a known member");
        }
    }

    Ok(AppState::new(service_context, config))
}

/// Start the background notification ticker if it is enabled
pub fn spawn_background_tasks(state: &AppState) -> Option<JoinHandle<()>> {
    let background = &state.config().background;
    if !background.enabled {
        return None;
    }

    Some(spawn_notification_ticker(
        state.service_context_handle(),
        RandomNotificationSource::from_entropy(background.probability),
        background.interval(),
    ))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid listen address: {e}")))?;

    let state = create_app_state(config).await?;
    let ticker = spawn_background_tasks(&state);

    let app = create_app(state);
    let result = run_server(app, addr).await;

    if let Some(handle) = ticker {
        handle.abort();
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn app() -> Router {
        let state = create_app_state(AppConfig::for_tests(0)).await.unwrap();
        create_app(state)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health_at_root_and_versioned() {
        let app = app().await;
        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");

        let (status, _) = send(&app, Method::GET, "/api/v1/health", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_request_id_is_set() {
        let response = app()
            .await
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_ask_then_list() {
        let app = app().await;
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/auth/register",
            Some(json!({"name": "alice", "email": "alice@example.com", "password": "secret1"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, created) = send(
            &app,
            Method::POST,
            "/api/v1/questions",
            Some(json!({"title": "Lifetimes?", "body": "Why 'a", "tags": ["Rust"]})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["tags"], json!(["rust"]));

        let (status, page) = send(&app, Method::GET, "/api/v1/questions?tags=rust", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(page["pagination"]["total_items"], 1);
        assert_eq!(page["data"][0]["id"], created["id"]);
    }

    #[tokio::test]
    async fn test_signed_out_vote_is_unauthorized() {
        let app = app().await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/questions/1/vote",
            Some(json!({"direction": "up"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body["error"]["code"].is_string());
    }

    #[tokio::test]
    async fn test_bad_ids_and_unknown_routes() {
        let app = app().await;
        let (status, body) = send(&app, Method::GET, "/api/v1/questions/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_PATH_PARAMETER");

        let (status, _) = send(&app, Method::GET, "/api/v1/questions/42", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
