//! TopicLens Web Server
//!
//! Axum-based server exposing the demo and live generation endpoints.

pub mod error;
pub mod routes;
pub mod state;
pub mod upload;

use axum::{
    extract::DefaultBodyLimit,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use topiclens_core::validation::MAX_IMAGE_BYTES;
use topiclens_core::Config;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use error::ApiError;
use state::AppState;

/// Headroom above the image limit for the question and multipart framing.
const BODY_SLACK_BYTES: usize = 1024 * 1024;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/generate", post(routes::generate::generate))
        .route("/generate-demo", post(routes::demo::generate_demo))
        .layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES + BODY_SLACK_BYTES));

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(routes::health))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn panic_response(panic: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let message = panic
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| panic.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_else(|| "handler panicked".to_string());
    tracing::error!(panic = %message, "Request handler panicked");
    ApiError::unexpected(message).into_response()
}

/// Run the web server.
pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    if config.api_key().is_none() {
        tracing::warn!("GEMINI_API_KEY is not set; /api/generate will return configuration errors");
    }

    let app = create_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Web server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use topiclens_core::client::{AnswerClient, ClientError, ImageFile};
    use topiclens_core::result::ResultStore;
    use tower::ServiceExt;

    fn demo_config() -> Config {
        let mut config = Config::default();
        config.demo.delay_ms = 0;
        config
    }

    async fn spawn(config: Config) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = create_router(AppState::new(config));
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn temp_store() -> ResultStore {
        ResultStore::new(std::env::temp_dir().join(format!("topiclens-web-{}", uuid::Uuid::new_v4())))
    }

    #[tokio::test]
    async fn test_health() {
        let app = create_router(AppState::new(demo_config()));
        let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let app = create_router(AppState::new(demo_config()));
        let req = Request::builder().uri("/api/nope").body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_client_round_trip_through_demo_endpoint() {
        let base = spawn(demo_config()).await;
        let client = AnswerClient::new(&base);
        let store = temp_store();
        let image = ImageFile::new("cell.png", "image/png", routes::test_support::PNG.to_vec());

        let stored = client
            .ask("  What does this cell organelle do?  ", Some(&image), true, &store)
            .await
            .unwrap();

        assert_eq!(stored.result.topic, "Biology");
        assert_eq!(stored.original_question, "What does this cell organelle do?");
        assert_eq!(store.load().unwrap(), stored);
        let _ = std::fs::remove_dir_all(store.dir());
    }

    #[tokio::test]
    async fn test_client_sees_config_error_without_key() {
        let base = spawn(demo_config()).await;
        let client = AnswerClient::new(&base);
        let store = temp_store();
        let image = ImageFile::new("cell.png", "image/png", routes::test_support::PNG.to_vec());

        let err = client
            .ask("What is this?", Some(&image), false, &store)
            .await
            .unwrap_err();

        match err {
            ClientError::Server { status, message } => {
                assert_eq!(status, 500);
                assert!(message.contains("API key"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(store.load().is_err());
    }
}
