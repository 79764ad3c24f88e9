//! Router configuration and server setup.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::handlers;
use crate::state::AppState;

/// Creates the HTTP router with all routes configured.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::index))
        .route("/webchat", post(handlers::webchat))
        .route("/upload", post(handlers::upload))
        .route("/files/:name", get(handlers::serve_file))
        .layer(cors)
        .with_state(state)
}

/// Binds the HTTP front door and serves until the process stops.
pub async fn serve(port: u16, state: AppState) -> Result<(), std::io::Error> {
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("web front door listening on {addr}");
    axum::serve(listener, create_router(state)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum_test::multipart::{MultipartForm, Part};
    use axum_test::TestServer;
    use serde_json::json;

    use omnibot_router::router::IMG_NEEDS_QUESTION;
    use omnibot_router::Router as Dispatch;
    use omnibot_services::{AiClient, SpeechClient, WeatherClient, WikiClient};
    use omnibot_store::{FileStore, NotesStore};
    use tempfile::tempdir;

    use crate::handlers::EMPTY_TEXT_REPLY;

    fn make_test_state() -> AppState {
        let dir = tempdir().unwrap();
        let path = dir.path().to_path_buf();
        std::mem::forget(dir);

        let files = Arc::new(FileStore::new(path.join("uploads"), None));
        let notes = Arc::new(NotesStore::new(path.join("notes.json")));
        let dispatch = Dispatch::new(
            // Nothing listens on port 1; tests must not reach the AI.
            AiClient::new("test-key", "test-model").with_endpoint("http://127.0.0.1:1/"),
            WikiClient::new(),
            WeatherClient::new(None),
            SpeechClient::new(),
            Arc::clone(&files),
            Arc::clone(&notes),
        );

        AppState::new(Arc::new(dispatch), files)
    }

    #[tokio::test]
    async fn test_index_serves_chat_page() {
        let server = TestServer::new(create_router(make_test_state())).unwrap();

        let response = server.get("/").await;
        response.assert_status_ok();
        assert!(response.text().contains("<html"));
    }

    #[tokio::test]
    async fn test_webchat_empty_text_prompts_for_input() {
        let server = TestServer::new(create_router(make_test_state())).unwrap();

        let response = server.post("/webchat").json(&json!({ "text": "  " })).await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(body["reply"], EMPTY_TEXT_REPLY);
    }

    #[tokio::test]
    async fn test_webchat_missing_text_field_prompts_for_input() {
        let server = TestServer::new(create_router(make_test_state())).unwrap();

        let response = server.post("/webchat").json(&json!({})).await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(body["reply"], EMPTY_TEXT_REPLY);
    }

    #[tokio::test]
    async fn test_webchat_img_without_question_needs_no_ai() {
        let server = TestServer::new(create_router(make_test_state())).unwrap();

        let response = server
            .post("/webchat")
            .json(&json!({ "text": "img:photo123.jpg" }))
            .await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(body["reply"], IMG_NEEDS_QUESTION);
    }

    #[tokio::test]
    async fn test_upload_then_fetch_roundtrip() {
        let server = TestServer::new(create_router(make_test_state())).unwrap();

        let form = MultipartForm::new()
            .add_part("file", Part::bytes(b"hello bytes".as_slice()).file_name("note.txt"));
        let response = server.post("/upload").multipart(form).await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(body["ok"], true);
        let filename = body["filename"].as_str().unwrap();
        assert!(filename.ends_with("_note.txt"));
        assert!(body["url"].as_str().unwrap().contains("/files/"));

        let response = server.get(&format!("/files/{filename}")).await;
        response.assert_status_ok();
        assert_eq!(response.as_bytes().as_ref(), b"hello bytes".as_slice());
    }

    #[tokio::test]
    async fn test_upload_without_file_field_is_rejected() {
        let server = TestServer::new(create_router(make_test_state())).unwrap();

        let form = MultipartForm::new().add_text("other", "value");
        let response = server.post("/upload").multipart(form).await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(body["ok"], false);
        assert_eq!(body["error"], "No file");
    }

    #[tokio::test]
    async fn test_unknown_file_is_not_found() {
        let server = TestServer::new(create_router(make_test_state())).unwrap();

        let response = server.get("/files/1700000000_missing.jpg").await;
        response.assert_status(axum::http::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_traversal_name_is_rejected() {
        let server = TestServer::new(create_router(make_test_state())).unwrap();

        // One encoded segment decoding to "../notes.json".
        let response = server.get("/files/..%2Fnotes.json").await;
        response.assert_status(axum::http::StatusCode::BAD_REQUEST);
    }
}
