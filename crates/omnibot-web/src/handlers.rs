//! HTTP handlers.

use axum::{
    extract::{Host, Multipart, Path, State},
    http::header,
    response::{Html, IntoResponse, Response},
    Json,
};
use tracing::{error, info, warn};

use omnibot_store::StoreError;

use crate::error::ApiError;
use crate::state::AppState;
use crate::types::{ChatReply, ChatRequest, UploadResponse};

/// Fixed reply when the chat endpoint receives no text.
pub const EMPTY_TEXT_REPLY: &str = "Send some text.";

const NO_FILE_ERROR: &str = "No file";
const MALFORMED_UPLOAD_ERROR: &str = "Malformed upload";

/// GET / - the chat page.
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../assets/index.html"))
}

/// POST /webchat - chat endpoint mirroring the messaging front door's
/// free-text path, with the request's own host as the artifact URL base.
pub async fn webchat(
    State(state): State<AppState>,
    Host(host): Host,
    Json(request): Json<ChatRequest>,
) -> Json<ChatReply> {
    let text = request.text.trim();
    if text.is_empty() {
        return Json(ChatReply {
            reply: EMPTY_TEXT_REPLY.to_string(),
        });
    }

    let host_url = format!("http://{host}");
    let reply = state.router.dispatch_text(text, Some(&host_url)).await;
    Json(ChatReply { reply })
}

/// POST /upload - stores a multipart `file` field and returns its public
/// URL.
pub async fn upload(
    State(state): State<AppState>,
    Host(host): Host,
    mut multipart: Multipart,
) -> Json<UploadResponse> {
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.name() != Some("file") {
                    continue;
                }

                let hint = field
                    .file_name()
                    .map(str::to_string)
                    .unwrap_or_else(|| "upload.bin".to_string());

                let bytes = match field.bytes().await {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        warn!(error = %e, "upload body read failed");
                        return Json(UploadResponse::rejected(MALFORMED_UPLOAD_ERROR));
                    }
                };

                return match state.files.save(&bytes, &hint) {
                    Ok(filename) => {
                        let host_url = format!("http://{host}");
                        let url = state.files.public_url(&filename, Some(&host_url));
                        info!(filename = %filename, size = bytes.len(), "upload stored");
                        Json(UploadResponse::accepted(filename, url))
                    }
                    Err(e) => {
                        error!(error = %e, "failed to store upload");
                        Json(UploadResponse::rejected("Failed to store file"))
                    }
                };
            }
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "malformed multipart request");
                return Json(UploadResponse::rejected(MALFORMED_UPLOAD_ERROR));
            }
        }
    }

    Json(UploadResponse::rejected(NO_FILE_ERROR))
}

/// GET /files/{name} - serves a stored artifact.
pub async fn serve_file(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, ApiError> {
    let bytes = state.files.read(&name).map_err(|e| match e {
        StoreError::InvalidName(_) => ApiError::BadRequest(format!("invalid filename: {name}")),
        _ => ApiError::NotFound(format!("file not found: {name}")),
    })?;

    Ok(([(header::CONTENT_TYPE, content_type_for(&name))], bytes).into_response())
}

fn content_type_for(name: &str) -> &'static str {
    match name.rsplit('.').next() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("mp3") => "audio/mpeg",
        Some("ogg") => "audio/ogg",
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain; charset=utf-8",
        Some("html") => "text/html; charset=utf-8",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_for_known_extensions() {
        assert_eq!(content_type_for("1700000000_tg.jpg"), "image/jpeg");
        assert_eq!(content_type_for("1700000000_tts.mp3"), "audio/mpeg");
        assert_eq!(content_type_for("1700000000_doc.pdf"), "application/pdf");
    }

    #[test]
    fn test_content_type_for_unknown_extension() {
        assert_eq!(content_type_for("blob"), "application/octet-stream");
        assert_eq!(content_type_for("archive.xyz"), "application/octet-stream");
    }
}
