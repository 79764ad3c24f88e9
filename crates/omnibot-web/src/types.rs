//! Request and response DTOs for the HTTP front door.

use serde::{Deserialize, Serialize};

/// Body of `POST /webchat`.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// The user's message; missing field is treated as empty.
    #[serde(default)]
    pub text: String,
}

/// Response of `POST /webchat`.
#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub reply: String,
}

/// Response of `POST /upload`.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UploadResponse {
    /// The stored-file success shape.
    pub fn accepted(filename: String, url: String) -> Self {
        Self {
            ok: true,
            filename: Some(filename),
            url: Some(url),
            error: None,
        }
    }

    /// The failure shape with a short reason.
    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            filename: None,
            url: None,
            error: Some(error.into()),
        }
    }
}
