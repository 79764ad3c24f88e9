//! Speech synthesis.
//!
//! Fetches MP3 audio from the Google Translate TTS endpoint. The provider
//! caps the input length per request, so the text is bounded before the
//! single best-effort call; no chunking, no retry.

use std::time::Duration;

use crate::error::ServiceError;

const TTS_ENDPOINT: &str = "https://translate.google.com/translate_tts";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Provider limit on characters per request.
const MAX_INPUT_CHARS: usize = 200;

/// Client for text-to-speech synthesis.
#[derive(Clone, Default)]
pub struct SpeechClient {
    http: reqwest::Client,
}

impl SpeechClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Synthesizes `text` in language `lang` and returns MP3 bytes.
    pub async fn synthesize(&self, text: &str, lang: &str) -> Result<Vec<u8>, ServiceError> {
        let bounded: String = text.chars().take(MAX_INPUT_CHARS).collect();
        let url = format!(
            "{TTS_ENDPOINT}?ie=UTF-8&client=tw-ob&tl={lang}&q={}",
            urlencoding::encode(&bounded)
        );

        let response = self.http.get(&url).timeout(REQUEST_TIMEOUT).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Status(status.as_u16()));
        }

        Ok(response.bytes().await?.to_vec())
    }
}
