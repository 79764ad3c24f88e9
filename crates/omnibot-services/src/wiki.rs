//! Encyclopedia summary lookup.
//!
//! Uses the Wikipedia REST page-summary endpoint and bounds the extract to
//! the first few sentences.

use std::time::Duration;

use crate::error::ServiceError;

const SUMMARY_ENDPOINT: &str = "https://en.wikipedia.org/api/rest_v1/page/summary";
const SUMMARY_SENTENCES: usize = 3;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for encyclopedia summaries.
#[derive(Clone, Default)]
pub struct WikiClient {
    http: reqwest::Client,
}

impl WikiClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up `topic` and returns a summary bounded to the first
    /// [`SUMMARY_SENTENCES`] sentences.
    pub async fn summary(&self, topic: &str) -> Result<String, ServiceError> {
        let url = format!(
            "{SUMMARY_ENDPOINT}/{}",
            urlencoding::encode(topic.trim())
        );

        let response = self.http.get(&url).timeout(REQUEST_TIMEOUT).send().await?;
        if !response.status().is_success() {
            return Err(ServiceError::NotFound);
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ServiceError::Malformed(e.to_string()))?;

        match json["extract"].as_str() {
            Some(extract) if !extract.is_empty() => {
                Ok(first_sentences(extract, SUMMARY_SENTENCES))
            }
            _ => Err(ServiceError::NotFound),
        }
    }
}

/// Cuts `text` after `count` sentence-ending periods.
fn first_sentences(text: &str, count: usize) -> String {
    let mut seen = 0;
    let mut end = text.len();
    for (i, c) in text.char_indices() {
        if c == '.' {
            seen += 1;
            if seen == count {
                end = i + 1;
                break;
            }
        }
    }
    text[..end].trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sentences_bounds_long_text() {
        let text = "One. Two. Three. Four. Five.";
        assert_eq!(first_sentences(text, 3), "One. Two. Three.");
    }

    #[test]
    fn test_first_sentences_keeps_short_text() {
        let text = "Only one sentence here.";
        assert_eq!(first_sentences(text, 3), text);
    }

    #[test]
    fn test_first_sentences_no_period() {
        let text = "no terminator at all";
        assert_eq!(first_sentences(text, 3), text);
    }
}
